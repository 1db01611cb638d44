//! Card catalog records and resolution into `Card`s.
//!
//! The catalog arrives already parsed: each record names its palace and,
//! for Number cards, its value. Resolution maps palace names onto board
//! paths and rejects records the board cannot honour.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardKind};
use crate::board::PathId;
use crate::core::SetupError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardRecordKind {
    Number,
    Ariadne,
    Minotaur,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub kind: CardRecordKind,
    pub palace_name: String,
    #[serde(default)]
    pub value: Option<u32>,
}

impl CardRecord {
    #[must_use]
    pub fn number(palace: impl Into<String>, value: u32) -> Self {
        Self {
            kind: CardRecordKind::Number,
            palace_name: palace.into(),
            value: Some(value),
        }
    }

    #[must_use]
    pub fn ariadne(palace: impl Into<String>) -> Self {
        Self {
            kind: CardRecordKind::Ariadne,
            palace_name: palace.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn minotaur(palace: impl Into<String>) -> Self {
        Self {
            kind: CardRecordKind::Minotaur,
            palace_name: palace.into(),
            value: None,
        }
    }

    /// Resolve against the board's path names.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<PathId>) -> Result<Card, SetupError> {
        let path = lookup(&self.palace_name)
            .ok_or_else(|| SetupError::UnknownPalace(self.palace_name.clone()))?;
        let kind = match self.kind {
            CardRecordKind::Number => {
                let value = self
                    .value
                    .filter(|&v| v > 0)
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| SetupError::InvalidCardValue {
                        palace: self.palace_name.clone(),
                    })?;
                CardKind::Number(value)
            }
            CardRecordKind::Ariadne => CardKind::Ariadne,
            CardRecordKind::Minotaur => CardKind::Minotaur,
        };
        Ok(Card::new(path, kind))
    }
}

/// Resolve a whole catalog, failing on the first bad record.
pub fn resolve_cards(
    records: &[CardRecord],
    lookup: impl Fn(&str) -> Option<PathId>,
) -> Result<Vec<Card>, SetupError> {
    records.iter().map(|r| r.resolve(&lookup)).collect()
}

const NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
const NUMBER_COPIES: usize = 2;
const ARIADNE_COPIES: usize = 3;
const MINOTAUR_COPIES: usize = 2;

/// Cards of the standard game for the given palaces: every number 1-10
/// twice, three Ariadne and two Minotaur cards per palace.
#[must_use]
pub fn standard_cards<S: AsRef<str>>(palaces: &[S]) -> Vec<CardRecord> {
    let mut records = Vec::new();
    for palace in palaces {
        let palace = palace.as_ref();
        for value in NUMBER_RANGE {
            records.extend(std::iter::repeat_with(|| CardRecord::number(palace, value)).take(NUMBER_COPIES));
        }
        records.extend(std::iter::repeat_with(|| CardRecord::ariadne(palace)).take(ARIADNE_COPIES));
        records.extend(std::iter::repeat_with(|| CardRecord::minotaur(palace)).take(MINOTAUR_COPIES));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::STANDARD_PALACES;

    fn lookup(name: &str) -> Option<PathId> {
        STANDARD_PALACES
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
            .map(|i| PathId::new(i as u8))
    }

    #[test]
    fn test_standard_deck_has_100_cards() {
        let records = standard_cards(&STANDARD_PALACES);
        assert_eq!(records.len(), 100);

        let cards = resolve_cards(&records, lookup).unwrap();
        let ariadne = cards.iter().filter(|c| c.kind == CardKind::Ariadne).count();
        let minotaur = cards.iter().filter(|c| c.kind == CardKind::Minotaur).count();
        assert_eq!(ariadne, 12);
        assert_eq!(minotaur, 8);
    }

    #[test]
    fn test_resolve_number() {
        let card = CardRecord::number("phaistos", 4).resolve(lookup).unwrap();
        assert_eq!(card, Card::number(PathId::new(1), 4));
    }

    #[test]
    fn test_unknown_palace() {
        let err = CardRecord::ariadne("Troy").resolve(lookup).unwrap_err();
        assert_eq!(err, SetupError::UnknownPalace("Troy".into()));
    }

    #[test]
    fn test_number_needs_positive_value() {
        let zero = CardRecord::number("Malia", 0);
        assert!(matches!(zero.resolve(lookup), Err(SetupError::InvalidCardValue { .. })));

        let missing = CardRecord {
            kind: CardRecordKind::Number,
            palace_name: "Malia".into(),
            value: None,
        };
        assert!(missing.resolve(lookup).is_err());
    }

    #[test]
    fn test_record_from_json() {
        let record: CardRecord =
            serde_json::from_str(r#"{"kind": "minotaur", "palace_name": "Zakros"}"#).unwrap();
        assert_eq!(record, CardRecord::minotaur("Zakros"));
    }
}
