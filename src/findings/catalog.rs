//! Finding catalog records.
//!
//! An external loader turns whatever asset naming it uses into
//! `FindingRecord`s; the engine only checks that rare findings name a
//! palace the board knows.

use serde::{Deserialize, Serialize};

use super::finding::{Finding, FindingId, FindingKind};
use crate::board::PathId;
use crate::core::SetupError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub points: u32,
    /// Required for rare findings, ignored otherwise.
    #[serde(default)]
    pub palace_name: Option<String>,
}

impl FindingRecord {
    #[must_use]
    pub fn statue(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            kind: FindingKind::Statue,
            points,
            palace_name: None,
        }
    }

    #[must_use]
    pub fn fresco(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            kind: FindingKind::Fresco,
            points,
            palace_name: None,
        }
    }

    #[must_use]
    pub fn rare(name: impl Into<String>, points: u32, palace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FindingKind::Rare,
            points,
            palace_name: Some(palace.into()),
        }
    }

    /// Resolve against the board's path names. Only rare findings are
    /// bound to a path.
    pub fn resolve(
        &self,
        id: FindingId,
        lookup: impl Fn(&str) -> Option<PathId>,
    ) -> Result<Finding, SetupError> {
        let home_path = match self.kind {
            FindingKind::Rare => {
                let palace = self
                    .palace_name
                    .as_deref()
                    .ok_or_else(|| SetupError::RareWithoutPalace(self.name.clone()))?;
                let path =
                    lookup(palace).ok_or_else(|| SetupError::UnknownPalace(palace.to_string()))?;
                Some(path)
            }
            FindingKind::Statue | FindingKind::Fresco => None,
        };
        Ok(Finding::new(id, self.name.clone(), self.kind, self.points, home_path))
    }
}

/// Resolve a whole catalog, numbering findings in catalog order.
pub fn resolve_findings(
    records: &[FindingRecord],
    lookup: impl Fn(&str) -> Option<PathId>,
) -> Result<Vec<Finding>, SetupError> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.resolve(FindingId::new(i as u16), &lookup))
        .collect()
}

const FRESCO_POINTS: [u32; 6] = [20, 20, 15, 20, 15, 15];
const STATUE_COUNT: usize = 10;

/// Findings of the standard game: one rare finding per palace, six
/// frescoes and ten statues, exactly filling the standard board's slots.
#[must_use]
pub fn standard_findings() -> Vec<FindingRecord> {
    let mut records = vec![
        FindingRecord::rare("Phaistos Disk", 35, "Phaistos"),
        FindingRecord::rare("Knossos Ring", 25, "Knossos"),
        FindingRecord::rare("Malia Jewel", 25, "Malia"),
        FindingRecord::rare("Zakros Rhyton", 25, "Zakros"),
    ];
    records.extend(
        FRESCO_POINTS
            .iter()
            .enumerate()
            .map(|(i, &points)| FindingRecord::fresco(format!("Fresco {}", i + 1), points)),
    );
    records.extend((0..STATUE_COUNT).map(|_| FindingRecord::statue("Snake Goddess", 0)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts() {
        let records = standard_findings();
        let count = |kind| records.iter().filter(|r| r.kind == kind).count();

        assert_eq!(count(FindingKind::Rare), 4);
        assert_eq!(count(FindingKind::Fresco), 6);
        assert_eq!(count(FindingKind::Statue), 10);
        assert!(records
            .iter()
            .filter(|r| r.kind == FindingKind::Rare)
            .all(|r| r.palace_name.is_some()));
    }

    #[test]
    fn test_record_from_json() {
        let record: FindingRecord =
            serde_json::from_str(r#"{"name": "Ring", "type": "rare", "points": 25, "palace_name": "Knossos"}"#)
                .unwrap();
        assert_eq!(record, FindingRecord::rare("Ring", 25, "Knossos"));

        let record: FindingRecord =
            serde_json::from_str(r#"{"name": "Goddess", "type": "statue", "points": 0}"#).unwrap();
        assert_eq!(record.palace_name, None);
    }

    fn lookup(name: &str) -> Option<PathId> {
        ["Knossos", "Phaistos"]
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
            .map(|i| PathId::new(i as u8))
    }

    #[test]
    fn test_resolve_rare_binds_path() {
        let finding = FindingRecord::rare("Disk", 35, "phaistos")
            .resolve(FindingId::new(7), lookup)
            .unwrap();
        assert_eq!(finding.home_path(), Some(PathId::new(1)));
        assert_eq!(finding.id(), FindingId::new(7));
        assert_eq!(finding.points(), 35);
    }

    #[test]
    fn test_resolve_rare_errors() {
        let unknown = FindingRecord::rare("Rhyton", 25, "Zakros");
        assert_eq!(
            unknown.resolve(FindingId::new(0), lookup),
            Err(SetupError::UnknownPalace("Zakros".into()))
        );

        let mut homeless = FindingRecord::rare("Jewel", 25, "Knossos");
        homeless.palace_name = None;
        assert_eq!(
            homeless.resolve(FindingId::new(0), lookup),
            Err(SetupError::RareWithoutPalace("Jewel".into()))
        );
    }

    #[test]
    fn test_common_findings_ignore_palace() {
        let mut fresco = FindingRecord::fresco("Dolphins", 20);
        fresco.palace_name = Some("Atlantis".into());
        let finding = fresco.resolve(FindingId::new(0), lookup).unwrap();
        assert_eq!(finding.home_path(), None);
    }

    #[test]
    fn test_resolve_findings_numbers_in_order() {
        let records = vec![FindingRecord::statue("A", 0), FindingRecord::fresco("B", 15)];
        let findings = resolve_findings(&records, lookup).unwrap();
        let ids: Vec<_> = findings.iter().map(Finding::id).collect();
        assert_eq!(ids, vec![FindingId::new(0), FindingId::new(1)]);
    }
}
