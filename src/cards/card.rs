//! Cards.
//!
//! A card is bound to one path and is one of three closed variants:
//!
//! - **Number(v)**: move your pawn one step, subject to the path's ratchet.
//! - **Ariadne**: move your pawn two steps; never the first card of a turn.
//! - **Minotaur**: attack the first opponent pawn on the path.

use serde::{Deserialize, Serialize};

use crate::board::PathId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number(u8),
    Ariadne,
    Minotaur,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Number(v) => write!(f, "{v}"),
            CardKind::Ariadne => write!(f, "Ariadne"),
            CardKind::Minotaur => write!(f, "Minotaur"),
        }
    }
}

/// An immutable playable card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub path: PathId,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(path: PathId, kind: CardKind) -> Self {
        Self { path, kind }
    }

    #[must_use]
    pub const fn number(path: PathId, value: u8) -> Self {
        Self::new(path, CardKind::Number(value))
    }

    #[must_use]
    pub const fn ariadne(path: PathId) -> Self {
        Self::new(path, CardKind::Ariadne)
    }

    #[must_use]
    pub const fn minotaur(path: PathId) -> Self {
        Self::new(path, CardKind::Minotaur)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on path {}", self.kind, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Card::number(PathId::new(1), 7).to_string(), "7 on path 1");
        assert_eq!(Card::minotaur(PathId::new(3)).to_string(), "Minotaur on path 3");
    }
}
