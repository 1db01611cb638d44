//! Outcome events.
//!
//! Every accepted intent produces an ordered list of `GameEvent`s that a
//! display collaborator can replay to animate the change. The engine also
//! keeps every event in its history, stamped with the turn it happened in
//! and its order within that turn.

use serde::{Deserialize, Serialize};

use crate::board::{Location, PathId};
use crate::cards::Card;
use crate::core::PlayerId;
use crate::findings::CollectedFinding;
use crate::pawns::PawnId;
use crate::rules::GameResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pawn was put on its starting position.
    PawnPlaced { pawn: PawnId, location: Location },

    /// A player became active.
    TurnStarted { player: PlayerId, turn: u32 },

    CardPlayed { player: PlayerId, card: Card },

    CardDiscarded { player: PlayerId, card: Card },

    CardDrawn { player: PlayerId, card: Card },

    PawnMoved { pawn: PawnId, from: Location, to: Location },

    PawnRevealed { pawn: PawnId },

    PawnFrozen { pawn: PawnId },

    FreezeLifted { pawn: PawnId },

    /// A path's Number-card floor was set to `value`.
    RatchetRaised { path: PathId, value: u8 },

    FindingCollected {
        player: PlayerId,
        pawn: PawnId,
        location: Location,
        finding: CollectedFinding,
    },

    FindingDestroyed {
        pawn: PawnId,
        location: Location,
        name: String,
    },

    /// Final scores in player order.
    GameOver { result: GameResult, scores: Vec<u32> },
}

impl GameEvent {
    /// The player whose intent caused this event, where one exists.
    #[must_use]
    pub fn actor(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardPlayed { player, .. }
            | GameEvent::CardDiscarded { player, .. }
            | GameEvent::CardDrawn { player, .. }
            | GameEvent::FindingCollected { player, .. } => Some(*player),
            GameEvent::PawnPlaced { pawn, .. } | GameEvent::FindingDestroyed { pawn, .. } => {
                Some(pawn.owner)
            }
            _ => None,
        }
    }
}

/// A history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number, 0 during setup.
    pub turn: u32,

    /// Order within the turn.
    pub sequence: u32,

    pub event: GameEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(turn: u32, sequence: u32, event: GameEvent) -> Self {
        Self {
            turn,
            sequence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor() {
        let player = PlayerId::new(1);
        let card = Card::minotaur(PathId::new(0));
        assert_eq!(GameEvent::CardPlayed { player, card }.actor(), Some(player));

        let pawn = PawnId::new(player, 3);
        let location = Location::new(PathId::new(0), 4);
        let destroyed = GameEvent::FindingDestroyed {
            pawn,
            location,
            name: "Snake Goddess".into(),
        };
        assert_eq!(destroyed.actor(), Some(player));
        assert_eq!(GameEvent::PawnFrozen { pawn }.actor(), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record = EventRecord::new(
            3,
            0,
            GameEvent::RatchetRaised {
                path: PathId::new(2),
                value: 6,
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["turn"], 3);
        assert_eq!(json["event"]["RatchetRaised"]["value"], 6);

        let back: EventRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
