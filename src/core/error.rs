//! Rejections and setup failures.
//!
//! `ActionError` covers every intent the engine refuses. Refusals are
//! synchronous and leave hands, deck and board untouched, so retrying the
//! same intent is always safe. `SetupError` covers bad configuration and
//! catalogs at construction time.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Location, PathId};
use crate::pawns::PawnId;

/// Broad class of a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionKind {
    /// Wrong player, wrong phase, or a reference that does not exist.
    Illegal,
    /// A well-formed intent the rules do not allow right now.
    RuleViolation,
}

/// Why a player intent was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{action} is not allowed during {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("no card at hand index {index} (hand holds {hand_size})")]
    InvalidCardIndex { index: usize, hand_size: usize },

    #[error("unknown pawn {0}")]
    UnknownPawn(PawnId),

    #[error("pawn {pawn} does not belong to {player}")]
    NotYourPawn { pawn: PawnId, player: PlayerId },

    #[error("unknown path `{0}`")]
    UnknownPath(String),

    #[error("no position {index} on path {path}")]
    InvalidPosition { path: PathId, index: usize },

    #[error("pawn {0} is already on the board")]
    PawnAlreadyPlaced(PawnId),

    #[error("pawn {pawn} is not {expected}")]
    WrongPawnKind {
        pawn: PawnId,
        expected: &'static str,
    },

    #[error("number {value} is below the last number {last} played on path {path}")]
    NumberTooLow { path: PathId, value: u8, last: u8 },

    #[error("Ariadne cannot be the first card played in a turn")]
    AriadneFirstCard,

    #[error("{player} has no pawn on path {path}")]
    NoOwnPawnOnPath { player: PlayerId, path: PathId },

    #[error("no opponent pawn on path {0}")]
    NoOpponentPawnOnPath(PathId),

    #[error("pawn {0} has reached the checkpoint and cannot be attacked")]
    TargetAtCheckpoint(PawnId),

    #[error("pawn {0} is frozen")]
    PawnFrozen(PawnId),

    #[error("pawn {0} is not on the board")]
    PawnNotPlaced(PawnId),

    #[error("position {0} already holds two pawns")]
    PositionFull(Location),

    #[error("position {0} already holds a pawn of the same player")]
    SameOwnerOccupied(Location),

    #[error("{player} already has a pawn on path {path}")]
    PathAlreadyUsed { player: PlayerId, path: PathId },

    #[error("pawn {pawn} cannot move past position {length}")]
    MoveBeyondPath { pawn: PawnId, length: usize },

    #[error("no finding at {0}")]
    NoFinding(Location),

    #[error("{player} already photographed the fresco at {location}")]
    FrescoAlreadyClaimed { player: PlayerId, location: Location },

    #[error("pawn {0} has no destroys left")]
    NoDestroysLeft(PawnId),
}

impl ActionError {
    /// Classify this rejection.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            ActionError::NotYourTurn(_)
            | ActionError::WrongPhase { .. }
            | ActionError::InvalidCardIndex { .. }
            | ActionError::UnknownPawn(_)
            | ActionError::NotYourPawn { .. }
            | ActionError::UnknownPath(_)
            | ActionError::InvalidPosition { .. }
            | ActionError::PawnAlreadyPlaced(_)
            | ActionError::WrongPawnKind { .. } => RejectionKind::Illegal,
            _ => RejectionKind::RuleViolation,
        }
    }
}

/// Why a game could not be set up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("catalog entry names unknown palace `{0}`")]
    UnknownPalace(String),

    #[error("number card on `{palace}` needs a positive value")]
    InvalidCardValue { palace: String },

    #[error("rare finding `{0}` has no palace")]
    RareWithoutPalace(String),

    #[error("rare slot on path {path} is already taken, cannot place `{finding}`")]
    RareSlotTaken { path: PathId, finding: String },

    #[error("no free finding slot left for `{0}`")]
    NoFreeFindingSlot(String),
}
