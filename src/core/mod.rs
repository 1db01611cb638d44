//! Core engine types: players, RNG, configuration, errors, snapshots.
//!
//! These are the building blocks every other module leans on. Nothing in
//! here knows about turn order; that lives in `rules`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{
    is_finding_slot, EngineConfig, MAX_HAND_SIZE, MAX_PATHS, MAX_PATH_LENGTH, STANDARD_PALACES,
};
pub use error::{ActionError, RejectionKind, SetupError};
pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, DECK_STREAM, FINDINGS_STREAM, TURN_ORDER_STREAM};
pub use state::{FindingView, GameSnapshot, PathView, PawnView, PlayerView, PositionView};
