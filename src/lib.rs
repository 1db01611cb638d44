//! # minoan-paths
//!
//! Rule engine for a two-player race along four palace paths. Players play
//! cards from a shared deck to move their pawns, attack the opponent's and
//! dig up findings for points.
//!
//! ## Design Principles
//!
//! 1. **Suspend, don't poll**: the engine is a plain state machine. It waits
//!    in `Phase::AwaitingAction` until the caller submits an intent.
//!
//! 2. **Reject without side effects**: every refused intent returns an
//!    `ActionError` and leaves hands, deck and board untouched.
//!
//! 3. **Seeded randomness**: deck order, finding layout and the first
//!    player come from one seed, on independent streams.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors, snapshots
//! - `board`: paths, positions and the board that owns every pawn
//! - `pawns`: archaeologists and the hero
//! - `cards`: Number, Ariadne and Minotaur cards, the deck, catalogs
//! - `findings`: statues, frescoes and rare findings, catalogs
//! - `rules`: card resolution, the turn engine, game construction
//! - `events`: outcome events and history records
//!
//! ## Example
//!
//! ```
//! use minoan_paths::{GameBuilder, PawnId, Phase, PlayerId};
//!
//! let mut engine = GameBuilder::new().seed(7).build().unwrap();
//! let paths = engine.config().path_names.clone();
//! for player in PlayerId::both() {
//!     for (slot, path) in paths.iter().enumerate() {
//!         engine
//!             .place_starting_pawn(player, PawnId::new(player, slot as u8), path)
//!             .unwrap();
//!     }
//! }
//!
//! let player = engine.active_player().unwrap();
//! engine.discard_card(player, 0).unwrap();
//! assert_eq!(engine.phase(), Phase::AwaitingAction(player.opponent()));
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod events;
pub mod findings;
pub mod pawns;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionError, EngineConfig, GameRng, GameSnapshot, Player, PlayerId, PlayerMap,
    RejectionKind, SetupError, PLAYER_COUNT, STANDARD_PALACES,
};

pub use crate::board::{Board, Location, Path, PathId, Position, Ratchet};

pub use crate::pawns::{Pawn, PawnId, PawnKind, PawnRole, PawnState, Visibility};

pub use crate::cards::{Card, CardKind, CardRecord, CardRecordKind, Deck};

pub use crate::findings::{CollectedFinding, Finding, FindingId, FindingKind, FindingRecord};

pub use crate::rules::{ActionOutcome, CardEffect, GameBuilder, GameResult, Phase, TurnEngine};

pub use crate::events::{EventRecord, GameEvent};
