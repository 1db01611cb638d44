//! Game rules: card resolution, the turn engine and game construction.
//!
//! ## Key Types
//!
//! - `TurnEngine`: the state machine players submit intents to
//! - `GameBuilder`: validates config and catalogs, runs setup
//! - `CardEffect`: what an accepted card will do, from `evaluate`
//! - `Phase` / `GameResult`: where the game stands and how it ended

pub mod builder;
pub mod engine;
pub mod resolution;

pub use builder::GameBuilder;
pub use engine::{ActionOutcome, GameResult, Phase, TurnEngine};
pub use resolution::{apply, evaluate, CardEffect};
