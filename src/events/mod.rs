//! Outcome events emitted by the turn engine.

pub mod event;

pub use event::{EventRecord, GameEvent};
