//! Card system: card variants, catalog records, and the deck.
//!
//! ## Key Types
//!
//! - `Card`: an immutable card bound to one path
//! - `CardKind`: Number, Ariadne or Minotaur
//! - `CardRecord`: catalog entry as supplied by an external loader
//! - `Deck`: the shared, draw-once pile

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::{Card, CardKind};
pub use catalog::{resolve_cards, standard_cards, CardRecord, CardRecordKind};
pub use deck::Deck;
