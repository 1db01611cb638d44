//! Pawns: archaeologists and the hero.
//!
//! Each player owns a fixed set of pawns created at game start. Pawns are
//! never transferred or destroyed, only moved along the single path they
//! were placed on.

pub mod pawn;

pub use pawn::{Pawn, PawnId, PawnKind, PawnRole, PawnState, Visibility};
