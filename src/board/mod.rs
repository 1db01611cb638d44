//! The board: paths of positions, the pawns on them, and the findings
//! hidden along them.
//!
//! ## Key Types
//!
//! - `Board`: owns every path and pawn; the only place pawns move
//! - `Path`: an ordered track with its Number-card ratchet
//! - `Position`: a cell holding up to two pawns and one finding
//! - `Location`: a (path, index) reference, 1-based

#[allow(clippy::module_inception)]
pub mod board;
pub mod path;
pub mod position;

pub use board::{Board, PawnMove};
pub use path::{Location, Path, PathId, Ratchet};
pub use position::{Position, POSITION_CAPACITY};
