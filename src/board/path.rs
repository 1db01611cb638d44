//! Paths: one ordered track of positions per palace.

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::core::config::is_finding_slot;
use crate::core::PlayerId;
use crate::pawns::PawnId;

/// Index of a path in board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u8);

impl PathId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position reference: path plus 1-based index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: PathId,
    pub index: usize,
}

impl Location {
    #[must_use]
    pub const fn new(path: PathId, index: usize) -> Self {
        Self { path, index }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "path {} position {}", self.path, self.index)
    }
}

/// Constraint on the next Number card playable on a path.
///
/// Starts unconstrained; each accepted Number play raises it to that
/// card's value. Only values at or above the current floor are admitted,
/// so the floor never decreases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ratchet {
    #[default]
    Unconstrained,
    AtLeast(u8),
}

impl Ratchet {
    #[must_use]
    pub fn admits(self, value: u8) -> bool {
        match self {
            Ratchet::Unconstrained => true,
            Ratchet::AtLeast(floor) => value >= floor,
        }
    }

    /// Last value played, if any.
    #[must_use]
    pub fn last(self) -> Option<u8> {
        match self {
            Ratchet::Unconstrained => None,
            Ratchet::AtLeast(floor) => Some(floor),
        }
    }

    /// Record an accepted play. Values below the floor leave it unchanged.
    pub fn raise(&mut self, value: u8) {
        if self.admits(value) {
            *self = Ratchet::AtLeast(value);
        }
    }
}

#[derive(Clone, Debug)]
pub struct Path {
    id: PathId,
    name: String,
    positions: Vec<Position>,
    ratchet: Ratchet,
}

impl Path {
    /// Build a path of `length` positions. Even indices and the last index
    /// are finding slots.
    #[must_use]
    pub fn new(id: PathId, name: impl Into<String>, length: usize) -> Self {
        let positions = (1..=length)
            .map(|i| Position::new(Location::new(id, i), is_finding_slot(i, length)))
            .collect();
        Self {
            id,
            name: name.into(),
            positions,
            ratchet: Ratchet::Unconstrained,
        }
    }

    #[must_use]
    pub fn id(&self) -> PathId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn ratchet(&self) -> Ratchet {
        self.ratchet
    }

    pub(crate) fn ratchet_mut(&mut self) -> &mut Ratchet {
        &mut self.ratchet
    }

    /// Positions in index order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position by 1-based index.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<&Position> {
        index.checked_sub(1).and_then(|i| self.positions.get(i))
    }

    pub(crate) fn position_mut(&mut self, index: usize) -> Option<&mut Position> {
        index.checked_sub(1).and_then(|i| self.positions.get_mut(i))
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Position] {
        &mut self.positions
    }

    /// First pawn of `player` on this path, lowest index first.
    #[must_use]
    pub fn player_pawn(&self, player: PlayerId) -> Option<PawnId> {
        self.first_resident(|p| p.owner == player)
    }

    /// First pawn not owned by `player`, lowest index first.
    #[must_use]
    pub fn opponent_pawn(&self, player: PlayerId) -> Option<PawnId> {
        self.first_resident(|p| p.owner != player)
    }

    fn first_resident(&self, pred: impl Fn(&PawnId) -> bool) -> Option<PawnId> {
        self.positions
            .iter()
            .flat_map(|pos| pos.residents().iter())
            .copied()
            .find(|p| pred(p))
    }
}
