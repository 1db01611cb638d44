//! Pawns and their movement state machine.
//!
//! ## Variants
//!
//! - **Archaeologist**: opens boxes to collect findings.
//! - **Hero**: cannot collect, but can destroy findings a bounded number of
//!   times, and is frozen rather than pushed back when attacked.
//!
//! ## Identity
//!
//! Every pawn starts `Hidden`. Revealing is one-way: once `Revealed` a pawn
//! never hides again, so forcing a reveal twice is harmless.
//!
//! ## Movement
//!
//! `plan_move` is the pure half of a move: it validates the pawn's own
//! state and computes the target index. The board performs the actual
//! relocation so that a blocked target leaves the pawn where it was.

use serde::{Deserialize, Serialize};

use crate::board::Location;
use crate::core::{ActionError, PlayerId};

/// Pawn identifier: owner plus the pawn's slot among that owner's pawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PawnId {
    pub owner: PlayerId,
    pub slot: u8,
}

impl PawnId {
    #[must_use]
    pub const fn new(owner: PlayerId, slot: u8) -> Self {
        Self { owner, slot }
    }
}

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}#{}", self.owner.0 + 1, self.slot)
    }
}

/// Variant tag without per-variant state, for views and catalog-like use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PawnRole {
    Archaeologist,
    Hero,
}

impl PawnRole {
    /// Short phrase for log and error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            PawnRole::Archaeologist => "an archaeologist",
            PawnRole::Hero => "the hero",
        }
    }
}

/// Pawn variant with its variant-specific state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PawnKind {
    Archaeologist,
    Hero { frozen: bool, destroys_left: u8 },
}

impl PawnKind {
    /// Drop the variant state.
    #[must_use]
    pub fn role(self) -> PawnRole {
        match self {
            PawnKind::Archaeologist => PawnRole::Archaeologist,
            PawnKind::Hero { .. } => PawnRole::Hero,
        }
    }
}

/// Whether the opponent knows a pawn's role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
}

/// Observable movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PawnState {
    Unplaced,
    Placed(usize),
    Frozen(usize),
    Checkpointed(usize),
}

/// A pawn on (or waiting to enter) the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    id: PawnId,
    kind: PawnKind,
    location: Option<Location>,
    visibility: Visibility,
    checkpoint_reached: bool,
}

impl Pawn {
    /// A fresh, unplaced, hidden archaeologist.
    #[must_use]
    pub fn archaeologist(id: PawnId) -> Self {
        Self::with_kind(id, PawnKind::Archaeologist)
    }

    /// A fresh hero with `destroys` uses.
    #[must_use]
    pub fn hero(id: PawnId, destroys: u8) -> Self {
        Self::with_kind(
            id,
            PawnKind::Hero {
                frozen: false,
                destroys_left: destroys,
            },
        )
    }

    fn with_kind(id: PawnId, kind: PawnKind) -> Self {
        Self {
            id,
            kind,
            location: None,
            visibility: Visibility::Hidden,
            checkpoint_reached: false,
        }
    }

    /// Identifier of this pawn.
    #[must_use]
    pub fn id(&self) -> PawnId {
        self.id
    }

    /// Player who owns the pawn.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.id.owner
    }

    /// Variant with its state.
    #[must_use]
    pub fn kind(&self) -> PawnKind {
        self.kind
    }

    /// Archaeologist or hero.
    #[must_use]
    pub fn role(&self) -> PawnRole {
        self.kind.role()
    }

    /// Where the pawn stands; `None` before placement.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Whether the opponent may see the role.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the role is still hidden from the opponent.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    /// Whether the pawn stands on the checkpoint.
    #[must_use]
    pub fn checkpoint_reached(&self) -> bool {
        self.checkpoint_reached
    }

    /// Whether a hero is currently frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self.kind, PawnKind::Hero { frozen: true, .. })
    }

    /// Destroys left; `None` for archaeologists.
    #[must_use]
    pub fn destroys_left(&self) -> Option<u8> {
        match self.kind {
            PawnKind::Hero { destroys_left, .. } => Some(destroys_left),
            PawnKind::Archaeologist => None,
        }
    }

    /// Movement state derived from location, freeze and checkpoint.
    #[must_use]
    pub fn state(&self) -> PawnState {
        match self.location {
            None => PawnState::Unplaced,
            Some(loc) if self.is_frozen() => PawnState::Frozen(loc.index),
            Some(loc) if self.checkpoint_reached => PawnState::Checkpointed(loc.index),
            Some(loc) => PawnState::Placed(loc.index),
        }
    }

    /// Reveal the pawn. Returns whether it was hidden before.
    pub fn reveal(&mut self) -> bool {
        let was_hidden = self.is_hidden();
        self.visibility = Visibility::Revealed;
        was_hidden
    }

    /// Freeze a hero. Returns whether the freeze is new; archaeologists
    /// cannot be frozen.
    pub fn freeze(&mut self) -> bool {
        match &mut self.kind {
            PawnKind::Hero { frozen, .. } if !*frozen => {
                *frozen = true;
                true
            }
            _ => false,
        }
    }

    /// Lift a freeze. Returns whether the pawn was frozen.
    pub fn unfreeze(&mut self) -> bool {
        match &mut self.kind {
            PawnKind::Hero { frozen, .. } if *frozen => {
                *frozen = false;
                true
            }
            _ => false,
        }
    }

    /// Spend one destroy use.
    pub(crate) fn spend_destroy(&mut self) -> Result<(), ActionError> {
        match &mut self.kind {
            PawnKind::Hero { destroys_left, .. } if *destroys_left > 0 => {
                *destroys_left -= 1;
                Ok(())
            }
            PawnKind::Hero { .. } => Err(ActionError::NoDestroysLeft(self.id)),
            PawnKind::Archaeologist => Err(ActionError::WrongPawnKind {
                pawn: self.id,
                expected: PawnRole::Hero.describe(),
            }),
        }
    }

    /// Validate a move of `delta` steps on a path of `path_len` positions and
    /// return the target index.
    ///
    /// Backward overshoot saturates at position 1; forward overshoot is
    /// rejected. A frozen pawn is rejected without consuming the freeze; the
    /// board decides what a blocked attempt costs.
    pub fn plan_move(&self, delta: i32, path_len: usize) -> Result<usize, ActionError> {
        let from = self.location.ok_or(ActionError::PawnNotPlaced(self.id))?;
        if self.is_frozen() {
            return Err(ActionError::PawnFrozen(self.id));
        }
        let target = (from.index as i64 + i64::from(delta)).max(1) as usize;
        if target > path_len {
            return Err(ActionError::MoveBeyondPath {
                pawn: self.id,
                length: path_len,
            });
        }
        Ok(target)
    }

    /// Record the pawn's new location and recompute the checkpoint flag.
    pub(crate) fn settle(&mut self, location: Location, checkpoint_index: usize) {
        self.location = Some(location);
        self.checkpoint_reached = location.index == checkpoint_index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PathId;

    fn id() -> PawnId {
        PawnId::new(PlayerId::new(0), 0)
    }

    fn placed_at(mut pawn: Pawn, index: usize) -> Pawn {
        pawn.settle(Location::new(PathId::new(0), index), 7);
        pawn
    }

    #[test]
    fn test_new_pawns_hidden_and_unplaced() {
        let pawn = Pawn::archaeologist(id());
        assert!(pawn.is_hidden());
        assert_eq!(pawn.state(), PawnState::Unplaced);
        assert_eq!(pawn.destroys_left(), None);

        let hero = Pawn::hero(id(), 3);
        assert_eq!(hero.destroys_left(), Some(3));
        assert!(!hero.is_frozen());
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut pawn = Pawn::archaeologist(id());
        assert!(pawn.reveal());
        assert!(!pawn.reveal());
        assert_eq!(pawn.visibility(), Visibility::Revealed);
    }

    #[test]
    fn test_plan_move_unplaced() {
        let pawn = Pawn::archaeologist(id());
        assert_eq!(pawn.plan_move(1, 9), Err(ActionError::PawnNotPlaced(id())));
    }

    #[test]
    fn test_plan_move_clamps_backwards() {
        let pawn = placed_at(Pawn::archaeologist(id()), 2);
        assert_eq!(pawn.plan_move(-2, 9), Ok(1));
        assert_eq!(pawn.plan_move(-5, 9), Ok(1));
    }

    #[test]
    fn test_plan_move_rejects_overshoot() {
        let pawn = placed_at(Pawn::archaeologist(id()), 8);
        assert_eq!(pawn.plan_move(1, 9), Ok(9));
        assert!(matches!(
            pawn.plan_move(2, 9),
            Err(ActionError::MoveBeyondPath { length: 9, .. })
        ));
    }

    #[test]
    fn test_frozen_hero_cannot_plan() {
        let mut hero = placed_at(Pawn::hero(id(), 3), 3);
        assert!(hero.freeze());
        assert!(!hero.freeze());
        assert_eq!(hero.state(), PawnState::Frozen(3));
        assert_eq!(hero.plan_move(1, 9), Err(ActionError::PawnFrozen(id())));

        assert!(hero.unfreeze());
        assert_eq!(hero.plan_move(1, 9), Ok(4));
    }

    #[test]
    fn test_archaeologist_never_frozen() {
        let mut pawn = placed_at(Pawn::archaeologist(id()), 3);
        assert!(!pawn.freeze());
        assert!(!pawn.is_frozen());
    }

    #[test]
    fn test_checkpoint_flag_follows_index() {
        let pawn = placed_at(Pawn::archaeologist(id()), 7);
        assert!(pawn.checkpoint_reached());
        assert_eq!(pawn.state(), PawnState::Checkpointed(7));

        let pawn = placed_at(pawn, 5);
        assert!(!pawn.checkpoint_reached());
    }

    #[test]
    fn test_destroy_uses_run_out() {
        let mut hero = Pawn::hero(id(), 2);
        assert!(hero.spend_destroy().is_ok());
        assert!(hero.spend_destroy().is_ok());
        assert_eq!(hero.spend_destroy(), Err(ActionError::NoDestroysLeft(id())));
        assert_eq!(hero.destroys_left(), Some(0));

        let mut pawn = Pawn::archaeologist(id());
        assert!(matches!(pawn.spend_destroy(), Err(ActionError::WrongPawnKind { .. })));
    }
}
