//! A single cell on a path.
//!
//! A position holds at most two pawns, never two of the same player, and at
//! most one finding. Whether it may hold a finding is fixed when the path
//! is built.

use smallvec::SmallVec;

use super::path::Location;
use crate::core::ActionError;
use crate::findings::Finding;
use crate::pawns::PawnId;

/// Pawns a position can hold.
pub const POSITION_CAPACITY: usize = 2;

#[derive(Clone, Debug)]
pub struct Position {
    location: Location,
    finding_slot: bool,
    residents: SmallVec<[PawnId; POSITION_CAPACITY]>,
    finding: Option<Finding>,
}

impl Position {
    #[must_use]
    pub fn new(location: Location, finding_slot: bool) -> Self {
        Self {
            location,
            finding_slot,
            residents: SmallVec::new(),
            finding: None,
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// 1-based index within the path.
    #[must_use]
    pub fn index(&self) -> usize {
        self.location.index
    }

    #[must_use]
    pub fn is_finding_slot(&self) -> bool {
        self.finding_slot
    }

    /// Resident pawns in arrival order.
    #[must_use]
    pub fn residents(&self) -> &[PawnId] {
        &self.residents
    }

    #[must_use]
    pub fn contains(&self, pawn: PawnId) -> bool {
        self.residents.contains(&pawn)
    }

    /// Check whether `pawn` could be added, without adding it.
    pub fn check_admits(&self, pawn: PawnId) -> Result<(), ActionError> {
        if self.residents.len() >= POSITION_CAPACITY {
            return Err(ActionError::PositionFull(self.location));
        }
        if self.residents.iter().any(|r| r.owner == pawn.owner) {
            return Err(ActionError::SameOwnerOccupied(self.location));
        }
        Ok(())
    }

    /// Add a pawn. Fails without changing anything if the position is full
    /// or already holds a pawn of the same owner.
    pub fn add_pawn(&mut self, pawn: PawnId) -> Result<(), ActionError> {
        self.check_admits(pawn)?;
        self.residents.push(pawn);
        Ok(())
    }

    /// Remove a pawn. Returns whether it was present.
    pub fn remove_pawn(&mut self, pawn: PawnId) -> bool {
        match self.residents.iter().position(|&r| r == pawn) {
            Some(i) => {
                self.residents.remove(i);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn finding(&self) -> Option<&Finding> {
        self.finding.as_ref()
    }

    pub(crate) fn finding_mut(&mut self) -> Option<&mut Finding> {
        self.finding.as_mut()
    }

    /// Put a finding here. Hands the finding back if this is not a finding
    /// slot or the slot is taken.
    pub(crate) fn place_finding(&mut self, finding: Finding) -> Result<(), Finding> {
        if !self.finding_slot || self.finding.is_some() {
            return Err(finding);
        }
        self.finding = Some(finding);
        Ok(())
    }

    pub(crate) fn take_finding(&mut self) -> Option<Finding> {
        self.finding.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PathId;
    use crate::core::PlayerId;
    use crate::findings::{FindingId, FindingKind};

    fn position(finding_slot: bool) -> Position {
        Position::new(Location::new(PathId::new(0), 4), finding_slot)
    }

    fn pawn(owner: u8, slot: u8) -> PawnId {
        PawnId::new(PlayerId::new(owner), slot)
    }

    fn statue() -> Finding {
        Finding::new(FindingId::new(0), "Snake Goddess", FindingKind::Statue, 0, None)
    }

    #[test]
    fn test_two_pawns_of_different_owners() {
        let mut pos = position(false);
        assert!(pos.add_pawn(pawn(0, 0)).is_ok());
        assert!(pos.add_pawn(pawn(1, 0)).is_ok());
        assert_eq!(pos.residents(), &[pawn(0, 0), pawn(1, 0)]);
    }

    #[test]
    fn test_same_owner_rejected() {
        let mut pos = position(false);
        pos.add_pawn(pawn(0, 0)).unwrap();

        let err = pos.add_pawn(pawn(0, 1)).unwrap_err();
        assert!(matches!(err, ActionError::SameOwnerOccupied(_)));
        assert_eq!(pos.residents().len(), 1);
    }

    #[test]
    fn test_third_pawn_rejected() {
        let mut pos = position(false);
        pos.add_pawn(pawn(0, 0)).unwrap();
        pos.add_pawn(pawn(1, 0)).unwrap();

        let err = pos.add_pawn(pawn(1, 2)).unwrap_err();
        assert!(matches!(err, ActionError::PositionFull(_)));
        assert_eq!(pos.residents().len(), 2);
    }

    #[test]
    fn test_remove_missing_pawn_is_noop() {
        let mut pos = position(false);
        pos.add_pawn(pawn(0, 0)).unwrap();

        assert!(!pos.remove_pawn(pawn(1, 0)));
        assert!(pos.remove_pawn(pawn(0, 0)));
        assert!(pos.residents().is_empty());
    }

    #[test]
    fn test_finding_only_on_slot() {
        let mut plain = position(false);
        assert!(plain.place_finding(statue()).is_err());
        assert!(plain.finding().is_none());

        let mut slot = position(true);
        assert!(slot.place_finding(statue()).is_ok());
        assert!(slot.place_finding(statue()).is_err());
        assert_eq!(slot.take_finding().map(|f| f.name().to_string()), Some("Snake Goddess".into()));
        assert!(slot.finding().is_none());
    }
}
