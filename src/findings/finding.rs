//! Findings: collectible rewards hidden in boxes on finding slots.
//!
//! - **Statue** and **Rare** findings leave the board when collected.
//! - **Fresco** findings stay on the board; each player may photograph a
//!   fresco once, independently of the other player.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Location, PathId};
use crate::core::{ActionError, PlayerId};

/// Identifier assigned in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FindingId(pub u16);

impl FindingId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Statue,
    Fresco,
    Rare,
}

/// What happens to the board when a finding is claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The finding leaves the board.
    Remove,
    /// The finding stays for the other player.
    Keep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    id: FindingId,
    name: String,
    kind: FindingKind,
    points: u32,
    home_path: Option<PathId>,
    photographed_by: FxHashSet<PlayerId>,
}

impl Finding {
    #[must_use]
    pub fn new(
        id: FindingId,
        name: impl Into<String>,
        kind: FindingKind,
        points: u32,
        home_path: Option<PathId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            points,
            home_path,
            photographed_by: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> FindingId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> FindingKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Path a rare finding is pinned to.
    #[must_use]
    pub fn home_path(&self) -> Option<PathId> {
        self.home_path
    }

    #[must_use]
    pub fn is_photographed_by(&self, player: PlayerId) -> bool {
        self.photographed_by.contains(&player)
    }

    /// Players who have photographed this fresco.
    pub fn photographers(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.photographed_by.iter().copied()
    }

    /// Claim this finding for `player` at `location`.
    ///
    /// Statues and rare findings are always claimable. A fresco is claimable
    /// once per player and records the photographer.
    pub(crate) fn claim(
        &mut self,
        player: PlayerId,
        location: Location,
    ) -> Result<(CollectedFinding, Claim), ActionError> {
        let claim = match self.kind {
            FindingKind::Statue | FindingKind::Rare => Claim::Remove,
            FindingKind::Fresco => {
                if !self.photographed_by.insert(player) {
                    return Err(ActionError::FrescoAlreadyClaimed { player, location });
                }
                Claim::Keep
            }
        };
        Ok((self.record(), claim))
    }

    fn record(&self) -> CollectedFinding {
        CollectedFinding {
            name: self.name.clone(),
            kind: self.kind,
            points: self.points,
        }
    }
}

/// A finding as kept in a player's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedFinding {
    pub name: String,
    pub kind: FindingKind,
    pub points: u32,
}
