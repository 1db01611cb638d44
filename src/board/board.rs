//! The board: four paths, every pawn, and the findings on them.
//!
//! The board is the single owner of pawn locations. A pawn's `location`
//! and the resident list of the position it names are only ever changed
//! together, by `place_pawn` and `move_pawn`.

use rustc_hash::FxHashMap;

use super::path::{Location, Path, PathId};
use super::position::Position;
use crate::core::{ActionError, EngineConfig, GameRng, PlayerId, PlayerMap, SetupError, PLAYER_COUNT};
use crate::findings::{Finding, FindingKind};
use crate::pawns::{Pawn, PawnId};

/// A completed relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PawnMove {
    pub pawn: PawnId,
    pub from: Location,
    pub to: Location,
}

#[derive(Clone, Debug)]
pub struct Board {
    paths: Vec<Path>,
    names: FxHashMap<String, PathId>,
    pawns: PlayerMap<Vec<Pawn>>,
    checkpoint_index: usize,
    rare_slot_index: usize,
}

impl Board {
    /// Build an empty board with every pawn created but unplaced.
    ///
    /// The config is assumed validated.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let paths: Vec<Path> = config
            .path_names
            .iter()
            .enumerate()
            .map(|(i, name)| Path::new(PathId::new(i as u8), name.clone(), config.path_length))
            .collect();
        let names = paths
            .iter()
            .map(|p| (p.name().to_lowercase(), p.id()))
            .collect();
        let pawns = PlayerMap::new(PLAYER_COUNT, |owner| {
            let archaeologists = config.archaeologists_per_player as u8;
            (0..archaeologists)
                .map(|slot| Pawn::archaeologist(PawnId::new(owner, slot)))
                .chain(std::iter::once(Pawn::hero(
                    PawnId::new(owner, archaeologists),
                    config.hero_destroys,
                )))
                .collect()
        });

        Self {
            paths,
            names,
            pawns,
            checkpoint_index: config.checkpoint_index,
            rare_slot_index: config.rare_slot_index,
        }
    }

    // === Paths ===

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.index())
    }

    pub(crate) fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(id.index())
    }

    /// Look up a path by name, ignoring case.
    #[must_use]
    pub fn path_id(&self, name: &str) -> Option<PathId> {
        self.names.get(&name.to_lowercase()).copied()
    }

    #[must_use]
    pub fn checkpoint_index(&self) -> usize {
        self.checkpoint_index
    }

    #[must_use]
    pub fn position(&self, location: Location) -> Option<&Position> {
        self.path(location.path)?.position(location.index)
    }

    fn position_mut(&mut self, location: Location) -> Option<&mut Position> {
        self.path_mut(location.path)?.position_mut(location.index)
    }

    /// The position at `location`, or an `InvalidPosition` rejection.
    pub fn require_position(&self, location: Location) -> Result<&Position, ActionError> {
        self.position(location).ok_or(ActionError::InvalidPosition {
            path: location.path,
            index: location.index,
        })
    }

    // === Pawns ===

    #[must_use]
    pub fn pawn(&self, id: PawnId) -> Option<&Pawn> {
        self.pawns.get(id.owner)?.get(usize::from(id.slot))
    }

    fn pawn_mut(&mut self, id: PawnId) -> Option<&mut Pawn> {
        self.pawns.get_mut(id.owner)?.get_mut(usize::from(id.slot))
    }

    pub fn require_pawn(&self, id: PawnId) -> Result<&Pawn, ActionError> {
        self.pawn(id).ok_or(ActionError::UnknownPawn(id))
    }

    /// A player's pawns in slot order.
    #[must_use]
    pub fn pawns_of(&self, player: PlayerId) -> &[Pawn] {
        self.pawns.get(player).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every pawn of both players.
    pub fn pawns(&self) -> impl Iterator<Item = &Pawn> {
        self.pawns.values().flatten()
    }

    #[must_use]
    pub fn all_pawns_placed(&self) -> bool {
        self.pawns().all(|p| p.location().is_some())
    }

    #[must_use]
    pub fn any_checkpoint_reached(&self) -> bool {
        self.pawns().any(Pawn::checkpoint_reached)
    }

    /// Put an unplaced pawn on the first position of `path`.
    ///
    /// A player may have only one pawn per path.
    pub fn place_pawn(&mut self, id: PawnId, path: PathId) -> Result<Location, ActionError> {
        let pawn = self.require_pawn(id)?;
        if pawn.location().is_some() {
            return Err(ActionError::PawnAlreadyPlaced(id));
        }
        let target = self
            .path(path)
            .ok_or_else(|| ActionError::UnknownPath(path.to_string()))?;
        if self
            .pawns_of(id.owner)
            .iter()
            .any(|p| p.location().is_some_and(|l| l.path == path))
        {
            return Err(ActionError::PathAlreadyUsed {
                player: id.owner,
                path,
            });
        }
        let start = Location::new(target.id(), 1);

        let checkpoint = self.checkpoint_index;
        self.position_mut(start)
            .ok_or(ActionError::InvalidPosition { path, index: 1 })?
            .add_pawn(id)?;
        if let Some(pawn) = self.pawn_mut(id) {
            pawn.settle(start, checkpoint);
        }
        Ok(start)
    }

    /// Move a pawn `delta` steps along its path.
    ///
    /// Backward moves stop at position 1; forward moves past the end are
    /// rejected. If the target cannot take the pawn it stays where it was.
    /// A frozen hero is rejected and the attempt uses up its freeze.
    pub fn move_pawn(&mut self, id: PawnId, delta: i32) -> Result<PawnMove, ActionError> {
        let pawn = self.require_pawn(id)?;
        let from = pawn.location().ok_or(ActionError::PawnNotPlaced(id))?;
        let path_len = self.path(from.path).map_or(0, Path::len);

        let target = match pawn.plan_move(delta, path_len) {
            Err(ActionError::PawnFrozen(_)) => {
                if let Some(pawn) = self.pawn_mut(id) {
                    pawn.unfreeze();
                }
                return Err(ActionError::PawnFrozen(id));
            }
            other => other?,
        };
        let to = Location::new(from.path, target);

        if to != from {
            let old = self
                .position_mut(from)
                .ok_or(ActionError::InvalidPosition { path: from.path, index: from.index })?;
            old.remove_pawn(id);

            let added = match self.position_mut(to) {
                Some(new) => new.add_pawn(id),
                None => Err(ActionError::InvalidPosition { path: to.path, index: to.index }),
            };
            if let Err(err) = added {
                if let Some(old) = self.position_mut(from) {
                    // Just vacated, so this cannot fail.
                    let _ = old.add_pawn(id);
                }
                return Err(err);
            }
        }

        let checkpoint = self.checkpoint_index;
        if let Some(pawn) = self.pawn_mut(id) {
            pawn.settle(to, checkpoint);
        }
        Ok(PawnMove { pawn: id, from, to })
    }

    /// Force-reveal a pawn. Returns whether it was hidden.
    pub fn reveal(&mut self, id: PawnId) -> bool {
        self.pawn_mut(id).is_some_and(Pawn::reveal)
    }

    /// Freeze a hero. Returns whether the freeze is new.
    pub fn freeze(&mut self, id: PawnId) -> bool {
        self.pawn_mut(id).is_some_and(Pawn::freeze)
    }

    /// Lift freezes on a player's pawns, returning the pawns that thawed.
    pub fn thaw(&mut self, player: PlayerId) -> Vec<PawnId> {
        self.pawns
            .get_mut(player)
            .map(|pawns| {
                pawns
                    .iter_mut()
                    .filter_map(|p| p.unfreeze().then(|| p.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn spend_destroy(&mut self, id: PawnId) -> Result<(), ActionError> {
        self.pawn_mut(id)
            .ok_or(ActionError::UnknownPawn(id))?
            .spend_destroy()
    }

    // === Findings ===

    pub(crate) fn finding_mut(&mut self, location: Location) -> Option<&mut Finding> {
        self.position_mut(location)?.finding_mut()
    }

    pub(crate) fn take_finding(&mut self, location: Location) -> Option<Finding> {
        self.position_mut(location)?.take_finding()
    }

    /// Pin a rare finding to the rare slot of its home path.
    pub fn place_rare(&mut self, finding: Finding) -> Result<Location, SetupError> {
        let name = finding.name().to_string();
        let path = finding
            .home_path()
            .ok_or_else(|| SetupError::RareWithoutPalace(name.clone()))?;
        let location = Location::new(path, self.rare_slot_index);
        let slot = self
            .position_mut(location)
            .ok_or_else(|| SetupError::UnknownPalace(path.to_string()))?;
        slot.place_finding(finding)
            .map_err(|_| SetupError::RareSlotTaken { path, finding: name })?;
        Ok(location)
    }

    /// Put a common finding on the first free slot of a randomly chosen
    /// path that still has one.
    pub fn scatter(&mut self, finding: Finding, rng: &mut GameRng) -> Result<Location, SetupError> {
        let open: Vec<PathId> = self
            .paths
            .iter()
            .filter(|p| free_slot(p).is_some())
            .map(Path::id)
            .collect();
        let name = finding.name().to_string();
        let chosen = rng
            .choose(&open)
            .and_then(|&path| self.path(path))
            .and_then(|path| free_slot(path).map(|i| Location::new(path.id(), i)));
        let Some(location) = chosen else {
            return Err(SetupError::NoFreeFindingSlot(name));
        };
        self.position_mut(location)
            .ok_or_else(|| SetupError::NoFreeFindingSlot(name.clone()))?
            .place_finding(finding)
            .map_err(|_| SetupError::NoFreeFindingSlot(name))?;
        Ok(location)
    }

    /// Deal each path's findings back onto that path's finding slots in a
    /// random order. Findings never leave their path.
    pub fn shuffle_findings(&mut self, rng: &mut GameRng) {
        for path in &mut self.paths {
            let slots = path.positions_mut();
            let mut findings: Vec<Finding> = slots
                .iter_mut()
                .filter_map(Position::take_finding)
                .collect();
            rng.shuffle(&mut findings);

            let mut findings = findings.into_iter();
            for slot in slots.iter_mut().filter(|s| s.is_finding_slot()) {
                match findings.next() {
                    Some(f) => {
                        let _ = slot.place_finding(f);
                    }
                    None => break,
                }
            }
        }
    }

    /// Place rare findings on their rare slots, scatter the rest, then
    /// shuffle each path's findings.
    pub fn distribute_findings(
        &mut self,
        findings: Vec<Finding>,
        rng: &mut GameRng,
    ) -> Result<(), SetupError> {
        let (rare, common): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.kind() == FindingKind::Rare);

        for finding in rare {
            self.place_rare(finding)?;
        }
        for finding in common {
            self.scatter(finding, rng)?;
        }
        self.shuffle_findings(rng);
        Ok(())
    }

    /// Every finding on the board with its location.
    pub fn findings(&self) -> impl Iterator<Item = (Location, &Finding)> {
        self.paths
            .iter()
            .flat_map(|p| p.positions().iter())
            .filter_map(|pos| pos.finding().map(|f| (pos.location(), f)))
    }
}

fn free_slot(path: &Path) -> Option<usize> {
    path.positions()
        .iter()
        .find(|p| p.is_finding_slot() && p.finding().is_none())
        .map(Position::index)
}
