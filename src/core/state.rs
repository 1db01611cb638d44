//! Read-only game snapshots.
//!
//! The engine never hands out live references to a collaborator that
//! could mutate them; display layers receive a `GameSnapshot` instead.
//!
//! ## Views
//!
//! - `GameSnapshot::capture(.., None)` is omniscient, for harnesses and tests.
//! - `GameSnapshot::capture(.., Some(viewer))` hides what `viewer` cannot
//!   know: the role of the opponent's unrevealed pawns and the cards in the
//!   opponent's hand.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, PlayerMap};
use crate::board::{Board, Location, Path, PathId, Position};
use crate::cards::Card;
use crate::findings::{CollectedFinding, Finding, FindingKind};
use crate::pawns::{Pawn, PawnId, PawnRole};
use crate::rules::Phase;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnView {
    pub id: PawnId,
    /// `None` when the viewer may not know it.
    pub role: Option<PawnRole>,
    pub revealed: bool,
    pub frozen: bool,
    pub checkpoint_reached: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingView {
    pub name: String,
    pub kind: FindingKind,
    pub points: u32,
    pub photographed_by: Vec<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionView {
    pub location: Location,
    pub finding_slot: bool,
    pub pawns: Vec<PawnView>,
    pub finding: Option<FindingView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathView {
    pub id: PathId,
    pub name: String,
    /// Value of the last Number card accepted on this path.
    pub last_number: Option<u8>,
    pub positions: Vec<PositionView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub hand_size: usize,
    /// `None` for an opponent's hand.
    pub hand: Option<Vec<Card>>,
    pub findings: Vec<CollectedFinding>,
    pub played_card_this_turn: bool,
}

/// Everything a display needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub turn: u32,
    pub deck_remaining: usize,
    /// Whose eyes this snapshot is for; `None` is omniscient.
    pub viewer: Option<PlayerId>,
    pub paths: Vec<PathView>,
    pub players: Vec<PlayerView>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(
        board: &Board,
        players: &PlayerMap<Player>,
        deck_remaining: usize,
        phase: Phase,
        turn: u32,
        viewer: Option<PlayerId>,
    ) -> Self {
        Self {
            phase,
            turn,
            deck_remaining,
            viewer,
            paths: board
                .paths()
                .iter()
                .map(|p| path_view(board, p, viewer))
                .collect(),
            players: players.values().map(|p| player_view(p, viewer)).collect(),
        }
    }

    /// Every pawn in the snapshot, in path then index order.
    pub fn pawns(&self) -> impl Iterator<Item = &PawnView> {
        self.paths
            .iter()
            .flat_map(|p| p.positions.iter())
            .flat_map(|pos| pos.pawns.iter())
    }
}

fn can_see(viewer: Option<PlayerId>, owner: PlayerId) -> bool {
    viewer.map_or(true, |v| v == owner)
}

fn path_view(board: &Board, path: &Path, viewer: Option<PlayerId>) -> PathView {
    PathView {
        id: path.id(),
        name: path.name().to_string(),
        last_number: path.ratchet().last(),
        positions: path
            .positions()
            .iter()
            .map(|pos| position_view(board, pos, viewer))
            .collect(),
    }
}

fn position_view(board: &Board, position: &Position, viewer: Option<PlayerId>) -> PositionView {
    PositionView {
        location: position.location(),
        finding_slot: position.is_finding_slot(),
        pawns: position
            .residents()
            .iter()
            .filter_map(|&id| board.pawn(id))
            .map(|pawn| pawn_view(pawn, viewer))
            .collect(),
        finding: position.finding().map(finding_view),
    }
}

fn pawn_view(pawn: &Pawn, viewer: Option<PlayerId>) -> PawnView {
    let known = !pawn.is_hidden() || can_see(viewer, pawn.owner());
    PawnView {
        id: pawn.id(),
        role: known.then(|| pawn.role()),
        revealed: !pawn.is_hidden(),
        frozen: known && pawn.is_frozen(),
        checkpoint_reached: pawn.checkpoint_reached(),
    }
}

fn finding_view(finding: &Finding) -> FindingView {
    let mut photographed_by: Vec<PlayerId> = finding.photographers().collect();
    photographed_by.sort();
    FindingView {
        name: finding.name().to_string(),
        kind: finding.kind(),
        points: finding.points(),
        photographed_by,
    }
}

fn player_view(player: &Player, viewer: Option<PlayerId>) -> PlayerView {
    PlayerView {
        id: player.id(),
        name: player.name().to_string(),
        score: player.score(),
        hand_size: player.hand().len(),
        hand: can_see(viewer, player.id()).then(|| player.hand().to_vec()),
        findings: player.findings().to_vec(),
        played_card_this_turn: player.played_card_this_turn(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, PLAYER_COUNT};

    fn setup() -> (Board, PlayerMap<Player>) {
        let mut board = Board::new(&EngineConfig::default());
        let knossos = PathId::new(0);
        board.place_pawn(PawnId::new(PlayerId::new(0), 3), knossos).unwrap();
        board.place_pawn(PawnId::new(PlayerId::new(1), 0), knossos).unwrap();

        let mut players = PlayerMap::new(PLAYER_COUNT, |id| Player::new(id, format!("P{}", id.0), 8));
        players[PlayerId::new(0)].replace_hand(vec![Card::number(knossos, 4)]);
        players[PlayerId::new(1)].replace_hand(vec![Card::minotaur(knossos), Card::ariadne(knossos)]);
        (board, players)
    }

    #[test]
    fn test_omniscient_snapshot() {
        let (board, players) = setup();
        let snap = GameSnapshot::capture(&board, &players, 84, Phase::Setup, 0, None);

        assert_eq!(snap.paths.len(), 4);
        assert_eq!(snap.deck_remaining, 84);
        assert!(snap.pawns().all(|p| p.role.is_some()));
        assert!(snap.players.iter().all(|p| p.hand.is_some()));
    }

    #[test]
    fn test_viewer_hides_opponent() {
        let (board, players) = setup();
        let viewer = PlayerId::new(0);
        let snap = GameSnapshot::capture(&board, &players, 84, Phase::Setup, 0, Some(viewer));

        let pawns: Vec<_> = snap.pawns().collect();
        assert_eq!(pawns.len(), 2);
        let own = pawns.iter().find(|p| p.id.owner == viewer).unwrap();
        let theirs = pawns.iter().find(|p| p.id.owner != viewer).unwrap();
        assert_eq!(own.role, Some(PawnRole::Hero));
        assert_eq!(theirs.role, None);

        assert_eq!(snap.players[0].hand.as_ref().map(Vec::len), Some(1));
        assert_eq!(snap.players[1].hand, None);
        assert_eq!(snap.players[1].hand_size, 2);
    }

    #[test]
    fn test_revealed_pawn_visible_to_all() {
        let (mut board, players) = setup();
        board.reveal(PawnId::new(PlayerId::new(1), 0));
        let snap = GameSnapshot::capture(&board, &players, 84, Phase::Setup, 0, Some(PlayerId::new(0)));

        let theirs = snap.pawns().find(|p| p.id.owner == PlayerId::new(1)).unwrap();
        assert_eq!(theirs.role, Some(PawnRole::Archaeologist));
        assert!(theirs.revealed);
    }

    #[test]
    fn test_snapshot_serializes() {
        let (board, players) = setup();
        let snap = GameSnapshot::capture(&board, &players, 84, Phase::Setup, 0, Some(PlayerId::new(1)));
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
