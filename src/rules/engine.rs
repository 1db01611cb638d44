//! The turn engine.
//!
//! `TurnEngine` is a synchronous state machine. It suspends in
//! `Phase::AwaitingAction(player)` and resumes only when that player submits
//! an intent; every accepted intent runs to completion, including its
//! replacement draw, before the call returns.
//!
//! ## Phases
//!
//! - `Setup`: both players place their pawns with `place_starting_pawn`.
//! - `AwaitingAction(p)`: `p` plays or discards one card, ending the turn.
//!   Opening a box or destroying one are free actions and do not.
//! - `GameOver(result)`: entered once the deck is empty or any pawn sits on
//!   the checkpoint. Every intent is rejected from here on.
//!
//! ## Rejections
//!
//! A rejected intent returns `Err` and changes nothing, so it is safe to
//! retry or to try a different card. The one exception is a frozen hero:
//! a blocked move on it still uses up the freeze.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::resolution;
use crate::board::{Board, Location};
use crate::cards::Deck;
use crate::core::{ActionError, EngineConfig, GameSnapshot, Player, PlayerId, PlayerMap};
use crate::events::{EventRecord, GameEvent};
use crate::findings::Claim;
use crate::pawns::{Pawn, PawnId, PawnRole};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Strictly higher score.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Decide the result from final scores.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let best = scores.values().max().copied().unwrap_or_default();
        let mut leaders = scores.iter().filter(|(_, &s)| s == best).map(|(p, _)| p);
        match (leaders.next(), leaders.next()) {
            (Some(player), None) => GameResult::Winner(player),
            _ => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    /// The winning player, or `None` for a draw.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(p),
            GameResult::Draw => None,
        }
    }
}

/// Where the engine is suspended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pawns are being placed.
    Setup,
    /// Waiting for this player to play or discard.
    AwaitingAction(PlayerId),
    /// Finished; every intent is rejected.
    GameOver(GameResult),
}

impl Phase {
    /// Phase name used in rejection messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::AwaitingAction(_) => "play",
            Phase::GameOver(_) => "game over",
        }
    }

    /// Player expected to act, if any.
    #[must_use]
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            Phase::AwaitingAction(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Phase::GameOver(_))
    }
}

/// Events produced by one accepted intent, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub events: Vec<GameEvent>,
}

impl ActionOutcome {
    /// Whether the intent handed the turn on or ended the game.
    #[must_use]
    pub fn ended_turn(&self) -> bool {
        self.events.iter().any(|e| {
            matches!(e, GameEvent::TurnStarted { .. } | GameEvent::GameOver { .. })
        })
    }
}

const PLACE_PAWN: &str = "placing a pawn";
const PLAY_CARD: &str = "playing a card";
const DISCARD_CARD: &str = "discarding a card";
const OPEN_BOX: &str = "opening a box";
const DESTROY_BOX: &str = "destroying a box";

/// The game state machine.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: EngineConfig,
    board: Board,
    deck: Deck,
    players: PlayerMap<Player>,
    phase: Phase,
    first_player: PlayerId,
    /// 0 during setup, then 1 for the first turn.
    turn: u32,
    sequence: u32,
    history: Vector<EventRecord>,
}

impl TurnEngine {
    pub(crate) fn new(
        config: EngineConfig,
        board: Board,
        deck: Deck,
        players: PlayerMap<Player>,
        first_player: PlayerId,
    ) -> Self {
        Self {
            config,
            board,
            deck,
            players,
            phase: Phase::Setup,
            first_player,
            turn: 0,
            sequence: 0,
            history: Vector::new(),
        }
    }

    // === Queries ===

    /// Configuration the game was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn it is, if play is under way.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase.active_player()
    }

    /// Player who took the first turn.
    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    /// Current turn number.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The board, with every pawn and finding.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// One player, with hand and score.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Both players.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Cards left to draw.
    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Current score of each player.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.players.map(|_, p| p.score())
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Final result once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    /// The winner, or `None` for a draw.
    ///
    /// # Panics
    ///
    /// Panics if the game is not over yet.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver(result) => result.winner(),
            phase => panic!("winner requested during {}", phase.name()),
        }
    }

    /// Every event so far. Cheap to clone.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Omniscient snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.capture(None)
    }

    /// Snapshot as seen by `viewer`.
    #[must_use]
    pub fn snapshot_for(&self, viewer: PlayerId) -> GameSnapshot {
        self.capture(Some(viewer))
    }

    fn capture(&self, viewer: Option<PlayerId>) -> GameSnapshot {
        GameSnapshot::capture(
            &self.board,
            &self.players,
            self.deck.len(),
            self.phase,
            self.turn,
            viewer,
        )
    }

    /// Hand indices of the cards `player` could play right now. A legal
    /// card may still be refused if its move would overshoot or is blocked.
    #[must_use]
    pub fn playable_cards(&self, player: PlayerId) -> Vec<usize> {
        if self.active_player() != Some(player) {
            return Vec::new();
        }
        let hand = &self.players[player];
        hand.hand()
            .iter()
            .enumerate()
            .filter(|(_, &card)| {
                resolution::evaluate(card, player, hand.played_card_this_turn(), &self.board)
                    .is_ok()
            })
            .map(|(i, _)| i)
            .collect()
    }

    // === Intents ===

    /// Put one of `player`'s pawns on the first position of `path_name`.
    pub fn place_starting_pawn(
        &mut self,
        player: PlayerId,
        pawn: PawnId,
        path_name: &str,
    ) -> Result<ActionOutcome, ActionError> {
        let result = self.try_place_starting_pawn(player, pawn, path_name);
        log_rejection(player, PLACE_PAWN, result)
    }

    /// Play the card at `index` in `player`'s hand. Ends the turn.
    pub fn play_card(&mut self, player: PlayerId, index: usize) -> Result<ActionOutcome, ActionError> {
        let result = self.try_play_card(player, index);
        log_rejection(player, PLAY_CARD, result)
    }

    /// Discard the card at `index` in `player`'s hand. Ends the turn.
    pub fn discard_card(
        &mut self,
        player: PlayerId,
        index: usize,
    ) -> Result<ActionOutcome, ActionError> {
        let result = self.try_discard_card(player, index);
        log_rejection(player, DISCARD_CARD, result)
    }

    /// Collect the finding under one of `player`'s archaeologists.
    pub fn open_box(&mut self, player: PlayerId, pawn: PawnId) -> Result<ActionOutcome, ActionError> {
        let result = self.try_open_box(player, pawn);
        log_rejection(player, OPEN_BOX, result)
    }

    /// Use the hero to destroy the finding at `target`.
    pub fn destroy_box(
        &mut self,
        player: PlayerId,
        pawn: PawnId,
        target: Location,
    ) -> Result<ActionOutcome, ActionError> {
        let result = self.try_destroy_box(player, pawn, target);
        log_rejection(player, DESTROY_BOX, result)
    }

    fn try_place_starting_pawn(
        &mut self,
        player: PlayerId,
        pawn: PawnId,
        path_name: &str,
    ) -> Result<ActionOutcome, ActionError> {
        if self.phase != Phase::Setup {
            return Err(ActionError::WrongPhase {
                action: PLACE_PAWN,
                phase: self.phase.name(),
            });
        }
        self.own_pawn(player, pawn)?;
        let path = self
            .board
            .path_id(path_name)
            .ok_or_else(|| ActionError::UnknownPath(path_name.to_string()))?;
        let location = self.board.place_pawn(pawn, path)?;

        let mut outcome = ActionOutcome::default();
        self.emit(&mut outcome, GameEvent::PawnPlaced { pawn, location });
        tracing::debug!(%pawn, %location, "pawn placed");

        if self.board.all_pawns_placed() {
            self.start_turn(self.first_player, &mut outcome);
        }
        Ok(outcome)
    }

    fn try_play_card(&mut self, player: PlayerId, index: usize) -> Result<ActionOutcome, ActionError> {
        self.ensure_active(player, PLAY_CARD)?;
        let hand = &self.players[player];
        let card = *hand.card(index)?;
        let effect =
            resolution::evaluate(card, player, hand.played_card_this_turn(), &self.board)?;

        let effect_events = match resolution::apply(effect, &mut self.board) {
            Ok(events) => events,
            Err(ActionError::PawnFrozen(pawn)) => {
                // The blocked attempt used up the freeze.
                self.record(GameEvent::FreezeLifted { pawn });
                return Err(ActionError::PawnFrozen(pawn));
            }
            Err(err) => return Err(err),
        };

        let mut outcome = ActionOutcome::default();
        let card = self.players[player].take_card(index)?;
        self.players[player].set_played_card_this_turn(true);
        self.emit(&mut outcome, GameEvent::CardPlayed { player, card });
        for event in effect_events {
            self.emit(&mut outcome, event);
        }
        tracing::debug!(%player, %card, pawn = %effect.pawn(), "card played");

        self.draw_replacement(player, &mut outcome);
        self.end_turn(player, &mut outcome);
        Ok(outcome)
    }

    fn try_discard_card(
        &mut self,
        player: PlayerId,
        index: usize,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_active(player, DISCARD_CARD)?;
        let card = self.players[player].take_card(index)?;

        let mut outcome = ActionOutcome::default();
        self.emit(&mut outcome, GameEvent::CardDiscarded { player, card });
        tracing::debug!(%player, %card, "card discarded");

        self.draw_replacement(player, &mut outcome);
        self.end_turn(player, &mut outcome);
        Ok(outcome)
    }

    fn try_open_box(&mut self, player: PlayerId, pawn: PawnId) -> Result<ActionOutcome, ActionError> {
        self.ensure_active(player, OPEN_BOX)?;
        let location = self.placed_pawn_of_role(player, pawn, PawnRole::Archaeologist)?;

        let finding = self
            .board
            .finding_mut(location)
            .ok_or(ActionError::NoFinding(location))?;
        let (collected, claim) = finding.claim(player, location)?;
        if claim == Claim::Remove {
            self.board.take_finding(location);
        }
        self.players[player].collect(collected.clone());

        let mut outcome = ActionOutcome::default();
        tracing::debug!(%player, finding = %collected.name, points = collected.points, "finding collected");
        self.emit(
            &mut outcome,
            GameEvent::FindingCollected {
                player,
                pawn,
                location,
                finding: collected,
            },
        );
        if self.board.reveal(pawn) {
            self.emit(&mut outcome, GameEvent::PawnRevealed { pawn });
        }
        Ok(outcome)
    }

    fn try_destroy_box(
        &mut self,
        player: PlayerId,
        pawn: PawnId,
        target: Location,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_active(player, DESTROY_BOX)?;
        self.placed_pawn_of_role(player, pawn, PawnRole::Hero)?;

        if self.board.require_position(target)?.finding().is_none() {
            return Err(ActionError::NoFinding(target));
        }
        self.board.spend_destroy(pawn)?;
        let name = self
            .board
            .take_finding(target)
            .map(|f| f.name().to_string())
            .unwrap_or_default();

        let mut outcome = ActionOutcome::default();
        tracing::debug!(%player, finding = %name, %target, "finding destroyed");
        self.emit(
            &mut outcome,
            GameEvent::FindingDestroyed {
                pawn,
                location: target,
                name,
            },
        );
        if self.board.reveal(pawn) {
            self.emit(&mut outcome, GameEvent::PawnRevealed { pawn });
        }
        Ok(outcome)
    }

    // === Turn flow ===

    fn ensure_active(&self, player: PlayerId, action: &'static str) -> Result<(), ActionError> {
        match self.phase {
            Phase::AwaitingAction(active) if active == player => Ok(()),
            Phase::AwaitingAction(_) => Err(ActionError::NotYourTurn(player)),
            phase => Err(ActionError::WrongPhase {
                action,
                phase: phase.name(),
            }),
        }
    }

    fn own_pawn(&self, player: PlayerId, id: PawnId) -> Result<&Pawn, ActionError> {
        let pawn = self.board.require_pawn(id)?;
        if pawn.owner() != player {
            return Err(ActionError::NotYourPawn { pawn: id, player });
        }
        Ok(pawn)
    }

    /// Location of one of `player`'s pawns, which must have `role`.
    fn placed_pawn_of_role(
        &self,
        player: PlayerId,
        id: PawnId,
        role: PawnRole,
    ) -> Result<Location, ActionError> {
        let pawn = self.own_pawn(player, id)?;
        if pawn.role() != role {
            return Err(ActionError::WrongPawnKind {
                pawn: id,
                expected: role.describe(),
            });
        }
        pawn.location().ok_or(ActionError::PawnNotPlaced(id))
    }

    fn draw_replacement(&mut self, player: PlayerId, outcome: &mut ActionOutcome) {
        if let Some(card) = self.players[player].draw_from(&mut self.deck) {
            self.emit(outcome, GameEvent::CardDrawn { player, card });
            tracing::debug!(%player, remaining = self.deck.len(), "card drawn");
        }
    }

    fn end_turn(&mut self, outgoing: PlayerId, outcome: &mut ActionOutcome) {
        for pawn in self.board.thaw(outgoing) {
            self.emit(outcome, GameEvent::FreezeLifted { pawn });
        }

        if self.deck.is_empty() || self.board.any_checkpoint_reached() {
            let scores = self.scores();
            let result = GameResult::from_scores(&scores);
            self.phase = Phase::GameOver(result);
            let scores: Vec<u32> = scores.values().copied().collect();
            tracing::info!(turn = self.turn, ?result, ?scores, "game over");
            self.emit(outcome, GameEvent::GameOver { result, scores });
            return;
        }

        self.start_turn(outgoing.opponent(), outcome);
    }

    fn start_turn(&mut self, player: PlayerId, outcome: &mut ActionOutcome) {
        self.turn += 1;
        self.sequence = 0;
        self.players[player].set_played_card_this_turn(false);
        self.phase = Phase::AwaitingAction(player);
        tracing::info!(turn = self.turn, %player, "turn started");
        self.emit(
            outcome,
            GameEvent::TurnStarted {
                player,
                turn: self.turn,
            },
        );
    }

    fn emit(&mut self, outcome: &mut ActionOutcome, event: GameEvent) {
        self.record(event.clone());
        outcome.events.push(event);
    }

    fn record(&mut self, event: GameEvent) {
        self.history
            .push_back(EventRecord::new(self.turn, self.sequence, event));
        self.sequence += 1;
    }
}

fn log_rejection<T>(
    player: PlayerId,
    action: &'static str,
    result: Result<T, ActionError>,
) -> Result<T, ActionError> {
    if let Err(err) = &result {
        tracing::debug!(%player, action, kind = ?err.kind(), "rejected: {err}");
    }
    result
}

#[cfg(test)]
impl TurnEngine {
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }
}
