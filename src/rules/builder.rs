//! Game construction.
//!
//! `GameBuilder` validates the configuration, resolves both catalogs
//! against the board's path names and runs the randomised setup steps in a
//! fixed order, each on its own RNG stream:
//!
//! 1. shuffle the deck (`DECK_STREAM`)
//! 2. pin rare findings, scatter the rest, reshuffle per path (`FINDINGS_STREAM`)
//! 3. deal opening hands alternately
//! 4. pick the first player (`TURN_ORDER_STREAM`)

use crate::board::Board;
use crate::cards::{resolve_cards, standard_cards, CardRecord, Deck};
use crate::core::{
    EngineConfig, GameRng, Player, PlayerId, PlayerMap, SetupError, DECK_STREAM, FINDINGS_STREAM,
    PLAYER_COUNT, TURN_ORDER_STREAM,
};
use crate::findings::{resolve_findings, standard_findings, FindingRecord};

use super::engine::TurnEngine;

/// Builder for creating a `TurnEngine`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    config: EngineConfig,
    player_names: [String; PLAYER_COUNT],
    cards: Option<Vec<CardRecord>>,
    findings: Option<Vec<FindingRecord>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            cards: None,
            findings: None,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    /// Use this card catalog instead of the standard one.
    pub fn cards(mut self, records: Vec<CardRecord>) -> Self {
        self.cards = Some(records);
        self
    }

    /// Use this finding catalog instead of the standard one.
    pub fn findings(mut self, records: Vec<FindingRecord>) -> Self {
        self.findings = Some(records);
        self
    }

    /// Build the engine, ready for starting pawns to be placed.
    pub fn build(self) -> Result<TurnEngine, SetupError> {
        let config = self.config;
        config.validate()?;

        let mut board = Board::new(&config);
        let card_records = self
            .cards
            .unwrap_or_else(|| standard_cards(config.path_names.as_slice()));
        let finding_records = self.findings.unwrap_or_else(standard_findings);

        let cards = resolve_cards(&card_records, |name| board.path_id(name))?;
        let findings = resolve_findings(&finding_records, |name| board.path_id(name))?;

        let rng = GameRng::new(config.seed);
        let mut deck = Deck::shuffled(cards, &mut rng.for_context(DECK_STREAM));
        board.distribute_findings(findings, &mut rng.for_context(FINDINGS_STREAM))?;

        let names = self.player_names;
        let mut players = PlayerMap::new(PLAYER_COUNT, |id| {
            Player::new(id, names[id.index()].clone(), config.hand_size)
        });
        for _ in 0..config.hand_size {
            for id in PlayerId::both() {
                players[id].draw_from(&mut deck);
            }
        }

        let first = PlayerId::new(rng.for_context(TURN_ORDER_STREAM).gen_index(PLAYER_COUNT) as u8);

        tracing::info!(
            seed = rng.seed(),
            deck = deck.len(),
            findings = board.findings().count(),
            %first,
            "game set up"
        );
        Ok(TurnEngine::new(config, board, deck, players, first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::FindingKind;
    use crate::rules::Phase;

    #[test]
    fn test_standard_setup() {
        let engine = GameBuilder::new().seed(42).build().unwrap();

        assert_eq!(engine.phase(), Phase::Setup);
        assert_eq!(engine.deck_len(), 100 - 16);
        for id in PlayerId::both() {
            assert_eq!(engine.player(id).hand().len(), 8);
            assert_eq!(engine.player(id).score(), 0);
        }
        assert_eq!(engine.board().findings().count(), 20);
    }

    #[test]
    fn test_rare_findings_stay_home() {
        let engine = GameBuilder::new().seed(7).build().unwrap();
        let board = engine.board();

        for (location, finding) in board.findings() {
            assert!(board.position(location).unwrap().is_finding_slot());
            if finding.kind() == FindingKind::Rare {
                assert_eq!(finding.home_path(), Some(location.path));
            }
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameBuilder::new().seed(99).build().unwrap();
        let b = GameBuilder::new().seed(99).build().unwrap();

        assert_eq!(a.first_player(), b.first_player());
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_unknown_palace_in_catalog() {
        let result = GameBuilder::new()
            .cards(vec![CardRecord::number("Atlantis", 3)])
            .build();
        assert!(matches!(result, Err(SetupError::UnknownPalace(name)) if name == "Atlantis"));
    }

    #[test]
    fn test_invalid_config() {
        let result = GameBuilder::new()
            .config(EngineConfig::default().with_hand_size(0))
            .build();
        assert!(matches!(result, Err(SetupError::InvalidConfig(_))));
    }

    /// Test an absurd hand size is refused instead of allocated.
    #[test]
    fn test_oversized_hand_is_rejected() {
        let result = GameBuilder::new()
            .config(EngineConfig::default().with_hand_size(usize::MAX))
            .build();
        assert!(matches!(result, Err(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn test_small_deck_is_dealt_out() {
        let cards = std::iter::repeat_with(|| CardRecord::number("Knossos", 1)).take(10).collect();
        let engine = GameBuilder::new().cards(cards).build().unwrap();

        assert_eq!(engine.deck_len(), 0);
        assert_eq!(engine.player(PlayerId::new(0)).hand().len(), 5);
        assert_eq!(engine.player(PlayerId::new(1)).hand().len(), 5);
    }

    #[test]
    fn test_player_names() {
        let engine = GameBuilder::new().player_names("Ariadne", "Theseus").build().unwrap();
        assert_eq!(engine.player(PlayerId::new(1)).name(), "Theseus");
    }
}
