//! Player identification, per-player storage, and player records.
//!
//! ## PlayerId
//!
//! The rule set is strictly two-player, so `PlayerId` is `0` or `1` and
//! `PlayerId::opponent` flips between them.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! Name, hand, score, collected findings and the "played a card this turn"
//! flag that gates the Ariadne card.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::ActionError;
use crate::cards::{Card, Deck};
use crate::findings::CollectedFinding;

/// Number of seats in the rule set.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier. Indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat in a two-player game.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    ///
    /// ```
    /// use minoan_paths::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use minoan_paths::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// score[PlayerId::new(1)] += 25;
/// assert_eq!(score[PlayerId::new(1)], 25);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Map every entry into a new PlayerMap.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.iter().map(|(p, v)| f(p, v)).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seated player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Vec<Card>,
    hand_limit: usize,
    score: u32,
    findings: Vec<CollectedFinding>,
    played_card_this_turn: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, hand_limit: usize) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            hand_limit,
            score: 0,
            findings: Vec::new(),
            played_card_this_turn: false,
        }
    }

    /// Seat of this player.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards in hand, in draw order.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Most cards the hand may hold.
    #[must_use]
    pub fn hand_limit(&self) -> usize {
        self.hand_limit
    }

    /// Points collected so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Findings collected or photographed, in collection order.
    #[must_use]
    pub fn findings(&self) -> &[CollectedFinding] {
        &self.findings
    }

    /// Whether a card has been played (not discarded) this turn.
    #[must_use]
    pub fn played_card_this_turn(&self) -> bool {
        self.played_card_this_turn
    }

    pub(crate) fn set_played_card_this_turn(&mut self, played: bool) {
        self.played_card_this_turn = played;
    }

    /// Look at a card in hand.
    pub fn card(&self, index: usize) -> Result<&Card, ActionError> {
        self.hand.get(index).ok_or(ActionError::InvalidCardIndex {
            index,
            hand_size: self.hand.len(),
        })
    }

    /// Remove a card from hand.
    pub(crate) fn take_card(&mut self, index: usize) -> Result<Card, ActionError> {
        if index >= self.hand.len() {
            return Err(ActionError::InvalidCardIndex {
                index,
                hand_size: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    /// Draw the top card of `deck` into hand.
    ///
    /// Returns `None` when the hand is at its limit or the deck is empty; in
    /// both cases nothing moves.
    pub(crate) fn draw_from(&mut self, deck: &mut Deck) -> Option<Card> {
        if self.hand.len() >= self.hand_limit {
            return None;
        }
        let card = deck.draw()?;
        self.hand.push(card);
        Some(card)
    }

    /// Record a finding and credit its points. The score saturates.
    pub(crate) fn collect(&mut self, finding: CollectedFinding) {
        self.score = self.score.saturating_add(finding.points);
        self.findings.push(finding);
    }

    #[cfg(test)]
    pub(crate) fn replace_hand(&mut self, hand: Vec<Card>) {
        self.hand = hand;
    }
}
