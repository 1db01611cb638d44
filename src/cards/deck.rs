//! The shared draw pile.
//!
//! Built once from the catalog, shuffled once, then only drawn from. The
//! top of the deck is the end of the backing `Vec`.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A deck in the given order; the last card is drawn first.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// A deck shuffled with `rng`.
    #[must_use]
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PathId;

    fn cards(n: u8) -> Vec<Card> {
        (1..=n).map(|v| Card::number(PathId::new(0), v)).collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = Deck::from_cards(cards(3));
        assert_eq!(deck.peek(), Some(&Card::number(PathId::new(0), 3)));
        assert_eq!(deck.draw(), Some(Card::number(PathId::new(0), 3)));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_draw_until_empty() {
        let mut deck = Deck::from_cards(cards(2));
        assert!(deck.draw().is_some());
        assert!(deck.draw().is_some());
        assert!(deck.draw().is_none());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = Deck::shuffled(cards(30), &mut GameRng::new(5));
        let b = Deck::shuffled(cards(30), &mut GameRng::new(5));
        let c = Deck::shuffled(cards(30), &mut GameRng::new(6));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 30);
    }
}
