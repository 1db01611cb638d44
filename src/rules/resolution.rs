//! Card legality and effects.
//!
//! Resolution is split in two. `evaluate` is pure: it reads the board and
//! either rejects the card or describes what it would do. `apply` performs
//! a `CardEffect` on the board and reports the resulting events. A failed
//! `apply` leaves the board as it was, apart from a frozen hero's freeze,
//! which a blocked move uses up.
//!
//! | Card       | Legal when                                         | Effect                         |
//! |------------|----------------------------------------------------|--------------------------------|
//! | Number(v)  | own pawn on the path, ratchet admits `v`           | own pawn +1, ratchet to `v`    |
//! | Ariadne    | own pawn on the path, a card already played        | own pawn +2                    |
//! | Minotaur   | opponent pawn on the path, not at the checkpoint   | knock back 2 or freeze, reveal |

use crate::board::{Board, Path};
use crate::cards::{Card, CardKind};
use crate::core::{ActionError, PlayerId};
use crate::events::GameEvent;
use crate::pawns::{PawnId, PawnRole};

pub const NUMBER_STEPS: i32 = 1;
pub const ARIADNE_STEPS: i32 = 2;
pub const MINOTAUR_KNOCKBACK: i32 = 2;

/// What an accepted card will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEffect {
    /// Move the player's own pawn forward, optionally raising the ratchet.
    Advance {
        pawn: PawnId,
        steps: i32,
        ratchet: Option<u8>,
    },
    /// Push an opponent archaeologist back and reveal it.
    KnockBack { pawn: PawnId, steps: i32 },
    /// Freeze the opponent hero and reveal it.
    Freeze { pawn: PawnId },
}

impl CardEffect {
    /// The pawn the effect acts on.
    #[must_use]
    pub fn pawn(self) -> PawnId {
        match self {
            CardEffect::Advance { pawn, .. }
            | CardEffect::KnockBack { pawn, .. }
            | CardEffect::Freeze { pawn } => pawn,
        }
    }
}

/// Decide whether `player` may play `card` and what it would do.
///
/// `played_card_this_turn` is the player's flag; it gates Ariadne.
pub fn evaluate(
    card: Card,
    player: PlayerId,
    played_card_this_turn: bool,
    board: &Board,
) -> Result<CardEffect, ActionError> {
    let path = board
        .path(card.path)
        .ok_or_else(|| ActionError::UnknownPath(card.path.to_string()))?;

    match card.kind {
        CardKind::Number(value) => {
            let pawn = own_pawn(path, player)?;
            let ratchet = path.ratchet();
            if !ratchet.admits(value) {
                return Err(ActionError::NumberTooLow {
                    path: card.path,
                    value,
                    last: ratchet.last().unwrap_or_default(),
                });
            }
            Ok(CardEffect::Advance {
                pawn,
                steps: NUMBER_STEPS,
                ratchet: Some(value),
            })
        }
        CardKind::Ariadne => {
            if !played_card_this_turn {
                return Err(ActionError::AriadneFirstCard);
            }
            let pawn = own_pawn(path, player)?;
            Ok(CardEffect::Advance {
                pawn,
                steps: ARIADNE_STEPS,
                ratchet: None,
            })
        }
        CardKind::Minotaur => {
            let target = path
                .opponent_pawn(player)
                .ok_or(ActionError::NoOpponentPawnOnPath(card.path))?;
            let pawn = board.require_pawn(target)?;
            if pawn.checkpoint_reached() {
                return Err(ActionError::TargetAtCheckpoint(target));
            }
            Ok(match pawn.role() {
                PawnRole::Archaeologist => CardEffect::KnockBack {
                    pawn: target,
                    steps: MINOTAUR_KNOCKBACK,
                },
                PawnRole::Hero => CardEffect::Freeze { pawn: target },
            })
        }
    }
}

fn own_pawn(path: &Path, player: PlayerId) -> Result<PawnId, ActionError> {
    path.player_pawn(player)
        .ok_or(ActionError::NoOwnPawnOnPath {
            player,
            path: path.id(),
        })
}

/// Carry out an evaluated effect.
pub fn apply(effect: CardEffect, board: &mut Board) -> Result<Vec<GameEvent>, ActionError> {
    let mut events = Vec::new();
    match effect {
        CardEffect::Advance {
            pawn,
            steps,
            ratchet,
        } => {
            let mv = board.move_pawn(pawn, steps)?;
            events.push(GameEvent::PawnMoved {
                pawn,
                from: mv.from,
                to: mv.to,
            });
            if let Some(value) = ratchet {
                if let Some(path) = board.path_mut(mv.to.path) {
                    path.ratchet_mut().raise(value);
                    events.push(GameEvent::RatchetRaised {
                        path: mv.to.path,
                        value,
                    });
                }
            }
        }
        CardEffect::KnockBack { pawn, steps } => {
            let mv = board.move_pawn(pawn, -steps)?;
            if mv.from != mv.to {
                events.push(GameEvent::PawnMoved {
                    pawn,
                    from: mv.from,
                    to: mv.to,
                });
            }
            if board.reveal(pawn) {
                events.push(GameEvent::PawnRevealed { pawn });
            }
        }
        CardEffect::Freeze { pawn } => {
            if board.freeze(pawn) {
                events.push(GameEvent::PawnFrozen { pawn });
            }
            if board.reveal(pawn) {
                events.push(GameEvent::PawnRevealed { pawn });
            }
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Location, PathId, Ratchet};
    use crate::core::EngineConfig;

    const MALIA: PathId = PathId::new(2);

    fn pawn(owner: u8, slot: u8) -> PawnId {
        PawnId::new(PlayerId::new(owner), slot)
    }

    fn board_with(placements: &[(PawnId, usize)]) -> Board {
        let mut board = Board::new(&EngineConfig::default());
        for &(id, index) in placements {
            board.place_pawn(id, MALIA).unwrap();
            board.move_pawn(id, index as i32 - 1).unwrap();
        }
        board
    }

    // =========================================================================
    // Legality
    // =========================================================================

    #[test]
    fn test_number_needs_own_pawn() {
        let board = board_with(&[(pawn(1, 0), 3)]);
        let err = evaluate(Card::number(MALIA, 4), PlayerId::new(0), false, &board).unwrap_err();
        assert_eq!(
            err,
            ActionError::NoOwnPawnOnPath {
                player: PlayerId::new(0),
                path: MALIA
            }
        );
    }

    #[test]
    fn test_number_respects_ratchet() {
        let mut board = board_with(&[(pawn(0, 0), 2)]);
        board.path_mut(MALIA).unwrap().ratchet_mut().raise(5);

        let low = evaluate(Card::number(MALIA, 4), PlayerId::new(0), false, &board);
        assert_eq!(
            low,
            Err(ActionError::NumberTooLow {
                path: MALIA,
                value: 4,
                last: 5
            })
        );
        let equal = evaluate(Card::number(MALIA, 5), PlayerId::new(0), false, &board);
        assert_eq!(
            equal,
            Ok(CardEffect::Advance {
                pawn: pawn(0, 0),
                steps: 1,
                ratchet: Some(5)
            })
        );
    }

    /// Test Ariadne legality depends only on the played-card flag.
    #[test]
    fn test_ariadne_gated_by_flag() {
        let board = board_with(&[(pawn(0, 1), 1)]);
        let card = Card::ariadne(MALIA);

        assert_eq!(
            evaluate(card, PlayerId::new(0), false, &board),
            Err(ActionError::AriadneFirstCard)
        );
        assert_eq!(
            evaluate(card, PlayerId::new(0), true, &board),
            Ok(CardEffect::Advance {
                pawn: pawn(0, 1),
                steps: 2,
                ratchet: None
            })
        );
    }

    #[test]
    fn test_minotaur_targets() {
        let board = board_with(&[(pawn(1, 0), 5), (pawn(0, 3), 2)]);
        let card = Card::minotaur(MALIA);

        assert_eq!(
            evaluate(card, PlayerId::new(0), false, &board),
            Ok(CardEffect::KnockBack {
                pawn: pawn(1, 0),
                steps: 2
            })
        );
        assert_eq!(
            evaluate(card, PlayerId::new(1), false, &board),
            Ok(CardEffect::Freeze { pawn: pawn(0, 3) })
        );
        assert_eq!(
            evaluate(card, PlayerId::new(1), false, &board).map(CardEffect::pawn),
            Ok(pawn(0, 3))
        );
    }

    #[test]
    fn test_minotaur_without_opponent() {
        let board = board_with(&[(pawn(0, 0), 4)]);
        assert_eq!(
            evaluate(Card::minotaur(MALIA), PlayerId::new(0), true, &board),
            Err(ActionError::NoOpponentPawnOnPath(MALIA))
        );
    }

    #[test]
    fn test_minotaur_spares_checkpoint() {
        let board = board_with(&[(pawn(1, 2), 7)]);
        assert_eq!(
            evaluate(Card::minotaur(MALIA), PlayerId::new(0), false, &board),
            Err(ActionError::TargetAtCheckpoint(pawn(1, 2)))
        );
    }

    // =========================================================================
    // Effects
    // =========================================================================

    #[test]
    fn test_apply_number_raises_ratchet() {
        let mut board = board_with(&[(pawn(0, 0), 1)]);
        let effect = evaluate(Card::number(MALIA, 6), PlayerId::new(0), false, &board).unwrap();
        let events = apply(effect, &mut board).unwrap();

        assert_eq!(board.path(MALIA).unwrap().ratchet(), Ratchet::AtLeast(6));
        assert_eq!(
            events,
            vec![
                GameEvent::PawnMoved {
                    pawn: pawn(0, 0),
                    from: Location::new(MALIA, 1),
                    to: Location::new(MALIA, 2)
                },
                GameEvent::RatchetRaised { path: MALIA, value: 6 },
            ]
        );
    }

    #[test]
    fn test_apply_overshoot_keeps_ratchet() {
        let mut board = board_with(&[(pawn(0, 0), 9)]);
        let effect = CardEffect::Advance {
            pawn: pawn(0, 0),
            steps: 1,
            ratchet: Some(8),
        };
        assert!(matches!(apply(effect, &mut board), Err(ActionError::MoveBeyondPath { .. })));
        assert_eq!(board.path(MALIA).unwrap().ratchet(), Ratchet::Unconstrained);
    }

    #[test]
    fn test_apply_knockback_reveals() {
        let mut board = board_with(&[(pawn(1, 0), 5)]);
        let effect = CardEffect::KnockBack {
            pawn: pawn(1, 0),
            steps: 2,
        };
        let events = apply(effect, &mut board).unwrap();

        let target = board.pawn(pawn(1, 0)).unwrap();
        assert_eq!(target.location(), Some(Location::new(MALIA, 3)));
        assert!(!target.is_hidden());
        assert_eq!(events.len(), 2);

        // A second hit reveals nothing new.
        let events = apply(effect, &mut board).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(board.pawn(pawn(1, 0)).unwrap().location(), Some(Location::new(MALIA, 1)));
    }

    #[test]
    fn test_apply_freeze() {
        let mut board = board_with(&[(pawn(1, 3), 4)]);
        let events = apply(CardEffect::Freeze { pawn: pawn(1, 3) }, &mut board).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::PawnFrozen { pawn: pawn(1, 3) },
                GameEvent::PawnRevealed { pawn: pawn(1, 3) },
            ]
        );
        assert!(board.pawn(pawn(1, 3)).unwrap().is_frozen());
        assert_eq!(board.pawn(pawn(1, 3)).unwrap().location(), Some(Location::new(MALIA, 4)));
    }
}
