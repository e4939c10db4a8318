// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best hand selection rules.
use serde::{Deserialize, Serialize};
use std::fmt;

use freeroll_cards::{Card, combinations};

use crate::{EvalError, Hand};

/// How a player makes a five cards hand out of the board and hole cards.
///
/// Selection is exhaustive, every legal five cards subset is classified and
/// the best one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandRule {
    /// Any five cards from the board and the hole cards.
    TexasHoldem,
    /// Exactly two of the four hole cards and three of the five board cards.
    Omaha,
    /// Exactly `hole` hole cards and `board` board cards.
    Exact {
        /// Number of hole cards to use.
        hole: usize,
        /// Number of board cards to use.
        board: usize,
    },
}

impl HandRule {
    /// Returns the best hand for the given board and hole cards.
    pub fn best_hand(&self, board: &[Card], hole: &[Card]) -> Result<Hand, EvalError> {
        match *self {
            HandRule::TexasHoldem => {
                let cards = board.iter().chain(hole).copied().collect::<Vec<_>>();
                if cards.len() < 5 {
                    return Err(EvalError::NotEnoughCards {
                        needed: 5,
                        got: cards.len(),
                    });
                }

                best_of(combinations(&cards, 5).map(|c| Hand::try_from(c.as_slice())))
            }
            HandRule::Omaha => {
                if hole.len() != 4 {
                    return Err(EvalError::CardCount {
                        what: "hole",
                        expected: 4,
                        got: hole.len(),
                    });
                }

                if board.len() != 5 {
                    return Err(EvalError::CardCount {
                        what: "board",
                        expected: 5,
                        got: board.len(),
                    });
                }

                best_exact(board, hole, 2, 3)
            }
            HandRule::Exact {
                hole: num_hole,
                board: num_board,
            } => {
                if num_hole + num_board != 5 {
                    return Err(EvalError::InvalidRule {
                        hole: num_hole,
                        board: num_board,
                    });
                }

                if hole.len() < num_hole {
                    return Err(EvalError::NotEnoughCards {
                        needed: num_hole,
                        got: hole.len(),
                    });
                }

                if board.len() < num_board {
                    return Err(EvalError::NotEnoughCards {
                        needed: num_board,
                        got: board.len(),
                    });
                }

                best_exact(board, hole, num_hole, num_board)
            }
        }
    }
}

fn best_exact(
    board: &[Card],
    hole: &[Card],
    num_hole: usize,
    num_board: usize,
) -> Result<Hand, EvalError> {
    let board_subsets = combinations(board, num_board);
    let hands = combinations(hole, num_hole).flat_map(|hole_cards| {
        board_subsets.clone().map(move |board_cards| {
            let mut cards = hole_cards.clone();
            cards.extend(board_cards);
            Hand::try_from(cards.as_slice())
        })
    });

    best_of(hands)
}

fn best_of<I>(hands: I) -> Result<Hand, EvalError>
where
    I: Iterator<Item = Result<Hand, EvalError>>,
{
    let mut best: Option<Hand> = None;
    for hand in hands {
        let hand = hand?;
        if best.is_none_or(|b| b < hand) {
            best = Some(hand);
        }
    }

    best.ok_or(EvalError::NotEnoughCards { needed: 5, got: 0 })
}

impl fmt::Display for HandRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandRule::TexasHoldem => write!(f, "Texas Hold'em"),
            HandRule::Omaha => write!(f, "Omaha"),
            HandRule::Exact { hole, board } => write!(f, "{hole} hole + {board} board"),
        }
    }
}
