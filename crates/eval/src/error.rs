// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use thiserror::Error;

/// Error returned when a hand cannot be made from the given cards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A hand must have exactly five cards.
    #[error("a hand needs 5 cards, got {0}")]
    HandSize(usize),
    /// Not enough cards to make a hand.
    #[error("not enough cards, need {needed} got {got}")]
    NotEnoughCards {
        /// Cards needed.
        needed: usize,
        /// Cards available.
        got: usize,
    },
    /// A rule needs an exact number of hole or board cards.
    #[error("expected {expected} {what} cards, got {got}")]
    CardCount {
        /// Either hole or board.
        what: &'static str,
        /// Cards expected.
        expected: usize,
        /// Cards given.
        got: usize,
    },
    /// The rule doesn't pick five cards.
    #[error("invalid rule {hole} hole + {board} board cards, must add up to 5")]
    InvalidRule {
        /// Hole cards to use.
        hole: usize,
        /// Board cards to use.
        board: usize,
    },
}
