// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use freeroll_eval::EvalError;

use crate::Chips;

/// A rejected game action, the error message is meant for the players.
///
/// A rejected action never changes the game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A game is in progress.
    #[error("A game is already in progress!")]
    GameInProgress,
    /// There is no game.
    #[error("No game in progress!")]
    NoGame,
    /// The game is not accepting players.
    #[error("No game is waiting for players!")]
    NotWaiting,
    /// The game has already started.
    #[error("No game is waiting to start!")]
    NotStarting,
    /// Betting action with no hand.
    #[error("No hand in progress!")]
    NoHand,
    /// A hand is being played.
    #[error("Can only change the game between hands!")]
    HandInProgress,
    /// Hands cannot be dealt in this state.
    #[error("Cannot deal now!")]
    CannotDeal,
    /// Action by a player who is not the current player.
    #[error("It's not your turn!")]
    NotYourTurn,
    /// Duplicate join.
    #[error("You have already joined the game!")]
    AlreadyJoined,
    /// Action by someone who is not playing.
    #[error("You are not in the game!")]
    NotAPlayer,
    /// Buy in below the minimum.
    #[error("You must buy in for at least ${0}!")]
    BuyInTooLow(Chips),
    /// Buy in above the maximum.
    #[error("You can't buy in for more than ${0}!")]
    BuyInTooHigh(Chips),
    /// Check with a bet to call.
    #[error("You can't check, the current bet to meet is ${0}!")]
    CannotCheck(Chips),
    /// Raise of zero chips.
    #[error("You must raise by more than $0!")]
    ZeroRaise,
    /// Raise above the player chips.
    #[error("You can raise by at most ${0}, message !allin to go all in.")]
    RaiseTooHigh(Chips),
    /// A number that cannot be parsed.
    #[error("Invalid amount!")]
    InvalidAmount,
    /// Unknown option name.
    #[error("Invalid option! Use sb, bb, min, max, or delay")]
    InvalidOption,
    /// Option value out of range.
    #[error("{0}")]
    InvalidOptionValue(&'static str),
    /// Unknown game variant.
    #[error("Invalid game type! Use holdem or omaha")]
    InvalidVariant,
    /// The game has no players.
    #[error("No players in the game!")]
    NoPlayers,
    /// Too few players to deal.
    #[error("Need at least 2 players to start!")]
    NotEnoughPlayers,
    /// Too many players for the deck.
    #[error("Not enough cards in the deck for {0} players!")]
    DeckExhausted(usize),
    /// Hand evaluation failed.
    #[error("Hand evaluation failed: {0}")]
    Eval(#[from] EvalError),
}
