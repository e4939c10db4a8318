// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use freeroll_cards::Card;

use crate::Chips;

/// An opaque player identifier supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player identifier.
    pub id: PlayerId,
    /// The player display name.
    pub name: String,
    /// The chips that are not in a pot.
    pub balance: Chips,
    /// The player hole cards.
    pub cards: Vec<Card>,
    /// The player bet in this betting round.
    pub bet: Chips,
    /// The player has acted in this betting round.
    pub has_acted: bool,
    /// The chips put in the pots in this hand.
    pub committed: Chips,
    /// Chips bought during a hand, added to the balance when the hand ends.
    pub top_up: Chips,
}

impl Player {
    /// Creates a new player.
    pub fn new(id: PlayerId, name: impl Into<String>, balance: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            cards: Vec::default(),
            bet: Chips::ZERO,
            has_acted: false,
            committed: Chips::ZERO,
            top_up: Chips::ZERO,
        }
    }

    /// The largest bet this player can make in this betting round.
    pub fn max_bet(&self) -> Chips {
        self.bet + self.balance
    }

    /// The player has no chips left to bet.
    pub fn is_all_in(&self) -> bool {
        self.balance == Chips::ZERO
    }

    /// Raises this player bet to the given amount or to all in if the player
    /// doesn't have enough chips, returns the chips moved from the balance.
    pub fn bet_to(&mut self, amount: Chips) -> Chips {
        let chips = (amount - self.bet).min(self.balance);
        self.balance -= chips;
        self.bet += chips;
        self.committed += chips;
        chips
    }

    /// Resets the betting state for a new round.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.has_acted = false;
    }

    /// Resets the player state for a new hand.
    pub(crate) fn start_hand(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.committed = Chips::ZERO;
        self.start_round();
    }

    /// Clears the hand state and credits any pending top up, returns the
    /// credited chips.
    pub(crate) fn end_hand(&mut self) -> Chips {
        self.start_round();
        self.committed = Chips::ZERO;

        let top_up = self.top_up;
        self.balance += top_up;
        self.top_up = Chips::ZERO;
        top_up
    }
}
