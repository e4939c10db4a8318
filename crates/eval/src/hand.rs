// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand classification and ordering.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use freeroll_cards::{Card, Rank};

use crate::EvalError;

/// The hand rank category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{s}")
    }
}

/// A classified five cards hand.
///
/// The cards are kept in a canonical order where the cards that make pairs,
/// trips, or quads come last, the most significant group at the end, so that
/// two hands with the same rank compare card by card from the last to the
/// first. In the A-2-3-4-5 straight the ace is moved to the front as it plays
/// low.
///
/// Two hands compare equal if they tie, suits are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hand {
    cards: [Card; 5],
    rank: HandRank,
}

impl Hand {
    /// Classifies five cards.
    pub fn new(mut cards: [Card; 5]) -> Self {
        cards.sort_by_key(|c| c.rank());

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let is_wheel = cards.map(|c| c.rank())
            == [Rank::Deuce, Rank::Trey, Rank::Four, Rank::Five, Rank::Ace];
        let is_straight = is_wheel
            || cards
                .windows(2)
                .all(|w| w[0].value() + 1 == w[1].value());

        if is_wheel {
            cards.rotate_right(1);
        }

        let rank = match (is_straight, is_flush) {
            (true, true) => HandRank::StraightFlush,
            (false, true) => HandRank::Flush,
            (true, false) => HandRank::Straight,
            (false, false) => {
                let groups = duplicates(&cards);
                let rank = match groups.as_slice() {
                    [] => HandRank::HighCard,
                    [(_, 4)] => HandRank::FourOfAKind,
                    [(_, 3)] => HandRank::ThreeOfAKind,
                    [_] => HandRank::Pair,
                    [_, (_, 3)] => HandRank::FullHouse,
                    _ => HandRank::TwoPair,
                };

                cards = move_duplicates_last(cards, &groups);
                rank
            }
        };

        Self { cards, rank }
    }

    /// The hand rank category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The hand cards in canonical order.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    fn top(&self, idx: usize) -> Rank {
        self.cards[idx].rank()
    }
}

/// Returns the rank and size of each group of cards with the same rank in
/// ascending rank order, if there are two groups the larger goes last.
fn duplicates(cards: &[Card; 5]) -> Vec<(Rank, usize)> {
    let mut groups = cards
        .chunk_by(|a, b| a.rank() == b.rank())
        .filter(|g| g.len() > 1)
        .map(|g| (g[0].rank(), g.len()))
        .collect::<Vec<_>>();

    if let [first, second] = groups.as_mut_slice() {
        if first.1 > second.1 {
            std::mem::swap(first, second);
        }
    }

    groups
}

fn move_duplicates_last(cards: [Card; 5], groups: &[(Rank, usize)]) -> [Card; 5] {
    let is_dup = |c: &&Card| groups.iter().any(|(r, _)| *r == c.rank());

    let kickers = cards.iter().filter(|c| !is_dup(c));
    let dups = groups
        .iter()
        .flat_map(|(r, _)| cards.iter().filter(move |c| c.rank() == *r));

    let mut ordered = cards;
    for (slot, card) in ordered.iter_mut().zip(kickers.chain(dups)) {
        *slot = *card;
    }

    ordered
}

impl TryFrom<&[Card]> for Hand {
    type Error = EvalError;

    fn try_from(cards: &[Card]) -> Result<Self, Self::Error> {
        let cards = <[Card; 5]>::try_from(cards).map_err(|_| EvalError::HandSize(cards.len()))?;
        Ok(Hand::new(cards))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| {
            self.cards
                .iter()
                .rev()
                .map(|c| c.rank())
                .cmp(other.cards.iter().rev().map(|c| c.rank()))
        })
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hand {}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let high = self.top(4);
        match self.rank {
            HandRank::HighCard => write!(f, "{} high", high.name()),
            HandRank::Pair => write!(f, "pair of {}", high.plural()),
            HandRank::TwoPair => {
                write!(f, "two pair, {} and {}", high.plural(), self.top(2).plural())
            }
            HandRank::ThreeOfAKind => write!(f, "three of a kind, {}", high.plural()),
            HandRank::Straight => write!(f, "{}-high straight", high.name()),
            HandRank::Flush => write!(f, "{}-high flush", high.name()),
            HandRank::FullHouse => {
                write!(f, "full house, {} over {}", high.plural(), self.top(1).plural())
            }
            HandRank::FourOfAKind => write!(f, "four of a kind, {}", high.plural()),
            HandRank::StraightFlush if high == Rank::Ace => write!(f, "royal flush"),
            HandRank::StraightFlush => write!(f, "{}-high straight flush", high.name()),
        }
    }
}
