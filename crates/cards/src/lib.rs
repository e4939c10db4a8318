// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Freeroll Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use freeroll_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.to_string(), "♥A");
//! assert_eq!("10d".parse::<Card>().unwrap().rank(), Rank::Ten);
//! ```
//!
//! a [Deck] type for shuffling and dealing cards from the top of the deck:
//!
//! ```
//! # use freeroll_cards::Deck;
//! let mut deck = Deck::default();
//! deck.shuffle();
//!
//! let hole = deck.deal(2).unwrap();
//! assert_eq!(hole.len(), 2);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//!
//! // Not enough cards left.
//! assert!(deck.deal(51).is_none());
//! ```
//!
//! and a lazy [combinations] iterator to visit all the k-cards subsets of a
//! set of cards:
//!
//! ```
//! # use freeroll_cards::{combinations, Deck};
//! let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
//! assert_eq!(combinations(&cards, 5).count(), 21);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod combinations;
pub use combinations::{Combinations, combinations, nck};

mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
