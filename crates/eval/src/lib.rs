// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Freeroll Poker hand evaluator.
//!
//! A [Hand] classifies five cards into a [HandRank] and orders hands so that
//! comparing two hands tells which one wins, equal hands split the pot:
//!
//! ```
//! # use freeroll_eval::*;
//! let cards = |s: &str| {
//!     s.split_whitespace()
//!         .map(|c| c.parse::<Card>().unwrap())
//!         .collect::<Vec<_>>()
//! };
//!
//! let flush = Hand::try_from(cards("Js 9s 7s 4s 2s").as_slice()).unwrap();
//! let straight = Hand::try_from(cards("As 2d 3c 4h 5s").as_slice()).unwrap();
//! assert!(flush > straight);
//! assert_eq!(straight.to_string(), "five-high straight");
//! ```
//!
//! A [HandRule] picks the best hand a player can make with the board and
//! hole cards by checking all the legal five cards subsets:
//!
//! ```
//! # use freeroll_eval::*;
//! # let cards = |s: &str| {
//! #     s.split_whitespace()
//! #         .map(|c| c.parse::<Card>().unwrap())
//! #         .collect::<Vec<_>>()
//! # };
//! let board = cards("As Ah Ad Kc Qs");
//! let hand = HandRule::Omaha.best_hand(&board, &cards("2s 3h 5d 5c")).unwrap();
//! assert_eq!(hand.rank(), HandRank::FullHouse);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod error;
pub use error::EvalError;

mod hand;
pub use hand::{Hand, HandRank};

mod rule;
pub use rule::HandRule;

// Reexport cards types.
pub use freeroll_cards::{Card, Deck, Rank, Suit};
