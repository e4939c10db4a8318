// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Freeroll Poker game engine.
//!
//! A [Game] runs No-Limit Texas Hold'em or Omaha hands for a group of
//! players, each action returns the status lines to show to the players:
//!
//! ```
//! # use freeroll_core::*;
//! let mut game = Game::default();
//! game.start_new_game().unwrap();
//! game.add_player("alice", "Alice").unwrap();
//! game.add_player("bob", "Bob").unwrap();
//!
//! let msgs = game.start().unwrap();
//! assert_eq!(msgs[0], "The hands have been dealt!");
//! assert_eq!(game.pot_value(), Chips::new(3));
//!
//! // Heads up the dealer acts first and a fold ends the hand.
//! let msgs = game.fold(&"alice".into()).unwrap();
//! assert_eq!(msgs[0], "Bob wins $3!");
//! assert_eq!(game.state(), State::NoHands);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod chips;
pub use chips::Chips;

mod error;
pub use error::GameError;

mod game;
pub use game::{Game, State};

mod options;
pub use options::{GameOption, GameOptions, Variant};

mod player;
pub use player::{Player, PlayerId};

mod pot;
pub use pot::{Payout, Pot, PotManager};

mod registry;
pub use registry::{GameRegistry, SharedGame};

pub use freeroll_cards::{Card, Deck};
pub use freeroll_eval::{EvalError, Hand, HandRank, HandRule};
