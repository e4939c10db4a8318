// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Games registry.
use ahash::AHashMap;
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::{Game, GameOptions, Variant};

/// A game shared by the players of a session.
pub type SharedGame = Arc<Mutex<Game>>;

/// The games for all sessions, keyed by a session identifier.
///
/// Games are created on first use, callers must lock a game for the duration
/// of an action:
///
/// ```
/// # use freeroll_core::GameRegistry;
/// let registry = GameRegistry::default();
/// let game = registry.get_or_create("#poker");
/// let msgs = game.lock().start_new_game().unwrap();
/// assert_eq!(msgs.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameRegistry(Arc<Shared>);

#[derive(Debug, Default)]
struct Shared {
    games: Mutex<AHashMap<String, SharedGame>>,
    options: GameOptions,
    variant: Variant,
}

impl GameRegistry {
    /// Creates a registry where new games use the given options.
    pub fn new(options: GameOptions, variant: Variant) -> Self {
        Self(Arc::new(Shared {
            games: Mutex::default(),
            options,
            variant,
        }))
    }

    /// Returns the game for a session creating it if needed.
    pub fn get_or_create(&self, key: &str) -> SharedGame {
        let mut games = self.0.games.lock();
        if let Some(game) = games.get(key) {
            return game.clone();
        }

        info!("Creating game for session {key}");
        let game = Arc::new(Mutex::new(Game::new(self.0.options, self.0.variant)));
        games.insert(key.to_string(), game.clone());
        game
    }

    /// Removes a session game.
    pub fn remove(&self, key: &str) -> Option<SharedGame> {
        self.0.games.lock().remove(key)
    }

    /// The number of sessions.
    pub fn len(&self) -> usize {
        self.0.games.lock().len()
    }

    /// Checks if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.0.games.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chips, State};
    use std::thread;

    #[test]
    fn games_by_session() {
        let options = GameOptions {
            small_blind: Chips::new(5),
            big_blind: Chips::new(10),
            ..GameOptions::default()
        };

        let registry = GameRegistry::new(options, Variant::Omaha);
        assert!(registry.is_empty());

        let g1 = registry.get_or_create("#one");
        let g2 = registry.get_or_create("#two");
        assert!(Arc::ptr_eq(&g1, &registry.get_or_create("#one")));
        assert!(!Arc::ptr_eq(&g1, &g2));
        assert_eq!(registry.len(), 2);

        assert_eq!(g1.lock().options().small_blind, Chips::new(5));
        assert_eq!(g2.lock().variant(), Variant::Omaha);

        g1.lock().start_new_game().unwrap();
        assert_eq!(g1.lock().state(), State::Waiting);
        assert_eq!(g2.lock().state(), State::NoGame);

        assert!(registry.remove("#one").is_some());
        assert!(registry.remove("#one").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_sessions() {
        let registry = GameRegistry::default();

        let handles = (0..8)
            .map(|n| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let game = registry.get_or_create(&format!("#{}", n % 2));
                    let mut game = game.lock();
                    if game.state() == State::NoGame {
                        game.start_new_game().unwrap();
                    }

                    game.add_player(format!("p{n}"), "player").unwrap();
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 2);
        for key in ["#0", "#1"] {
            let game = registry.get_or_create(key);
            assert_eq!(game.lock().players().len(), 4);
        }
    }
}
