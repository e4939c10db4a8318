// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game configuration.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use freeroll_eval::HandRule;

use crate::{Chips, GameError};

/// The game options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The minimum buy in, new players join with this amount.
    pub min_buy_in: Chips,
    /// The maximum buy in.
    pub max_buy_in: Chips,
    /// Minutes before the blinds double, zero disables blinds increase.
    pub blind_raise_delay: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            small_blind: Chips::new(1),
            big_blind: Chips::new(2),
            min_buy_in: Chips::new(50),
            max_buy_in: Chips::new(1_000),
            blind_raise_delay: 0,
        }
    }
}

impl GameOptions {
    /// Checks the options are consistent.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == Chips::ZERO {
            return Err(GameError::InvalidOptionValue(
                "Small blind must be greater than 0!",
            ));
        }

        if self.small_blind >= self.big_blind {
            return Err(GameError::InvalidOptionValue(
                "Small blind must be less than big blind!",
            ));
        }

        if self.min_buy_in == Chips::ZERO {
            return Err(GameError::InvalidOptionValue(
                "Min buy-in must be greater than 0!",
            ));
        }

        if self.min_buy_in >= self.max_buy_in {
            return Err(GameError::InvalidOptionValue(
                "Min buy-in must be less than max buy-in!",
            ));
        }

        Ok(())
    }

    /// Returns a copy of these options with one option changed, the value
    /// is rejected if the new options are not valid.
    pub fn with(&self, option: GameOption, value: &str) -> Result<GameOptions, GameError> {
        let value = value
            .trim()
            .parse::<i64>()
            .map_err(|_| GameError::InvalidAmount)?;

        if value < 0 {
            return Err(GameError::InvalidOptionValue(match option {
                GameOption::SmallBlind => "Small blind must be greater than 0!",
                GameOption::BigBlind => "Big blind must be greater than small blind!",
                GameOption::MinBuyIn => "Min buy-in must be greater than 0!",
                GameOption::MaxBuyIn => "Max buy-in must be greater than min buy-in!",
                GameOption::RaiseDelay => "Delay must be 0 or greater!",
            }));
        }

        let value = u32::try_from(value).map_err(|_| GameError::InvalidAmount)?;

        let mut options = *self;
        match option {
            GameOption::SmallBlind => options.small_blind = Chips::new(value),
            GameOption::BigBlind => {
                if value <= options.small_blind.amount() {
                    return Err(GameError::InvalidOptionValue(
                        "Big blind must be greater than small blind!",
                    ));
                }
                options.big_blind = Chips::new(value);
            }
            GameOption::MinBuyIn => options.min_buy_in = Chips::new(value),
            GameOption::MaxBuyIn => {
                if value <= options.min_buy_in.amount() {
                    return Err(GameError::InvalidOptionValue(
                        "Max buy-in must be greater than min buy-in!",
                    ));
                }
                options.max_buy_in = Chips::new(value);
            }
            GameOption::RaiseDelay => options.blind_raise_delay = value,
        }

        options.validate()?;
        Ok(options)
    }
}

impl fmt::Display for GameOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Small Blind: ${}", self.small_blind)?;
        writeln!(f, "Big Blind: ${}", self.big_blind)?;
        writeln!(f, "Min Buy-In: ${}", self.min_buy_in)?;
        writeln!(f, "Max Buy-In: ${}", self.max_buy_in)?;
        write!(
            f,
            "Blind Raise Delay: {} minutes (0 = off)",
            self.blind_raise_delay
        )
    }
}

/// A game option that can be changed between hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOption {
    /// The small blind (`sb`).
    SmallBlind,
    /// The big blind (`bb`).
    BigBlind,
    /// The minimum buy in (`min`).
    MinBuyIn,
    /// The maximum buy in (`max`).
    MaxBuyIn,
    /// The blinds raise delay in minutes (`delay`).
    RaiseDelay,
}

impl FromStr for GameOption {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sb" => Ok(GameOption::SmallBlind),
            "bb" => Ok(GameOption::BigBlind),
            "min" => Ok(GameOption::MinBuyIn),
            "max" => Ok(GameOption::MaxBuyIn),
            "delay" => Ok(GameOption::RaiseDelay),
            _ => Err(GameError::InvalidOption),
        }
    }
}

impl fmt::Display for GameOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameOption::SmallBlind => "sb",
            GameOption::BigBlind => "bb",
            GameOption::MinBuyIn => "min",
            GameOption::MaxBuyIn => "max",
            GameOption::RaiseDelay => "delay",
        };

        write!(f, "{name}")
    }
}

/// The poker variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Texas Hold'em, two hole cards.
    #[default]
    TexasHoldem,
    /// Omaha, four hole cards and exactly two must be used.
    Omaha,
}

impl Variant {
    /// The number of cards dealt to each player.
    pub fn hole_cards(&self) -> usize {
        match self {
            Variant::TexasHoldem => 2,
            Variant::Omaha => 4,
        }
    }

    /// The rule used to pick the players best hand.
    pub fn hand_rule(&self) -> HandRule {
        match self {
            Variant::TexasHoldem => HandRule::TexasHoldem,
            Variant::Omaha => HandRule::Omaha,
        }
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "holdem" | "texas" | "texasholdem" | "nlhe" => Ok(Variant::TexasHoldem),
            "omaha" | "plo" => Ok(Variant::Omaha),
            _ => Err(GameError::InvalidVariant),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand_rule())
    }
}
