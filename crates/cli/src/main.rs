// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Freeroll text driver.
//!
//! Reads `[#session] <user> !command [args]` lines from stdin and prints the
//! game messages for each session.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, Write};

use freeroll_core::{Chips, GameOptions, GameRegistry, Variant};

mod command;
use command::{HELP, Request};

#[derive(Debug, Parser)]
struct Cli {
    /// Log debug messages.
    #[clap(long, short)]
    verbose: bool,
    /// The small blind for new games.
    #[clap(long, default_value_t = 1)]
    small_blind: u32,
    /// The big blind for new games.
    #[clap(long, default_value_t = 2)]
    big_blind: u32,
    /// The minimum buy in for new games.
    #[clap(long, default_value_t = 50)]
    min_buy_in: u32,
    /// The maximum buy in for new games.
    #[clap(long, default_value_t = 1_000)]
    max_buy_in: u32,
    /// Minutes before the blinds double, 0 disables blinds increase.
    #[clap(long, default_value_t = 0)]
    raise_delay: u32,
    /// The game variant, holdem or omaha.
    #[clap(long, default_value = "holdem")]
    variant: String,
}

impl Cli {
    fn options(&self) -> Result<GameOptions> {
        let options = GameOptions {
            small_blind: Chips::new(self.small_blind),
            big_blind: Chips::new(self.big_blind),
            min_buy_in: Chips::new(self.min_buy_in),
            max_buy_in: Chips::new(self.max_buy_in),
            blind_raise_delay: self.raise_delay,
        };

        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let options = cli.options()?;
    let Ok(variant) = cli.variant.parse::<Variant>() else {
        bail!("Invalid variant {}, use holdem or omaha", cli.variant);
    };

    info!("Default game {variant} blinds {}/{}", options.small_blind, options.big_blind);

    let registry = GameRegistry::new(options, variant);
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some(req) = Request::parse(&line) else {
            continue;
        };

        debug!("{} {} {:?}", req.session, req.user, req.command);

        let game = registry.get_or_create(&req.session);
        let msgs = req.execute(&mut game.lock());

        for msg in msgs {
            writeln!(out, "[{}] {msg}", req.session)?;
        }

        out.flush()?;
    }

    Ok(())
}
