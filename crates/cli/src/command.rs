// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Chat commands parsing and dispatch.
use freeroll_core::{Chips, Game, GameError, PlayerId, Variant};

/// The session used by lines with no `#session` prefix.
pub const DEFAULT_SESSION: &str = "#table";

/// The commands help text.
pub const HELP: &str = "Available commands:
!newgame - Start a new game
!join - Join the current game
!buyin <amount> - Buy in with specified amount
!start - Start the game with current players
!deal - Deal the cards
!fold - Fold your hand
!call - Call the current bet
!raise <amount> - Raise the bet
!allin - Go all in
!check - Check if no bet is required
!cards - Show your hole cards
!count - Show player balances
!options [sb|bb|min|max|delay] <amount> - Show or set game options
!game [holdem|omaha] - Show or set the game type
!verbose - Toggle verbose messages
!endgame - End the current game
!help - Show this help message";

/// A chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game.
    NewGame,
    /// Join with the minimum buy in.
    Join,
    /// Buy in or top up.
    BuyIn(String),
    /// Start a waiting game.
    Start,
    /// Deal the next hand.
    Deal,
    /// Fold.
    Fold,
    /// Call.
    Call,
    /// Raise by an amount.
    Raise(String),
    /// Check.
    Check,
    /// All in.
    AllIn,
    /// Show the user hole cards.
    Cards,
    /// Show the balances.
    Count,
    /// Show or change the options.
    Options(Option<(String, String)>),
    /// Show or change the game variant.
    Variant(Option<String>),
    /// Toggle verbose messages.
    Verbose,
    /// End the game.
    EndGame,
    /// Show the help.
    Help,
    /// A command with wrong arguments, holds the usage text.
    Usage(&'static str),
}

/// A command sent by a user to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The session key.
    pub session: String,
    /// The user name, used as the player identifier and display name.
    pub user: String,
    /// The command.
    pub command: Command,
}

impl Request {
    /// Parses a `[#session] <user> !command [args]` line.
    ///
    /// Returns `None` for lines that are not commands.
    pub fn parse(line: &str) -> Option<Request> {
        let mut tokens = line.split_whitespace().peekable();

        let has_session = tokens
            .peek()
            .is_some_and(|t| t.starts_with('#') && t.len() > 1);
        let session = if has_session {
            tokens.next()?.to_string()
        } else {
            DEFAULT_SESSION.to_string()
        };

        let user = tokens.next()?.to_string();
        let name = tokens.next()?.strip_prefix('!')?.to_ascii_lowercase();
        let args = tokens.collect::<Vec<_>>();

        let command = match expand_shorthand(&name) {
            "newgame" => Command::NewGame,
            "join" => Command::Join,
            "buyin" => match args.as_slice() {
                [amount] => Command::BuyIn(amount.to_string()),
                _ => Command::Usage("Usage: !buyin <amount>"),
            },
            "start" => Command::Start,
            "deal" => Command::Deal,
            "fold" => Command::Fold,
            "call" => Command::Call,
            "raise" => match args.as_slice() {
                [amount] => Command::Raise(amount.to_string()),
                _ => Command::Usage("Usage: !raise <amount>"),
            },
            "check" => Command::Check,
            "allin" => Command::AllIn,
            "cards" => Command::Cards,
            "count" => Command::Count,
            "options" => match args.as_slice() {
                [] => Command::Options(None),
                [name, value] => Command::Options(Some((name.to_string(), value.to_string()))),
                _ => Command::Usage("Usage: !options [sb|bb|min|max|delay] <amount>"),
            },
            "game" => match args.as_slice() {
                [] => Command::Variant(None),
                [variant] => Command::Variant(Some(variant.to_string())),
                _ => Command::Usage("Usage: !game [holdem|omaha]"),
            },
            "verbose" => Command::Verbose,
            "endgame" => Command::EndGame,
            "help" => Command::Help,
            _ => return None,
        };

        Some(Request {
            session,
            user,
            command,
        })
    }

    /// Runs this request on the session game and returns the lines to show.
    pub fn execute(&self, game: &mut Game) -> Vec<String> {
        match self.dispatch(game) {
            Ok(msgs) => msgs,
            Err(e) => vec![e.to_string()],
        }
    }

    fn dispatch(&self, game: &mut Game) -> Result<Vec<String>, GameError> {
        let id = PlayerId::new(self.user.as_str());
        let name = self.user.as_str();

        match &self.command {
            Command::NewGame => game.start_new_game(),
            Command::Join => game.add_player(id, name),
            Command::BuyIn(amount) => game.buy_in(id, name, parse_chips(amount)?),
            Command::Start => game.start(),
            Command::Deal => game.deal_hands(),
            Command::Fold => game.fold(&id),
            Command::Call => game.call(&id),
            Command::Raise(amount) => game.raise(&id, parse_chips(amount)?),
            Command::Check => game.check(&id),
            Command::AllIn => game.all_in(&id),
            Command::Cards => {
                if !game.state().is_hand_in_progress() {
                    return Err(GameError::NoHand);
                }

                let cards = game.hole_cards(&id).ok_or(GameError::NotAPlayer)?;
                let cards = cards.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                Ok(vec![format!("{name}'s cards: {}", cards.join("  "))])
            }
            Command::Count => game.balances().map(|s| vec![s]),
            Command::Options(None) => Ok(vec![game.list_options()]),
            Command::Options(Some((name, value))) => {
                game.set_option(name, value).map(|s| vec![s])
            }
            Command::Variant(None) => Ok(vec![format!("Game type is {}.", game.variant())]),
            Command::Variant(Some(variant)) => game
                .set_variant(variant.parse::<Variant>()?)
                .map(|s| vec![s]),
            Command::Verbose => Ok(vec![game.toggle_verbose()]),
            Command::EndGame => game.end_game(),
            Command::Help => Ok(vec![HELP.to_string()]),
            Command::Usage(usage) => Ok(vec![usage.to_string()]),
        }
    }
}

fn expand_shorthand(name: &str) -> &str {
    match name {
        "b" | "bet" | "r" => "raise",
        "c" => "call",
        "d" => "deal",
        "f" => "fold",
        "x" => "check",
        _ => name,
    }
}

fn parse_chips(amount: &str) -> Result<Chips, GameError> {
    amount.parse::<Chips>().map_err(|_| GameError::InvalidAmount)
}
