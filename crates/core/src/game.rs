// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game state machine.
//!
//! A [Game] is driven by one action at a time, each action is validated
//! against the game state and the player turn, and returns the status lines
//! to show to the players in order. A rejected action returns a [GameError]
//! and leaves the game unchanged.
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use freeroll_cards::{Card, Deck};

use crate::{
    Chips, GameError, GameOption, GameOptions, Player, PlayerId, PotManager, Variant,
};

/// The game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No game, a new game must be started.
    NoGame,
    /// Waiting for players to join.
    Waiting,
    /// Between hands, waiting for the next deal.
    NoHands,
    /// Pre-flop betting.
    HandsDealt,
    /// Flop betting.
    FlopDealt,
    /// Turn betting.
    TurnDealt,
    /// River betting.
    RiverDealt,
}

impl State {
    /// Checks if a hand is being played.
    pub fn is_hand_in_progress(&self) -> bool {
        matches!(
            self,
            State::HandsDealt | State::FlopDealt | State::TurnDealt | State::RiverDealt
        )
    }
}

/// A poker game for a group of players.
#[derive(Debug)]
pub struct Game {
    state: State,
    variant: Variant,
    options: GameOptions,
    players: Vec<Player>,
    /// The seats of the players that can still act in this hand.
    in_hand: Vec<usize>,
    pots: PotManager,
    deck: Deck,
    community: Vec<Card>,
    dealer: usize,
    /// Index in `in_hand` of the first player to act after the flop.
    first_bettor: usize,
    /// Index in `in_hand` of the player to act.
    turn: usize,
    last_raise: Option<Instant>,
    verbose: bool,
    /// Seeded generator for reproducible deals, without it every shuffle
    /// draws a fresh seed.
    rng: Option<StdRng>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameOptions::default(), Variant::default())
    }
}

impl Game {
    /// Creates a new game with the given options.
    pub fn new(options: GameOptions, variant: Variant) -> Self {
        Self::with_rng(options, variant, None)
    }

    /// Creates a game with user initialized randomness.
    fn with_rng(options: GameOptions, variant: Variant, rng: Option<StdRng>) -> Self {
        Self {
            state: State::NoGame,
            variant,
            options,
            players: Vec::default(),
            in_hand: Vec::default(),
            pots: PotManager::default(),
            deck: Deck::default(),
            community: Vec::default(),
            dealer: 0,
            first_bettor: 0,
            turn: 0,
            last_raise: None,
            verbose: false,
            rng,
        }
    }

    /// Starts a new game that waits for players to join.
    pub fn start_new_game(&mut self) -> Result<Vec<String>, GameError> {
        if self.state != State::NoGame {
            return Err(GameError::GameInProgress);
        }

        self.players.clear();
        self.in_hand.clear();
        self.pots.clear();
        self.community.clear();
        self.dealer = 0;
        self.first_bettor = 0;
        self.turn = 0;
        self.last_raise = None;
        self.state = State::Waiting;

        info!("New {} game started", self.variant);

        Ok(vec![
            "New game started! Type !join to join the game.".to_string(),
        ])
    }

    /// A player joins a waiting game with the minimum buy in.
    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        name: &str,
    ) -> Result<Vec<String>, GameError> {
        let id = id.into();
        if self.state != State::Waiting {
            return Err(GameError::NotWaiting);
        }

        if self.seat_of(&id).is_some() {
            return Err(GameError::AlreadyJoined);
        }

        info!("Player {id} joined as {name}");
        self.players
            .push(Player::new(id, name, self.options.min_buy_in));

        Ok(vec![format!("{name} has joined the game!")])
    }

    /// Buys chips, a new player joins a waiting game with the given amount,
    /// an existing player tops up the balance.
    ///
    /// A top up during a hand is credited when the hand ends.
    pub fn buy_in(
        &mut self,
        id: impl Into<PlayerId>,
        name: &str,
        amount: Chips,
    ) -> Result<Vec<String>, GameError> {
        let id = id.into();
        if self.state == State::NoGame {
            return Err(GameError::NoGame);
        }

        let seat = self.seat_of(&id);
        if seat.is_none() && self.state != State::Waiting {
            return Err(GameError::NotWaiting);
        }

        if amount < self.options.min_buy_in {
            return Err(GameError::BuyInTooLow(self.options.min_buy_in));
        }

        if amount > self.options.max_buy_in {
            return Err(GameError::BuyInTooHigh(self.options.max_buy_in));
        }

        let msg = match seat {
            Some(seat) if self.state.is_hand_in_progress() => {
                let player = &mut self.players[seat];
                player.top_up += amount;
                format!("Your balance will be increased by ${amount} when this hand ends.")
            }
            Some(seat) => {
                let player = &mut self.players[seat];
                player.balance += amount;
                format!(
                    "Increased your balance by ${amount}. You now have ${}.",
                    player.balance
                )
            }
            None => {
                info!("Player {id} bought in as {name} for {amount}");
                self.players.push(Player::new(id, name, amount));
                format!("You've bought in for ${amount}.")
            }
        };

        Ok(vec![msg])
    }

    /// Starts playing a waiting game.
    pub fn start(&mut self) -> Result<Vec<String>, GameError> {
        if self.state != State::Waiting {
            return Err(GameError::NotStarting);
        }

        self.deal_hands()
    }

    /// Deals a new hand.
    pub fn deal_hands(&mut self) -> Result<Vec<String>, GameError> {
        self.deal_hands_at(Instant::now())
    }

    fn deal_hands_at(&mut self, now: Instant) -> Result<Vec<String>, GameError> {
        match self.state {
            State::Waiting | State::NoHands => {}
            State::NoGame => return Err(GameError::NoGame),
            _ => return Err(GameError::CannotDeal),
        }

        let num_players = self.players.len();
        if num_players < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        let hole_cards = self.variant.hole_cards();
        if num_players * hole_cards + 5 > Deck::SIZE {
            return Err(GameError::DeckExhausted(num_players));
        }

        self.deck.reset();
        match &mut self.rng {
            Some(rng) => self.deck.shuffle_with(rng),
            None => self.deck.shuffle(),
        }

        let hands = (0..num_players)
            .map(|_| self.deck.deal(hole_cards))
            .collect::<Option<Vec<_>>>()
            .ok_or(GameError::DeckExhausted(num_players))?;

        for (player, cards) in self.players.iter_mut().zip(hands) {
            player.start_hand(cards);
        }

        self.community.clear();
        self.in_hand = (0..num_players).collect();
        self.state = State::HandsDealt;

        info!(
            "Dealing {} hand to {num_players} players, dealer {}",
            self.variant, self.players[self.dealer].name
        );

        let mut msgs = vec!["The hands have been dealt!".to_string()];

        self.pots.new_hand(&self.players, 0..num_players);
        self.pay_blinds(now, &mut msgs);
        self.next_turn(false, &mut msgs)?;

        Ok(msgs)
    }

    fn pay_blinds(&mut self, now: Instant, msgs: &mut Vec<String>) {
        match (self.options.blind_raise_delay, self.last_raise) {
            (0, _) => self.last_raise = None,
            (_, None) => self.last_raise = Some(now),
            (delay, Some(last)) => {
                let delay = Duration::from_secs(u64::from(delay) * 60);
                if now.saturating_duration_since(last) > delay {
                    self.options.small_blind = self.options.small_blind * 2;
                    self.options.big_blind = self.options.big_blind * 2;
                    self.last_raise = Some(now);

                    info!(
                        "Blinds doubled to {}/{}",
                        self.options.small_blind, self.options.big_blind
                    );
                    msgs.push("Blinds are being doubled this round!".to_string());
                }
            }
        }

        let num_players = self.in_hand.len();
        let dealer = self.dealer;
        let (sb_seat, bb_seat) = if num_players > 2 {
            // Pre-flop the player after the big blind acts first.
            self.turn = (dealer + 3) % num_players;
            self.first_bettor = (dealer + 1) % num_players;
            ((dealer + 1) % num_players, (dealer + 2) % num_players)
        } else {
            // Heads up the dealer pays the small blind and acts first pre-flop.
            self.turn = dealer;
            self.first_bettor = (dealer + 1) % num_players;
            (dealer, (dealer + 1) % num_players)
        };

        self.post_blind(sb_seat, self.options.small_blind, "small", msgs);
        self.post_blind(bb_seat, self.options.big_blind, "big", msgs);
    }

    fn post_blind(&mut self, seat: usize, blind: Chips, label: &str, msgs: &mut Vec<String>) {
        let all_in = self.pots.pay_blind(&mut self.players, seat, blind);

        let player = &self.players[seat];
        msgs.push(format!(
            "{} has paid the {label} blind of ${}.",
            player.name, player.bet
        ));

        if all_in {
            msgs.push(format!("{} is all in!", player.name));
            self.leave_hand(seat);
        }
    }

    /// The current player folds.
    pub fn fold(&mut self, id: &PlayerId) -> Result<Vec<String>, GameError> {
        let seat = self.acting_seat(id)?;

        let mut msgs = Vec::new();
        if self.verbose {
            msgs.push(format!("{} has folded.", self.players[seat].name));
        }

        debug!("Player {id} folds");
        self.pots.handle_fold(seat);
        self.leave_hand(seat);

        // The last player in the pot wins without a showdown.
        if self.pots.in_pot_count() == 1 {
            if let Some(winner) = self.pots.in_pot().next() {
                let value = self.pots.value();
                let player = &mut self.players[winner];
                player.balance += value;

                info!("Player {} wins {value} uncontested", player.id);
                msgs.push(format!("{} wins ${value}!", player.name));
            }

            self.end_hand(&mut msgs);
            return Ok(msgs);
        }

        self.next_turn(false, &mut msgs)?;
        Ok(msgs)
    }

    /// The current player matches the current bet.
    pub fn call(&mut self, id: &PlayerId) -> Result<Vec<String>, GameError> {
        let seat = self.acting_seat(id)?;

        let paid = self.pots.handle_call(&mut self.players[seat]);
        debug!("Player {id} calls paying {paid}");

        let mut msgs = Vec::new();
        if self.verbose {
            msgs.push(format!("{} calls.", self.players[seat].name));
        }

        self.after_bet(seat, &mut msgs)?;
        Ok(msgs)
    }

    /// The current player raises the current bet by the given amount.
    pub fn raise(&mut self, id: &PlayerId, amount: Chips) -> Result<Vec<String>, GameError> {
        let seat = self.acting_seat(id)?;

        if amount == Chips::ZERO {
            return Err(GameError::ZeroRaise);
        }

        let current_bet = self.pots.current_bet();
        let max_bet = self.players[seat].max_bet();
        if current_bet + amount > max_bet {
            return Err(GameError::RaiseTooHigh(max_bet - current_bet));
        }

        let paid = self.pots.handle_raise(&mut self.players, seat, amount);
        debug!("Player {id} raises by {amount} paying {paid}");

        let mut msgs = Vec::new();
        if self.verbose {
            msgs.push(format!(
                "{} raises by ${amount}.",
                self.players[seat].name
            ));
        }

        self.after_bet(seat, &mut msgs)?;
        Ok(msgs)
    }

    /// The current player checks, only allowed if the player has matched
    /// the current bet.
    pub fn check(&mut self, id: &PlayerId) -> Result<Vec<String>, GameError> {
        let seat = self.acting_seat(id)?;

        let current_bet = self.pots.current_bet();
        let player = &mut self.players[seat];
        if player.bet < current_bet {
            return Err(GameError::CannotCheck(current_bet));
        }

        player.has_acted = true;
        debug!("Player {id} checks");

        let mut msgs = Vec::new();
        if self.verbose {
            msgs.push(format!("{} checks.", player.name));
        }

        self.next_turn(true, &mut msgs)?;
        Ok(msgs)
    }

    /// The current player bets all the chips.
    pub fn all_in(&mut self, id: &PlayerId) -> Result<Vec<String>, GameError> {
        let seat = self.acting_seat(id)?;

        let current_bet = self.pots.current_bet();
        let max_bet = self.players[seat].max_bet();
        if current_bet >= max_bet {
            self.call(id)
        } else {
            self.raise(id, max_bet - current_bet)
        }
    }

    fn after_bet(&mut self, seat: usize, msgs: &mut Vec<String>) -> Result<(), GameError> {
        if self.players[seat].is_all_in() {
            msgs.push(format!("{} is all in!", self.players[seat].name));
            self.leave_hand(seat);
            self.next_turn(false, msgs)
        } else {
            self.next_turn(true, msgs)
        }
    }

    /// Removes a player that folded or is all in from the turn rotation.
    fn leave_hand(&mut self, seat: usize) {
        let Some(pos) = self.in_hand.iter().position(|&s| s == seat) else {
            return;
        };

        self.in_hand.remove(pos);

        if pos < self.first_bettor {
            self.first_bettor -= 1;
        }

        if pos < self.turn {
            self.turn -= 1;
        }

        if self.first_bettor >= self.in_hand.len() {
            self.first_bettor = 0;
        }

        if self.turn >= self.in_hand.len() {
            self.turn = 0;
        }
    }

    /// Moves to the next player, dealing the next street or going to showdown
    /// when the betting round is over.
    fn next_turn(&mut self, advance: bool, msgs: &mut Vec<String>) -> Result<(), GameError> {
        if self.pots.round_over(&self.players) {
            return if self.pots.betting_over(&self.players) {
                self.showdown(msgs)
            } else {
                self.next_round(msgs)
            };
        }

        if self.in_hand.is_empty() {
            return self.showdown(msgs);
        }

        if advance {
            self.turn = (self.turn + 1) % self.in_hand.len();
        } else if self.turn >= self.in_hand.len() {
            self.turn = 0;
        }

        self.cur_options(msgs);
        Ok(())
    }

    fn next_round(&mut self, msgs: &mut Vec<String>) -> Result<(), GameError> {
        let (label, count, next_state) = match self.state {
            State::HandsDealt => ("Dealing the flop:", 3, State::FlopDealt),
            State::FlopDealt => ("Dealing the turn:", 1, State::TurnDealt),
            State::TurnDealt => ("Dealing the river:", 1, State::RiverDealt),
            _ => return self.showdown(msgs),
        };

        msgs.push(label.to_string());
        self.deal_community(count);
        self.state = next_state;
        msgs.push(cards_line(&self.community));

        debug!("{label} {}", cards_line(&self.community));

        self.pots.next_round(&mut self.players);
        self.turn = self.first_bettor;
        if self.turn >= self.in_hand.len() {
            self.turn = 0;
        }

        self.cur_options(msgs);
        Ok(())
    }

    fn deal_community(&mut self, count: usize) {
        match self.deck.deal(count) {
            Some(cards) => self.community.extend(cards),
            None => warn!(
                "Deck has {} cards, cannot deal {count} community cards",
                self.deck.count()
            ),
        }
    }

    fn showdown(&mut self, msgs: &mut Vec<String>) -> Result<(), GameError> {
        let missing = 5usize.saturating_sub(self.community.len());
        if missing > 0 {
            self.deal_community(missing);
        }

        msgs.push("We have reached the end of betting. All cards will be revealed.".to_string());
        msgs.push(cards_line(&self.community));

        for seat in self.pots.in_pot() {
            let player = &self.players[seat];
            msgs.push(format!("{}'s hand: {}", player.name, cards_line(&player.cards)));
        }

        let payouts = self.pots.get_winners(
            &self.players,
            &self.community,
            self.variant.hand_rule(),
            self.dealer,
        )?;

        for payout in payouts {
            let player = &mut self.players[payout.seat];
            player.balance += payout.chips;

            info!(
                "Player {} wins {} with {}",
                player.id, payout.chips, payout.hand
            );
            msgs.push(format!(
                "{} wins ${} with a {}.",
                player.name, payout.chips, payout.hand
            ));
        }

        self.end_hand(msgs);
        Ok(())
    }

    /// Clears the hand, removes the players with no chips, and moves the
    /// dealer to the next player.
    fn end_hand(&mut self, msgs: &mut Vec<String>) {
        for player in &mut self.players {
            player.end_hand();
        }

        self.pots.clear();
        self.in_hand.clear();

        let num_players = self.players.len();
        let next_dealer = (1..=num_players)
            .map(|offset| (self.dealer + offset) % num_players)
            .find(|&seat| self.players[seat].balance > Chips::ZERO)
            .unwrap_or_default();

        // The dealer index among the players that are still in the game.
        let dealer = self.players[..next_dealer]
            .iter()
            .filter(|p| p.balance > Chips::ZERO)
            .count();

        for player in &self.players {
            if player.balance == Chips::ZERO {
                info!("Player {} knocked out", player.id);
                msgs.push(format!("{} has been knocked out of the game!", player.name));
            }
        }

        self.players.retain(|p| p.balance > Chips::ZERO);

        if self.players.len() < 2 {
            if let Some(winner) = self.players.first() {
                info!("Player {} wins the game", winner.id);
                msgs.push(format!("{} wins the game! Congratulations!", winner.name));
            }

            self.state = State::NoGame;
            return;
        }

        self.dealer = dealer;
        self.state = State::NoHands;
        self.status_between_rounds(msgs);
    }

    fn status_between_rounds(&self, msgs: &mut Vec<String>) {
        if self.verbose {
            for player in &self.players {
                msgs.push(format!("{} has ${}.", player.name, player.balance));
            }
        }

        if let Some(dealer) = self.players.get(self.dealer) {
            msgs.push(format!(
                "{} is the current dealer. Message !deal when you're ready.",
                dealer.name
            ));
        }
    }

    fn cur_options(&self, msgs: &mut Vec<String>) {
        let Some(player) = self.current_player() else {
            return;
        };

        msgs.push(format!(
            "It is {}'s turn. Current balance is ${}.",
            player.name, player.balance
        ));

        let current_bet = self.pots.current_bet();
        if current_bet > Chips::ZERO {
            msgs.push(format!(
                "The pot is currently ${}. The current bet to meet is ${current_bet}, and {} has bet ${}.",
                self.pots.value(),
                player.name,
                player.bet
            ));
        } else {
            msgs.push(format!(
                "The pot is currently ${}. The current bet to meet is ${current_bet}.",
                self.pots.value()
            ));
        }

        if self.verbose {
            let hint = if player.bet == current_bet {
                "Message !check, !raise or !fold."
            } else if player.max_bet() > current_bet {
                "Message !call, !raise or !fold."
            } else {
                "Message !allin or !fold."
            };

            msgs.push(hint.to_string());
        }
    }

    /// Ends the game and reports the players balances, the chips bet in a
    /// hand being played go back to the players.
    pub fn end_game(&mut self) -> Result<Vec<String>, GameError> {
        if self.state == State::NoGame {
            return Err(GameError::NoGame);
        }

        let refund = self.state.is_hand_in_progress();
        let mut msgs = vec!["Game has been ended.".to_string()];
        for player in &mut self.players {
            if refund {
                player.balance += player.committed;
            }

            player.end_hand();
            msgs.push(format!("{} has ${}.", player.name, player.balance));
        }

        self.pots.clear();
        self.in_hand.clear();
        self.state = State::NoGame;

        info!("Game ended");
        Ok(msgs)
    }

    /// The game options as a text listing.
    pub fn list_options(&self) -> String {
        format!(
            "Current game options:\n{}\nGame: {}",
            self.options, self.variant
        )
    }

    /// Changes an option, options can only be changed between hands.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<String, GameError> {
        if self.state.is_hand_in_progress() {
            return Err(GameError::HandInProgress);
        }

        let option = name.parse::<GameOption>()?;
        self.options = self.options.with(option, value)?;

        if self.options.blind_raise_delay == 0 {
            self.last_raise = None;
        }

        info!("Option {option} set to {}", value.trim());
        Ok(format!("{option} set to {}", value.trim()))
    }

    /// Changes the game variant between hands.
    pub fn set_variant(&mut self, variant: Variant) -> Result<String, GameError> {
        if self.state.is_hand_in_progress() {
            return Err(GameError::HandInProgress);
        }

        self.variant = variant;
        info!("Variant set to {variant}");
        Ok(format!("Game type set to {variant}."))
    }

    /// Toggles verbose status messages.
    pub fn toggle_verbose(&mut self) -> String {
        self.verbose = !self.verbose;
        format!("Verbose mode is now {}", self.verbose)
    }

    /// The players balances.
    pub fn balances(&self) -> Result<String, GameError> {
        if self.state == State::NoGame {
            return Err(GameError::NoGame);
        }

        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let mut status = "Player balances:".to_string();
        for player in &self.players {
            status.push_str(&format!("\n- {}: ${}", player.name, player.balance));
        }

        Ok(status)
    }

    /// The game state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The game variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The game options.
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// The players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player to act, if a hand is being played.
    pub fn current_player(&self) -> Option<&Player> {
        if !self.state.is_hand_in_progress() {
            return None;
        }

        self.in_hand
            .get(self.turn)
            .and_then(|&seat| self.players.get(seat))
    }

    /// The dealer.
    pub fn dealer(&self) -> Option<&Player> {
        if self.state == State::NoGame {
            return None;
        }

        self.players.get(self.dealer)
    }

    /// The hole cards of a player.
    pub fn hole_cards(&self, id: &PlayerId) -> Option<&[Card]> {
        self.seat_of(id)
            .map(|seat| self.players[seat].cards.as_slice())
    }

    /// The chips in all the pots.
    pub fn pot_value(&self) -> Chips {
        self.pots.value()
    }

    /// The bet to match in this betting round.
    pub fn current_bet(&self) -> Chips {
        self.pots.current_bet()
    }

    /// The community cards.
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// Checks if verbose messages are enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Checks it is this player turn and returns the player seat.
    fn acting_seat(&self, id: &PlayerId) -> Result<usize, GameError> {
        if !self.state.is_hand_in_progress() {
            return Err(GameError::NoHand);
        }

        match self.in_hand.get(self.turn) {
            Some(&seat) if &self.players[seat].id == id => Ok(seat),
            _ if self.seat_of(id).is_some() => Err(GameError::NotYourTurn),
            _ => Err(GameError::NotAPlayer),
        }
    }
}

fn cards_line(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect()
    }

    fn id(seat: usize) -> PlayerId {
        PlayerId::new(format!("p{seat}"))
    }

    fn new_game(balances: &[u32]) -> Game {
        let rng = StdRng::seed_from_u64(101);
        let mut game = Game::with_rng(
            GameOptions::default(),
            Variant::TexasHoldem,
            Some(rng),
        );
        game.start_new_game().unwrap();

        for (seat, &balance) in balances.iter().enumerate() {
            let player_id = id(seat);
            let name = player_id.to_string();
            game.add_player(player_id, &name).unwrap();
            game.players[seat].balance = Chips::new(balance);
        }

        game
    }

    fn total_chips(game: &Game) -> Chips {
        game.pot_value() + game.players.iter().map(|p| p.balance).sum::<Chips>()
    }

    fn current_id(game: &Game) -> PlayerId {
        game.current_player().unwrap().id.clone()
    }

    #[test]
    fn heads_up_blinds() {
        let mut game = new_game(&[100, 100]);
        let msgs = game.start().unwrap();

        assert_eq!(msgs[0], "The hands have been dealt!");
        assert!(msgs.contains(&"p0 has paid the small blind of $1.".to_string()));
        assert!(msgs.contains(&"p1 has paid the big blind of $2.".to_string()));
        assert!(msgs.contains(&"It is p0's turn. Current balance is $99.".to_string()));

        assert_eq!(game.state(), State::HandsDealt);
        assert_eq!(game.players[0].balance, Chips::new(99));
        assert_eq!(game.players[1].balance, Chips::new(98));
        assert_eq!(game.pot_value(), Chips::new(3));
        assert_eq!(game.current_bet(), Chips::new(2));
        assert_eq!(current_id(&game), id(0));
        assert!(game.players.iter().all(|p| p.cards.len() == 2));
    }

    #[test]
    fn three_players_blinds() {
        let mut game = new_game(&[100, 100, 100]);
        game.deal_hands().unwrap();

        assert_eq!(game.players[1].balance, Chips::new(99));
        assert_eq!(game.players[2].balance, Chips::new(98));
        assert_eq!(current_id(&game), id(0));
        assert_eq!(game.dealer().unwrap().id, id(0));
    }

    #[test]
    fn new_game_shuffles_every_hand() {
        let mut game = Game::new(GameOptions::default(), Variant::TexasHoldem);
        assert!(game.rng.is_none());

        game.start_new_game().unwrap();
        game.add_player("p0", "p0").unwrap();
        game.add_player("p1", "p1").unwrap();

        for _ in 0..2 {
            game.deal_hands().unwrap();
            assert_eq!(game.deck.count(), Deck::SIZE - 4);

            let mut dealt = game
                .players
                .iter()
                .flat_map(|p| p.cards.iter().copied())
                .collect::<Vec<_>>();
            dealt.sort_by_key(|c| c.to_string());
            dealt.dedup();
            assert_eq!(dealt.len(), 4);

            let player_id = current_id(&game);
            game.fold(&player_id).unwrap();
            assert_eq!(game.state(), State::NoHands);
        }
    }

    #[test]
    fn short_small_blind_goes_all_in() {
        let mut game = new_game(&[100, 3, 100, 100]);
        game.set_option("bb", "10").unwrap();
        game.set_option("sb", "5").unwrap();

        let msgs = game.deal_hands().unwrap();
        assert!(msgs.contains(&"p1 has paid the small blind of $3.".to_string()));
        assert!(msgs.contains(&"p1 is all in!".to_string()));
        assert!(msgs.contains(&"p2 has paid the big blind of $10.".to_string()));
        assert_eq!(game.in_hand, vec![0, 2, 3]);

        game.players[0].cards = cards("Qs Qd");
        game.players[1].cards = cards("As Ad");
        game.players[2].cards = cards("2c 7d");
        game.players[3].cards = cards("Ks Kd");
        game.deck = Deck::from(cards("Ac Kh 9s 5d 3c"));

        // The player after the big blind acts first pre-flop.
        assert_eq!(current_id(&game), id(3));
        game.call(&id(3)).unwrap();
        game.call(&id(0)).unwrap();
        game.check(&id(2)).unwrap();
        assert_eq!(game.state(), State::FlopDealt);

        let eligible = game
            .pots
            .pots()
            .iter()
            .map(|p| (p.chips().amount(), p.players().collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        assert_eq!(eligible, vec![(12, vec![0, 1, 2, 3]), (21, vec![0, 2, 3])]);

        // The all in small blind is skipped after the flop.
        for _ in 0..2 {
            assert_eq!(current_id(&game), id(2));
            game.check(&id(2)).unwrap();
            game.check(&id(3)).unwrap();
            game.check(&id(0)).unwrap();
        }

        assert_eq!(game.state(), State::RiverDealt);
        assert_eq!(current_id(&game), id(2));
        game.check(&id(2)).unwrap();
        game.check(&id(3)).unwrap();
        let msgs = game.check(&id(0)).unwrap();

        assert!(msgs.contains(&"p1 wins $12 with a three of a kind, aces.".to_string()));
        assert!(msgs.contains(&"p3 wins $21 with a three of a kind, kings.".to_string()));
        assert_eq!(game.players[1].balance, Chips::new(12));
        assert_eq!(game.players[3].balance, Chips::new(111));
        assert_eq!(total_chips(&game), Chips::new(303));
        assert_eq!(game.dealer().unwrap().id, id(1));
    }

    #[test]
    fn heads_up_short_dealer_goes_all_in() {
        let mut game = new_game(&[3, 100]);
        game.set_option("bb", "10").unwrap();
        game.set_option("sb", "5").unwrap();

        let msgs = game.deal_hands().unwrap();
        assert!(msgs.contains(&"p0 is all in!".to_string()));
        assert!(msgs.contains(&"It is p1's turn. Current balance is $90.".to_string()));
        assert_eq!(current_id(&game), id(1));

        game.players[0].cards = cards("As Ad");
        game.players[1].cards = cards("2c 7d");
        game.deck = Deck::from(cards("Ac Kh 9s 5d 3c"));

        // Nobody is left to bet against, the board is dealt out.
        let msgs = game.check(&id(1)).unwrap();
        assert!(msgs.contains(
            &"We have reached the end of betting. All cards will be revealed.".to_string()
        ));
        assert!(msgs.contains(&"p0 wins $6 with a three of a kind, aces.".to_string()));

        assert_eq!(game.state(), State::NoHands);
        assert_eq!(game.community().len(), 5);
        assert_eq!(game.players[0].balance, Chips::new(6));
        assert_eq!(game.players[1].balance, Chips::new(97));
        assert_eq!(game.dealer().unwrap().id, id(1));
    }

    #[test]
    fn actions_validation() {
        let mut game = new_game(&[100, 100]);
        assert_eq!(game.call(&id(0)), Err(GameError::NoHand));

        game.deal_hands().unwrap();

        assert_eq!(game.check(&id(1)), Err(GameError::NotYourTurn));
        assert_eq!(game.fold(&"stranger".into()), Err(GameError::NotAPlayer));
        assert_eq!(game.check(&id(0)), Err(GameError::CannotCheck(Chips::new(2))));
        assert_eq!(game.raise(&id(0), Chips::ZERO), Err(GameError::ZeroRaise));
        assert_eq!(
            game.raise(&id(0), Chips::new(100)),
            Err(GameError::RaiseTooHigh(Chips::new(98)))
        );
        assert_eq!(game.deal_hands(), Err(GameError::CannotDeal));

        // Rejected actions don't change the game.
        assert_eq!(game.players[0].balance, Chips::new(99));
        assert_eq!(game.players[1].balance, Chips::new(98));
        assert_eq!(current_id(&game), id(0));

        game.call(&id(0)).unwrap();
        assert_eq!(current_id(&game), id(1));

        // The big blind closes the pre-flop betting.
        game.check(&id(1)).unwrap();
        assert_eq!(game.state(), State::FlopDealt);
        assert_eq!(game.community().len(), 3);
        assert_eq!(game.current_bet(), Chips::ZERO);
        assert_eq!(game.pot_value(), Chips::new(4));

        // The non dealer acts first after the flop.
        assert_eq!(current_id(&game), id(1));
        game.raise(&id(1), Chips::new(10)).unwrap();
        assert_eq!(game.players[1].balance, Chips::new(88));

        assert_eq!(game.check(&id(0)), Err(GameError::CannotCheck(Chips::new(10))));
        game.call(&id(0)).unwrap();

        assert_eq!(game.state(), State::TurnDealt);
        assert_eq!(game.community().len(), 4);
        assert_eq!(game.pot_value(), Chips::new(24));
        assert_eq!(total_chips(&game), Chips::new(200));
    }

    #[test]
    fn all_in_side_pots() {
        let mut game = new_game(&[50, 100, 150]);
        game.deal_hands().unwrap();

        game.players[0].cards = cards("As Ad");
        game.players[1].cards = cards("Ks Kd");
        game.players[2].cards = cards("2c 7h");
        game.deck = Deck::from(cards("Ac Kh 9s 5d 3c"));

        let msgs = game.all_in(&id(0)).unwrap();
        assert_eq!(msgs[0], "p0 is all in!");
        assert_eq!(current_id(&game), id(1));

        game.all_in(&id(1)).unwrap();
        assert_eq!(game.pots.pots().len(), 2);
        assert_eq!(current_id(&game), id(2));
        assert_eq!(total_chips(&game), Chips::new(300));

        let eligible = game
            .pots
            .pots()
            .iter()
            .map(|p| p.players().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(eligible, vec![vec![0, 1, 2], vec![1, 2]]);

        let msgs = game.all_in(&id(2)).unwrap();
        assert!(msgs.contains(&"p0 wins $150 with a three of a kind, aces.".to_string()));
        assert!(msgs.contains(&"p1 wins $100 with a three of a kind, kings.".to_string()));
        assert!(msgs.contains(&"p2 wins $50 with a ace high.".to_string()));

        assert_eq!(game.state(), State::NoHands);
        assert_eq!(game.players[0].balance, Chips::new(150));
        assert_eq!(game.players[1].balance, Chips::new(100));
        assert_eq!(game.players[2].balance, Chips::new(50));
        assert_eq!(game.dealer().unwrap().id, id(1));
    }

    #[test]
    fn fold_to_one() {
        let mut game = new_game(&[100, 100, 100]);
        game.toggle_verbose();
        game.deal_hands().unwrap();

        let msgs = game.fold(&id(0)).unwrap();
        assert_eq!(msgs[0], "p0 has folded.");
        assert_eq!(current_id(&game), id(1));

        let msgs = game.fold(&id(1)).unwrap();
        assert!(msgs.contains(&"p2 wins $3!".to_string()));
        assert!(msgs.contains(&"p2 has $101.".to_string()));
        assert_eq!(
            msgs.last().unwrap(),
            "p1 is the current dealer. Message !deal when you're ready."
        );

        assert_eq!(game.state(), State::NoHands);
        assert_eq!(game.pot_value(), Chips::ZERO);
        assert_eq!(total_chips(&game), Chips::new(300));
        assert!(game.current_player().is_none());
    }

    #[test]
    fn knock_out_and_game_over() {
        let mut game = new_game(&[100, 20, 100]);
        game.deal_hands().unwrap();

        game.players[0].cards = cards("As Ad");
        game.players[1].cards = cards("2c 7d");
        game.players[2].cards = cards("Ks Kd");
        game.deck = Deck::from(cards("Ac Kh 9s 5d 3c"));

        game.call(&id(0)).unwrap();
        game.all_in(&id(1)).unwrap();
        game.call(&id(2)).unwrap();
        game.call(&id(0)).unwrap();
        assert_eq!(game.state(), State::FlopDealt);

        // Only the players with chips can act.
        for _ in 0..3 {
            assert_eq!(current_id(&game), id(2));
            game.check(&id(2)).unwrap();
            game.check(&id(0)).unwrap();
        }

        assert_eq!(game.state(), State::NoHands);
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.players[0].balance, Chips::new(140));
        assert_eq!(game.players[1].balance, Chips::new(80));
        assert_eq!(game.dealer().unwrap().id, id(2));

        // Heads up the dealer pays the small blind and acts first.
        game.deal_hands().unwrap();
        assert_eq!(current_id(&game), id(2));

        game.players[0].cards = cards("As Ad");
        game.players[1].cards = cards("2c 7d");
        game.deck = Deck::from(cards("Ac Kh 9s 5d 3c"));

        game.all_in(&id(2)).unwrap();
        let msgs = game.call(&id(0)).unwrap();

        assert!(msgs.contains(&"p2 has been knocked out of the game!".to_string()));
        assert_eq!(msgs.last().unwrap(), "p0 wins the game! Congratulations!");
        assert_eq!(game.state(), State::NoGame);
        assert_eq!(game.players[0].balance, Chips::new(220));
    }

    #[test]
    fn chips_are_conserved() {
        let mut game = new_game(&[100, 100, 100, 100]);
        game.deal_hands().unwrap();

        for step in 0..500 {
            match game.state() {
                State::NoGame => break,
                State::NoHands => {
                    game.deal_hands().unwrap();
                }
                _ => {
                    let player_id = current_id(&game);
                    let res = match step % 5 {
                        0 => game.check(&player_id),
                        1 => game.raise(&player_id, Chips::new(5)),
                        2 if step % 3 == 0 => game.fold(&player_id),
                        3 if step % 7 == 0 => game.all_in(&player_id),
                        _ => game.call(&player_id),
                    };

                    if res.is_err() {
                        game.call(&player_id).unwrap();
                    }
                }
            }

            assert_eq!(total_chips(&game), Chips::new(400));

            if game.state().is_hand_in_progress() {
                assert!(game.turn < game.in_hand.len());
                assert!(game.first_bettor < game.in_hand.len());

                // Players that can act have chips and have not folded.
                for &seat in &game.in_hand {
                    assert!(game.pots.pots()[0].is_eligible(seat));
                    assert!(!game.players[seat].is_all_in());
                }
            }
        }
    }

    #[test]
    fn buy_in_and_top_up() {
        let mut game = new_game(&[]);

        let msgs = game.buy_in("p0", "p0", Chips::new(200)).unwrap();
        assert_eq!(msgs, vec!["You've bought in for $200."]);
        assert_eq!(
            game.buy_in("p1", "p1", Chips::new(10)),
            Err(GameError::BuyInTooLow(Chips::new(50)))
        );
        assert_eq!(
            game.buy_in("p1", "p1", Chips::new(2_000)),
            Err(GameError::BuyInTooHigh(Chips::new(1_000)))
        );

        game.add_player("p1", "p1").unwrap();
        assert_eq!(game.add_player("p1", "p1"), Err(GameError::AlreadyJoined));
        assert_eq!(game.players[1].balance, Chips::new(50));

        game.deal_hands().unwrap();
        assert_eq!(game.add_player("p2", "p2"), Err(GameError::NotWaiting));
        assert_eq!(
            game.buy_in("p2", "p2", Chips::new(100)),
            Err(GameError::NotWaiting)
        );

        // Top up is credited after the hand.
        game.buy_in("p0", "p0", Chips::new(100)).unwrap();
        assert_eq!(game.players[0].balance, Chips::new(199));

        game.fold(&id(0)).unwrap();
        assert_eq!(game.players[0].balance, Chips::new(299));
        assert_eq!(game.players[1].balance, Chips::new(51));

        let msgs = game.buy_in("p1", "p1", Chips::new(50)).unwrap();
        assert_eq!(
            msgs,
            vec!["Increased your balance by $50. You now have $101."]
        );
    }

    #[test]
    fn end_game_refunds_bets() {
        let mut game = new_game(&[100, 100]);
        assert_eq!(game.end_game().unwrap()[0], "Game has been ended.");
        assert_eq!(game.end_game(), Err(GameError::NoGame));

        game.start_new_game().unwrap();
        game.add_player("p0", "p0").unwrap();
        game.add_player("p1", "p1").unwrap();
        game.deal_hands().unwrap();
        game.raise(&id(0), Chips::new(10)).unwrap();

        let msgs = game.end_game().unwrap();
        assert_eq!(
            msgs,
            vec!["Game has been ended.", "p0 has $50.", "p1 has $50."]
        );
        assert_eq!(game.state(), State::NoGame);
        assert_eq!(game.pot_value(), Chips::ZERO);
        assert_eq!(game.start_new_game().unwrap().len(), 1);
        assert!(game.players().is_empty());
    }

    #[test]
    fn options_between_hands() {
        let mut game = new_game(&[100, 100]);

        assert_eq!(game.set_option("bb", "10").unwrap(), "bb set to 10");
        assert_eq!(game.set_option("sb", "5").unwrap(), "sb set to 5");
        assert_eq!(game.set_option("ante", "5"), Err(GameError::InvalidOption));
        assert_eq!(game.set_option("sb", "x"), Err(GameError::InvalidAmount));
        assert!(game.list_options().contains("Small Blind: $5\nBig Blind: $10"));

        game.deal_hands().unwrap();
        assert_eq!(game.set_option("sb", "1"), Err(GameError::HandInProgress));
        assert_eq!(
            game.set_variant(Variant::Omaha),
            Err(GameError::HandInProgress)
        );
        assert_eq!(game.pot_value(), Chips::new(15));
    }

    #[test]
    fn blinds_double_after_delay() {
        let mut game = new_game(&[100, 100]);
        game.set_option("delay", "1").unwrap();

        let start = Instant::now();
        game.deal_hands_at(start).unwrap();
        assert_eq!(game.last_raise, Some(start));
        game.fold(&id(0)).unwrap();

        // Not enough time has passed.
        let msgs = game.deal_hands_at(start + Duration::from_secs(30)).unwrap();
        assert!(!msgs.iter().any(|m| m.contains("doubled")));
        game.fold(&id(1)).unwrap();

        let msgs = game.deal_hands_at(start + Duration::from_secs(61)).unwrap();
        assert_eq!(msgs[1], "Blinds are being doubled this round!");
        assert_eq!(game.options().small_blind, Chips::new(2));
        assert_eq!(game.options().big_blind, Chips::new(4));
        assert_eq!(game.pot_value(), Chips::new(6));

        game.fold(&id(0)).unwrap();
        game.set_option("delay", "0").unwrap();
        assert_eq!(game.last_raise, None);
    }

    #[test]
    fn omaha_hands() {
        let mut game = new_game(&[100, 100, 100]);
        assert_eq!(
            game.set_variant(Variant::Omaha).unwrap(),
            "Game type set to Omaha."
        );

        game.deal_hands().unwrap();
        assert!(game.players.iter().all(|p| p.cards.len() == 4));
        assert_eq!(game.hole_cards(&id(1)).map(|c| c.len()), Some(4));
        assert!(game.hole_cards(&"stranger".into()).is_none());
    }

    #[test]
    fn balances_listing() {
        let mut game = Game::default();
        assert_eq!(game.balances(), Err(GameError::NoGame));

        game.start_new_game().unwrap();
        assert_eq!(game.balances(), Err(GameError::NoPlayers));
        assert_eq!(game.start(), Err(GameError::NotEnoughPlayers));

        game.add_player("alice", "Alice").unwrap();
        game.add_player("bob", "Bob").unwrap();
        assert_eq!(
            game.balances().unwrap(),
            "Player balances:\n- Alice: $50\n- Bob: $50"
        );
        assert_eq!(game.toggle_verbose(), "Verbose mode is now true");
    }
}
