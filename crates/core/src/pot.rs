// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pots and side pots accounting.
//!
//! The [PotManager] keeps a list of pots where each pot has a set of players
//! that can win it, the share of the round bet that goes into it, and a cap
//! that is the lowest bet one of its players can make. When a bet goes over
//! the cap of the last pot the pot is closed at the cap, and a side pot is
//! added with the players that can bet more than the cap.
//!
//! Players are identified by their seat, the index in the game players list,
//! and chips go straight from the players balances into the pots so that the
//! pots value plus the players balances is constant during a hand.
use log::{debug, warn};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use freeroll_cards::Card;
use freeroll_eval::{EvalError, Hand, HandRule};

use crate::{Chips, Player};

/// A pot that contains players bets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    players: BTreeSet<usize>,
    bet: Chips,
    chips: Chips,
    cap: Chips,
}

impl Pot {
    fn new(players: BTreeSet<usize>, seats: &[Player]) -> Self {
        let cap = min_max_bet(&players, seats);
        Self {
            players,
            bet: Chips::ZERO,
            chips: Chips::ZERO,
            cap,
        }
    }

    /// The seats of the players that can win this pot.
    pub fn players(&self) -> impl Iterator<Item = usize> + '_ {
        self.players.iter().copied()
    }

    /// Checks if the player at the given seat can win this pot.
    pub fn is_eligible(&self, seat: usize) -> bool {
        self.players.contains(&seat)
    }

    /// The chips in this pot.
    pub fn chips(&self) -> Chips {
        self.chips
    }

    /// The part of the round bet that goes into this pot.
    pub fn bet(&self) -> Chips {
        self.bet
    }

    /// The largest round bet this pot can hold.
    pub fn cap(&self) -> Chips {
        self.cap
    }

    /// Creates a side pot with the players that can bet more than this pot cap.
    fn side_pot(&self, seats: &[Player]) -> Pot {
        let players = self
            .players
            .iter()
            .copied()
            .filter(|&s| seats.get(s).is_some_and(|p| p.max_bet() > self.cap))
            .collect();
        Pot::new(players, seats)
    }
}

fn min_max_bet(players: &BTreeSet<usize>, seats: &[Player]) -> Chips {
    players
        .iter()
        .filter_map(|&s| seats.get(s))
        .map(Player::max_bet)
        .min()
        .unwrap_or(Chips::MAX)
}

/// The chips won by a player at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    /// The winner seat.
    pub seat: usize,
    /// The chips won across all pots.
    pub chips: Chips,
    /// The winning hand.
    pub hand: Hand,
}

/// Tracks the pots of a hand.
#[derive(Debug, Clone, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    /// Starts a new hand with a single pot for the given seats.
    pub fn new_hand(&mut self, players: &[Player], seats: impl IntoIterator<Item = usize>) {
        self.pots = vec![Pot::new(seats.into_iter().collect(), players)];
    }

    /// Removes all pots.
    pub fn clear(&mut self) {
        self.pots.clear();
    }

    /// The pots, the main pot first.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// The bet a player has to match in this round.
    pub fn current_bet(&self) -> Chips {
        self.pots.iter().map(|p| p.bet).sum()
    }

    /// The chips in all the pots.
    pub fn value(&self) -> Chips {
        self.pots.iter().map(|p| p.chips).sum()
    }

    /// The seats of the players that have not folded.
    pub fn in_pot(&self) -> impl Iterator<Item = usize> + '_ {
        self.pots.first().into_iter().flat_map(|p| p.players())
    }

    /// The number of players that have not folded.
    pub fn in_pot_count(&self) -> usize {
        self.pots.first().map(|p| p.players.len()).unwrap_or_default()
    }

    /// Raises the round bet to the given amount, splitting it into side pots
    /// when it goes over the last pot cap.
    pub fn increase_bet(&mut self, players: &[Player], amount: Chips) {
        if amount <= self.current_bet() || self.pots.is_empty() {
            return;
        }

        // The round bet held by the pots before the last one.
        let mut held = self.pots[..self.pots.len() - 1]
            .iter()
            .map(|p| p.bet)
            .sum::<Chips>();

        while let Some(pot) = self.pots.last_mut() {
            if amount <= pot.cap {
                pot.bet = amount - held;
                break;
            }

            pot.bet = pot.cap - held;
            held += pot.bet;

            let side_pot = pot.side_pot(players);
            debug!(
                "Side pot for seats {:?} capped at {}",
                side_pot.players, side_pot.cap
            );
            self.pots.push(side_pot);
        }
    }

    /// The player matches the round bet or goes all in, returns the chips paid.
    pub fn handle_call(&mut self, player: &mut Player) -> Chips {
        let target = player.max_bet().min(self.current_bet());
        let mut prev_bet = player.bet;
        let paid = player.bet_to(target);

        // Fill each pot share this player hasn't paid yet.
        let mut left = paid;
        for pot in &mut self.pots {
            if left == Chips::ZERO {
                break;
            }

            let covered = prev_bet.min(pot.bet);
            prev_bet -= covered;

            let chips = (pot.bet - covered).min(left);
            pot.chips += chips;
            left -= chips;
        }

        if left > Chips::ZERO {
            if let Some(pot) = self.pots.last_mut() {
                pot.chips += left;
            }
        }

        player.has_acted = true;
        paid
    }

    /// The player raises the round bet by the given amount.
    pub fn handle_raise(&mut self, players: &mut [Player], seat: usize, amount: Chips) -> Chips {
        let target = self.current_bet() + amount;
        self.increase_bet(players, target);

        players
            .get_mut(seat)
            .map(|p| self.handle_call(p))
            .unwrap_or_default()
    }

    /// Pays a blind, returns true if the blind put the player all in.
    pub fn pay_blind(&mut self, players: &mut [Player], seat: usize, blind: Chips) -> bool {
        self.increase_bet(players, blind);

        match players.get_mut(seat) {
            Some(player) => {
                self.handle_call(player);
                // Blinds don't count as an action.
                player.has_acted = false;
                player.is_all_in()
            }
            None => false,
        }
    }

    /// The player at the given seat can no longer win any pot.
    pub fn handle_fold(&mut self, seat: usize) {
        for pot in &mut self.pots {
            pot.players.remove(&seat);
        }
    }

    /// Checks if the betting round is over, all the players that can still bet
    /// have acted and matched the round bet.
    pub fn round_over(&self, players: &[Player]) -> bool {
        if self.betting_over(players) {
            return true;
        }

        let bet = self.current_bet();
        self.in_pot()
            .filter_map(|s| players.get(s))
            .filter(|p| !p.is_all_in())
            .all(|p| p.has_acted && p.bet >= bet)
    }

    /// Checks if the betting is over for this hand, at most one player has
    /// chips and that player has matched the round bet.
    pub fn betting_over(&self, players: &[Player]) -> bool {
        let bet = self.current_bet();
        let mut with_chips = self
            .in_pot()
            .filter_map(|s| players.get(s))
            .filter(|p| !p.is_all_in());

        match (with_chips.next(), with_chips.next()) {
            (None, _) => true,
            (Some(p), None) => p.has_acted && p.bet >= bet,
            _ => false,
        }
    }

    /// Starts a new betting round, only the last pot can take new bets.
    pub fn next_round(&mut self, players: &mut [Player]) {
        for pot in &mut self.pots {
            pot.bet = Chips::ZERO;
            pot.cap = Chips::ZERO;
        }

        for player in players.iter_mut() {
            player.start_round();
        }

        if let Some(pot) = self.pots.last_mut() {
            pot.cap = min_max_bet(&pot.players, players);
        }
    }

    /// Returns the showdown winners in seat order.
    ///
    /// Each pot goes to the best hands among its players, if there is a tie
    /// the pot is split and the odd chips are given one at a time to the
    /// winners starting from the first seat to the left of the dealer. The
    /// chips of a pot that has no players left go to the pot before it.
    pub fn get_winners(
        &self,
        players: &[Player],
        board: &[Card],
        rule: HandRule,
        dealer: usize,
    ) -> Result<Vec<Payout>, EvalError> {
        let num_seats = players.len().max(1);
        let first_seat = (dealer + 1) % num_seats;

        let mut payouts = BTreeMap::<usize, Payout>::new();
        let mut unclaimed = Chips::ZERO;

        for pot in self.pots.iter().rev() {
            let chips = pot.chips + unclaimed;
            unclaimed = Chips::ZERO;

            let mut winners = Vec::<(usize, Hand)>::new();
            for seat in pot.players() {
                let Some(player) = players.get(seat) else {
                    continue;
                };

                let hand = rule.best_hand(board, &player.cards)?;
                match winners.first().map(|(_, best)| hand.cmp(best)) {
                    None | Some(Ordering::Greater) => winners = vec![(seat, hand)],
                    Some(Ordering::Equal) => winners.push((seat, hand)),
                    Some(Ordering::Less) => {}
                }
            }

            if winners.is_empty() {
                if chips > Chips::ZERO {
                    warn!("Pot of {chips} chips has no players, moving it to the previous pot");
                    unclaimed = chips;
                }
                continue;
            }

            winners.sort_by_key(|(seat, _)| (seat + num_seats - first_seat) % num_seats);

            let num_winners = winners.len() as u32;
            let share = chips / num_winners;
            let mut odd_chips = (chips % num_winners).amount();

            for (seat, hand) in winners {
                let mut won = share;
                if odd_chips > 0 {
                    won += Chips::new(1);
                    odd_chips -= 1;
                }

                payouts
                    .entry(seat)
                    .or_insert(Payout {
                        seat,
                        chips: Chips::ZERO,
                        hand,
                    })
                    .chips += won;
            }
        }

        if unclaimed > Chips::ZERO {
            warn!("{unclaimed} chips left with no players to pay");
        }

        Ok(payouts.into_values().collect())
    }
}
