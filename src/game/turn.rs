//! Turn tracking and the turn controller

use crate::core::{PlayerId, MAX_HAND_SIZE};
use crate::game::GameState;
use crate::zones::Zone;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Phase of the current turn
///
/// Only the main phase is tracked; the tag is kept so finer steps can be
/// added without changing the state shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Main,
}

/// Represents the current turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turns taken so far (0 before the first turn starts)
    pub count: u32,

    /// Active player (whose turn it is)
    pub active_player: Option<PlayerId>,

    pub phase: Phase,
}

impl TurnState {
    pub fn new() -> Self {
        TurnState {
            count: 0,
            active_player: None,
            phase: Phase::Main,
        }
    }

    /// Start a new turn
    pub fn begin(&mut self, next_player: PlayerId) {
        self.count += 1;
        self.active_player = Some(next_player);
        self.phase = Phase::Main;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Index of the next living player after `from`, scanning cyclically
    ///
    /// Bounded to one full cycle; `None` when every player is eliminated.
    pub fn next_living_player_idx(&self, from: Option<usize>) -> Option<usize> {
        let count = self.players.len();
        if count == 0 {
            return None;
        }
        // With no current player the scan starts at seat 0
        let start = from.map(|i| i + 1).unwrap_or(0);
        (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&idx| !self.players[idx].eliminated)
    }

    /// End the current turn and start the next living player's turn
    ///
    /// Cleanup discards the outgoing player's excess hand to the graveyard,
    /// then the new active player untaps and draws.
    pub fn next_turn(&mut self) -> Result<()> {
        self.end_of_turn_cleanup()?;

        let current_idx = self
            .turn
            .active_player
            .and_then(|id| self.get_player_idx(id));

        let Some(next_idx) = self.next_living_player_idx(current_idx) else {
            log::warn!("next_turn: no living player to pass the turn to");
            return Ok(());
        };
        let next_id = self.players[next_idx].id;

        self.turn.begin(next_id);

        // Untap step
        for card in self.get_player_zones_mut(next_id)?.battlefield.cards.iter_mut() {
            card.untap();
        }

        // Draw step: bookkeeping only, an empty library is not checked
        let turn_count = self.turn.count;
        let player = self.get_player_mut(next_id)?;
        player.hand_count = player.hand_count.saturating_add(1);
        player.library_count = player.library_count.saturating_sub(1);
        let message = format!(
            "Turn {}: {}'s turn. Untap & Draw. (Hand:{}:{})",
            turn_count, player.name, player.name, player.hand_count
        );
        self.log.push(message);
        Ok(())
    }

    fn end_of_turn_cleanup(&mut self) -> Result<()> {
        let Some(active_id) = self.turn.active_player else {
            return Ok(());
        };
        let Ok(player) = self.get_player(active_id) else {
            return Ok(());
        };
        if player.eliminated {
            return Ok(());
        }

        let excess = player.hand_excess();
        if excess == 0 {
            return Ok(());
        }

        self.adjust_hand(active_id, -(excess as i32), Some(Zone::Graveyard), true)?;

        let player = self.get_player(active_id)?;
        let message = format!(
            "[End Phase] {} discarded {} cards to Graveyard (Hand Limit > {}) (Hand:{}:{}).",
            player.name, excess, MAX_HAND_SIZE, player.name, player.hand_count
        );
        self.log.push(message);
        Ok(())
    }
}
