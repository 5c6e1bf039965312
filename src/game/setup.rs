//! Game initialization and restart

use crate::core::{Card, CardData, CardKind, CommanderInfo, Player, MAX_HAND_SIZE};
use crate::game::{GameMode, GameState, TurnState, UiState};
use crate::loader::CatalogCard;
use crate::zones::PlayerZones;
use crate::{LedgerError, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Cards in a singleton deck besides one commander
pub const DECK_SIZE: u32 = 99;

/// Cards in a deck led by partner commanders
pub const PARTNER_DECK_SIZE: u32 = 98;

/// One seat as entered on the setup screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    /// Defaults to "Player N"
    pub name: Option<String>,
    /// Defaults to the table's starting life
    pub life: Option<i32>,
    pub mulligan_count: u32,
    pub commanders: Vec<CatalogCard>,
    pub is_partner: bool,
}

impl PlayerSetup {
    pub fn named(name: impl Into<String>) -> Self {
        PlayerSetup {
            name: Some(name.into()),
            ..PlayerSetup::default()
        }
    }

    /// Opening hand after mulligans; the first mulligan is free
    pub fn opening_hand(&self) -> u32 {
        MAX_HAND_SIZE.saturating_sub(self.mulligan_count.saturating_sub(1))
    }

    pub fn plays_partners(&self) -> bool {
        self.is_partner || self.commanders.len() > 1
    }

    pub fn deck_size(&self) -> u32 {
        if self.plays_partners() {
            PARTNER_DECK_SIZE
        } else {
            DECK_SIZE
        }
    }
}

/// Options chosen when starting a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub randomize_turn_order: bool,
    pub mode: GameMode,
    /// Reseed the RNG for a reproducible game
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            randomize_turn_order: true,
            mode: GameMode::Full,
            seed: None,
        }
    }
}

impl GameState {
    /// Seat the players and start the first turn
    ///
    /// Players, zones, turn and winner are rebuilt from scratch; settings
    /// other than the mode and the log carry over.
    pub fn init_game(&mut self, setups: &[PlayerSetup], options: &GameOptions) -> Result<()> {
        if setups.is_empty() {
            return Err(LedgerError::InvalidAction("a game needs at least one player".to_string()));
        }
        if let Some(seed) = options.seed {
            self.seed_rng(seed);
        }
        self.settings.game_mode = options.mode;
        self.settings.player_count = setups.len();

        let mut seats: Vec<(Player, PlayerZones)> = Vec::with_capacity(setups.len());
        for (index, setup) in setups.iter().enumerate() {
            let id = self.next_player_id();
            let name = setup
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Player {}", index + 1));

            let mut player = Player::new(id, name, setup.life.unwrap_or(self.settings.starting_life));
            let opening_hand = setup.opening_hand();
            player.hand_count = opening_hand;
            player.library_count = setup.deck_size().saturating_sub(opening_hand);
            player.mulligan_count = setup.mulligan_count;
            player.is_partner = setup.plays_partners();

            let mut zones = if options.mode.tracks_library() {
                PlayerZones::with_tracked_library(id)
            } else {
                PlayerZones::new(id)
            };
            for record in &setup.commanders {
                let commander = self.new_commander(record, id);
                player.commanders.push(CommanderInfo {
                    id: commander.id,
                    name: commander.data.name.clone(),
                });
                zones.command.add(commander);
            }
            seats.push((player, zones));
        }

        if options.randomize_turn_order {
            seats.shuffle(&mut self.rng);
        }

        self.players.clear();
        self.player_zones.clear();
        for (player, zones) in seats {
            self.player_zones.push((player.id, zones));
            self.players.push(player);
        }
        self.turn = TurnState::new();
        self.winner = None;
        self.ui = UiState::default();
        self.game_started = true;

        for player in &self.players {
            let message = if player.mulligan_count > 0 {
                format!(
                    "{} started with {} mulligan(s) ({}:{}).",
                    player.name, player.mulligan_count, player.name, player.hand_count
                )
            } else {
                format!(
                    "{} kept starting hand (Mulligan: 0, {}:{}).",
                    player.name, player.name, player.hand_count
                )
            };
            self.log.push(message);
        }
        log::debug!("game started with {} players", self.players.len());

        self.next_turn()
    }

    fn new_commander(&mut self, record: &CatalogCard, owner: crate::core::PlayerId) -> Card {
        let mut card = self.make_card(CardKind::Real, CardData::from(record.clone()));
        card.is_commander = true;
        card.commander_tax = 0;
        card.owner_id = Some(owner);
        card
    }

    /// Back to the setup screen: settings and RNG survive, everything else resets
    pub fn restart_game(&mut self) {
        self.reset();
        self.log.push("Game has been restarted.");
    }
}
