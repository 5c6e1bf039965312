//! Main game state structure

use crate::core::{Card, CardData, CardKind, EntityId, IdGenerator, Player, PlayerId};
use crate::game::{GameLog, TurnState, UiState};
use crate::zones::{PlayerZones, Zone};
use crate::{LedgerError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the board is being used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Full board with counters for hidden zones
    #[default]
    Full,
    /// Life totals only; same engine, lighter presentation
    LifeCounter,
    /// Deck editing with tracked library objects and the hand simulator
    DeckBuilder,
}

impl GameMode {
    /// Does this mode keep real library and sideboard objects?
    pub fn tracks_library(&self) -> bool {
        matches!(self, GameMode::DeckBuilder)
    }
}

/// Table settings that survive a restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub player_count: usize,
    pub starting_life: i32,
    pub game_mode: GameMode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            player_count: 4,
            starting_life: 40,
            game_mode: GameMode::Full,
        }
    }
}

/// Complete game state
///
/// This is the one value every action mutates. It is cheap enough to
/// clone whole for undo snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Players in seating (turn) order
    pub players: Vec<Player>,

    /// Zones for each player
    pub player_zones: Vec<(PlayerId, PlayerZones)>,

    pub turn: TurnState,

    /// Player-visible log, newest first
    pub log: GameLog,

    pub game_started: bool,

    pub winner: Option<PlayerId>,

    pub settings: Settings,

    pub ui: UiState,

    /// Unified entity ID generator (players, cards, placements)
    ids: IdGenerator,

    /// Random number generator for turn order and simulator shuffles
    ///
    /// Part of the state so undo rewinds it and seeded games replay exactly.
    pub rng: ChaCha12Rng,
}

impl GameState {
    /// Create an empty, not yet started game
    pub fn new(settings: Settings) -> Self {
        GameState {
            players: Vec::new(),
            player_zones: Vec::new(),
            turn: TurnState::new(),
            log: GameLog::new(),
            game_started: false,
            winner: None,
            settings,
            ui: UiState::default(),
            ids: IdGenerator::new(),
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create an empty game with a deterministic RNG
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        let mut game = Self::new(settings);
        game.seed_rng(seed);
        game
    }

    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Clear the table: settings, RNG and the ID sequence are kept
    pub fn reset(&mut self) {
        self.players.clear();
        self.player_zones.clear();
        self.turn = TurnState::new();
        self.log.clear();
        self.game_started = false;
        self.winner = None;
        self.ui = UiState::default();
    }

    /// Get next entity ID (unified across all entity types)
    pub fn next_id<T>(&mut self) -> EntityId<T> {
        self.ids.next()
    }

    /// Seat a new player with an empty set of zones for the current mode
    pub fn add_player(&mut self, name: impl Into<crate::core::PlayerName>, life: i32) -> PlayerId {
        let id = self.next_player_id();
        self.players.push(Player::new(id, name, life));
        let zones = if self.settings.game_mode.tracks_library() {
            PlayerZones::with_tracked_library(id)
        } else {
            PlayerZones::new(id)
        };
        self.player_zones.push((id, zones));
        id
    }

    pub fn next_player_id(&mut self) -> PlayerId {
        self.next_id()
    }

    /// Build a card entity with fresh stable and placement identities
    pub fn make_card(&mut self, kind: CardKind, data: CardData) -> Card {
        let id = self.next_id();
        let instance_id = self.next_id();
        Card::new(id, instance_id, kind, data)
    }

    /// Give a card a new placement identity
    pub fn reissue_placement(&mut self, card: &mut Card) {
        card.instance_id = self.next_id();
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(LedgerError::PlayerNotFound(id.as_u32()))
    }

    /// Get a mutable player by ID
    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(LedgerError::PlayerNotFound(id.as_u32()))
    }

    /// Get the index of a player by ID
    pub fn get_player_idx(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Display name of a player, for log lines
    pub fn player_name(&self, id: PlayerId) -> Result<String> {
        Ok(self.get_player(id)?.name.to_string())
    }

    /// Get player zones for a specific player
    pub fn get_player_zones(&self, player_id: PlayerId) -> Result<&PlayerZones> {
        self.player_zones
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|(_, zones)| zones)
            .ok_or(LedgerError::PlayerNotFound(player_id.as_u32()))
    }

    /// Get mutable player zones for a specific player
    pub fn get_player_zones_mut(&mut self, player_id: PlayerId) -> Result<&mut PlayerZones> {
        self.player_zones
            .iter_mut()
            .find(|(id, _)| *id == player_id)
            .map(|(_, zones)| zones)
            .ok_or(LedgerError::PlayerNotFound(player_id.as_u32()))
    }

    /// Does this player have a tracked collection for the zone?
    pub fn has_zone(&self, player_id: PlayerId, zone: Zone) -> bool {
        self.get_player_zones(player_id)
            .map(|zones| zones.get_zone(zone).is_some())
            .unwrap_or(false)
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.eliminated)
    }

    /// Check that no placement identity appears twice across all collections
    pub fn placements_are_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.player_zones
            .iter()
            .flat_map(|(_, zones)| zones.all_zones())
            .flat_map(|zone| zone.iter())
            .all(|card| seen.insert(card.instance_id))
    }

    /// Every card in every tracked collection, with its holder and zone
    pub fn all_cards(&self) -> impl Iterator<Item = (PlayerId, Zone, &Card)> {
        self.player_zones.iter().flat_map(|(player_id, zones)| {
            zones
                .all_zones()
                .flat_map(move |zone| zone.iter().map(move |card| (*player_id, zone.zone_type, card)))
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
