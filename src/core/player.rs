//! Player representation

use crate::core::{CardId, CounterSet, EntityId, PlayerName};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub type PlayerId = EntityId<Player>;

/// Commander damage that eliminates a player from a single source
pub const LETHAL_COMMANDER_DAMAGE: i32 = 21;

/// Cards a player may keep at end of turn unless they opted out
pub const MAX_HAND_SIZE: u32 = 7;

/// A commander a player brought to the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderInfo {
    pub id: CardId,
    pub name: String,
}

/// Represents a player in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Life total (no floor)
    pub life: i32,

    /// Cards in hand, as a counter (hidden information)
    pub hand_count: u32,

    /// Cards left in library, as a counter
    pub library_count: u32,

    /// Mulligans taken before the game
    pub mulligan_count: u32,

    /// Damage received per commander source
    pub commander_damage: FxHashMap<CardId, i32>,

    /// Commanders this player owns
    pub commanders: SmallVec<[CommanderInfo; 2]>,

    /// Has the player been eliminated? Never cleared once set.
    pub eliminated: bool,

    /// Named player counters (poison, energy, ...)
    pub counters: CounterSet,

    /// Skip the end-of-turn hand size check
    pub no_max_hand_size: bool,

    /// Plays with partner commanders (98-card library)
    pub is_partner: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            hand_count: 0,
            library_count: 0,
            mulligan_count: 0,
            commander_damage: FxHashMap::default(),
            commanders: SmallVec::new(),
            eliminated: false,
            counters: CounterSet::new(),
            no_max_hand_size: false,
            is_partner: false,
        }
    }

    pub fn commander_damage_from(&self, source: CardId) -> i32 {
        self.commander_damage.get(&source).copied().unwrap_or(0)
    }

    /// Accumulate commander damage from one source and return the total
    pub fn take_commander_damage(&mut self, source: CardId, amount: i32) -> i32 {
        let total = self.commander_damage.entry(source).or_insert(0);
        *total = total.saturating_add(amount);
        *total
    }

    pub fn owns_commander(&self, card_id: CardId) -> bool {
        self.commanders.iter().any(|c| c.id == card_id)
    }

    /// Cards above the maximum hand size, zero when opted out
    pub fn hand_excess(&self) -> u32 {
        if self.no_max_hand_size {
            0
        } else {
            self.hand_count.saturating_sub(MAX_HAND_SIZE)
        }
    }
}
