//! Game zones (Battlefield, Graveyard, Exile, Command, and mode-tracked ones)

use crate::core::{Card, CardRef, InstanceId, PlayerId};
use crate::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named places a card entity can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Battlefield,
    #[serde(alias = "grave")]
    Graveyard,
    Exile,
    Command,
    Hand,
    Library,
    Sideboard,
    SimLibrary,
    SimHand,
    #[serde(alias = "sim_grave")]
    SimGraveyard,
}

impl Zone {
    /// Name used in player-visible log lines
    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Battlefield => "Battlefield",
            Zone::Graveyard => "Graveyard",
            Zone::Exile => "Exile",
            Zone::Command => "Command Zone",
            Zone::Hand => "Hand",
            Zone::Library => "Library",
            Zone::Sideboard => "Sideboard",
            Zone::SimLibrary => "Simulated Library",
            Zone::SimHand => "Simulated Hand",
            Zone::SimGraveyard => "Simulated Graveyard",
        }
    }

    /// Zones that only exist inside the hand simulator
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Zone::SimLibrary | Zone::SimHand | Zone::SimGraveyard)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Zone {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "battlefield" => Ok(Zone::Battlefield),
            "grave" | "graveyard" => Ok(Zone::Graveyard),
            "exile" => Ok(Zone::Exile),
            "command" => Ok(Zone::Command),
            "hand" => Ok(Zone::Hand),
            "library" => Ok(Zone::Library),
            "sideboard" => Ok(Zone::Sideboard),
            "sim_library" => Ok(Zone::SimLibrary),
            "sim_hand" => Ok(Zone::SimHand),
            "sim_grave" | "sim_graveyard" => Ok(Zone::SimGraveyard),
            other => Err(LedgerError::InvalidAction(format!("unknown zone '{other}'"))),
        }
    }
}

/// An ordered collection of card entities
///
/// For libraries the top card is the last element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Player whose collection this is
    pub owner: PlayerId,

    /// Cards in this zone
    pub cards: Vec<Card>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerId) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Position of a card, preferring placement identity over stable identity
    pub fn position(&self, card_ref: CardRef) -> Option<usize> {
        self.cards
            .iter()
            .position(|c| c.matches(card_ref))
            .or_else(|| self.cards.iter().position(|c| c.matches(card_ref.fallback())))
    }

    pub fn remove(&mut self, card_ref: CardRef) -> Option<Card> {
        // remove() keeps the remaining order, which the board layout relies on
        self.position(card_ref).map(|pos| self.cards.remove(pos))
    }

    pub fn get(&self, card_ref: CardRef) -> Option<&Card> {
        self.position(card_ref).map(|pos| &self.cards[pos])
    }

    pub fn get_mut(&mut self, card_ref: CardRef) -> Option<&mut Card> {
        let pos = self.position(card_ref)?;
        self.cards.get_mut(pos)
    }

    pub fn contains_instance(&self, instance_id: InstanceId) -> bool {
        self.cards.iter().any(|c| c.instance_id == instance_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top (for libraries)
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put cards underneath the current bottom, keeping their order
    pub fn add_to_bottom(&mut self, cards: Vec<Card>) {
        self.cards.splice(0..0, cards);
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// The hand simulator's private collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxZones {
    pub library: CardZone,
    pub hand: CardZone,
    pub graveyard: CardZone,
    /// Mulligans taken since the simulation started
    pub mulligans: u32,
}

impl SandboxZones {
    pub fn new(player_id: PlayerId) -> Self {
        SandboxZones {
            library: CardZone::new(Zone::SimLibrary, player_id),
            hand: CardZone::new(Zone::SimHand, player_id),
            graveyard: CardZone::new(Zone::SimGraveyard, player_id),
            mulligans: 0,
        }
    }
}

/// Collection of all zones for a player
///
/// The hand collection only holds objects explicitly returned to hand;
/// the authoritative hand size is `Player::hand_count`. Library and
/// sideboard collections exist only in modes that track real objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub battlefield: CardZone,
    pub graveyard: CardZone,
    pub exile: CardZone,
    pub command: CardZone,
    pub hand: CardZone,
    pub library: Option<CardZone>,
    pub sideboard: Option<CardZone>,
    pub sandbox: Option<SandboxZones>,
}

impl PlayerZones {
    pub fn new(player_id: PlayerId) -> Self {
        PlayerZones {
            battlefield: CardZone::new(Zone::Battlefield, player_id),
            graveyard: CardZone::new(Zone::Graveyard, player_id),
            exile: CardZone::new(Zone::Exile, player_id),
            command: CardZone::new(Zone::Command, player_id),
            hand: CardZone::new(Zone::Hand, player_id),
            library: None,
            sideboard: None,
            sandbox: None,
        }
    }

    /// Zones with tracked library and sideboard collections
    pub fn with_tracked_library(player_id: PlayerId) -> Self {
        PlayerZones {
            library: Some(CardZone::new(Zone::Library, player_id)),
            sideboard: Some(CardZone::new(Zone::Sideboard, player_id)),
            ..PlayerZones::new(player_id)
        }
    }

    pub fn get_zone(&self, zone: Zone) -> Option<&CardZone> {
        match zone {
            Zone::Battlefield => Some(&self.battlefield),
            Zone::Graveyard => Some(&self.graveyard),
            Zone::Exile => Some(&self.exile),
            Zone::Command => Some(&self.command),
            Zone::Hand => Some(&self.hand),
            Zone::Library => self.library.as_ref(),
            Zone::Sideboard => self.sideboard.as_ref(),
            Zone::SimLibrary => self.sandbox.as_ref().map(|s| &s.library),
            Zone::SimHand => self.sandbox.as_ref().map(|s| &s.hand),
            Zone::SimGraveyard => self.sandbox.as_ref().map(|s| &s.graveyard),
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> Option<&mut CardZone> {
        match zone {
            Zone::Battlefield => Some(&mut self.battlefield),
            Zone::Graveyard => Some(&mut self.graveyard),
            Zone::Exile => Some(&mut self.exile),
            Zone::Command => Some(&mut self.command),
            Zone::Hand => Some(&mut self.hand),
            Zone::Library => self.library.as_mut(),
            Zone::Sideboard => self.sideboard.as_mut(),
            Zone::SimLibrary => self.sandbox.as_mut().map(|s| &mut s.library),
            Zone::SimHand => self.sandbox.as_mut().map(|s| &mut s.hand),
            Zone::SimGraveyard => self.sandbox.as_mut().map(|s| &mut s.graveyard),
        }
    }

    /// Every tracked collection, for whole-state invariants
    pub fn all_zones(&self) -> impl Iterator<Item = &CardZone> {
        [
            Some(&self.battlefield),
            Some(&self.graveyard),
            Some(&self.exile),
            Some(&self.command),
            Some(&self.hand),
            self.library.as_ref(),
            self.sideboard.as_ref(),
            self.sandbox.as_ref().map(|s| &s.library),
            self.sandbox.as_ref().map(|s| &s.hand),
            self.sandbox.as_ref().map(|s| &s.graveyard),
        ]
        .into_iter()
        .flatten()
    }
}
