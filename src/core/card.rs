//! Card entities and their catalog data

use crate::core::{CounterSet, EntityId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for placement identities
///
/// A placement names one appearance of a card in one collection; it is
/// reissued whenever the card is cloned, tokenized or reintroduced.
#[derive(Debug)]
pub enum Placement {}

/// Stable identity of a physical card for the whole game
pub type CardId = EntityId<Card>;

/// Ephemeral identity of a card's current placement
pub type InstanceId = EntityId<Placement>;

/// What kind of object a card entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// A real card from the catalog
    Real,
    /// A token created during play
    Token,
    /// A copy made by cloning a permanent
    Copy,
    /// A stand-in for an unknown card (discards and mills from counters)
    Placeholder,
}

impl CardKind {
    /// Tokens and copies cease to exist once they leave the battlefield
    pub fn is_impermanent(&self) -> bool {
        matches!(self, CardKind::Token | CardKind::Copy)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Real => "Card",
            CardKind::Token => "Token",
            CardKind::Copy => "Copy",
            CardKind::Placeholder => "Placeholder",
        }
    }
}

/// Colour codes used by token templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
    #[serde(rename = "M")]
    Multicolor,
}

impl Color {
    /// Background colour for generated token art
    pub fn hex(&self) -> &'static str {
        match self {
            Color::White => "F8F6D8",
            Color::Blue => "C1D7E9",
            Color::Black => "BAB1AB",
            Color::Red => "E49977",
            Color::Green => "9EA48D",
            Color::Colorless => "D8D8D8",
            Color::Multicolor => "D8BC7E",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
            Color::Colorless => "C",
            Color::Multicolor => "M",
        };
        write!(f, "{code}")
    }
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Descriptive attributes copied verbatim from the card catalog
///
/// Power and toughness stay strings because printed values include "*".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    /// Catalog identifier of the printing, if the catalog supplied one
    pub catalog_id: Option<String>,
    pub name: String,
    pub type_line: String,
    pub mana_cost: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image_url: Option<String>,
    pub card_faces: Vec<CardFace>,
}

impl CardData {
    pub fn named(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        CardData {
            name: name.into(),
            type_line: type_line.into(),
            ..CardData::default()
        }
    }

    fn type_line_has(&self, word: &str) -> bool {
        self.type_line.to_lowercase().contains(word)
    }

    pub fn is_land(&self) -> bool {
        self.type_line_has("land")
    }

    /// Instants and sorceries resolve straight to the graveyard when played
    pub fn is_instant_or_sorcery(&self) -> bool {
        self.type_line_has("instant") || self.type_line_has("sorcery")
    }
}

/// What an equipment or aura is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachTarget {
    Card(InstanceId),
    Player(PlayerId),
}

/// Where a commander notionally sits while still tracked in the command list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommanderStatus {
    Library,
}

/// Printed stats saved before the first manual override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalStats {
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub type_line: String,
}

/// A card entity during play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identity, kept across zone moves
    pub id: CardId,

    /// Placement identity, unique among all tracked collections
    pub instance_id: InstanceId,

    pub kind: CardKind,

    pub data: CardData,

    pub tapped: bool,

    pub counters: CounterSet,

    pub is_commander: bool,

    /// Owner, recorded the first time control changes (commanders: from setup)
    pub owner_id: Option<PlayerId>,

    /// Equip/aura relation only, never ownership
    pub attached_to: Option<AttachTarget>,

    /// Cumulative commander tax (commanders only)
    pub commander_tax: u32,

    pub commander_status: Option<CommanderStatus>,

    /// Set while power/toughness/type are manually overridden
    pub original_stats: Option<OriginalStats>,

    /// Free-form annotation
    pub note: Option<String>,
}

impl Card {
    pub fn new(id: CardId, instance_id: InstanceId, kind: CardKind, data: CardData) -> Self {
        Card {
            id,
            instance_id,
            kind,
            data,
            tapped: false,
            counters: CounterSet::new(),
            is_commander: false,
            owner_id: None,
            attached_to: None,
            commander_tax: 0,
            commander_status: None,
            original_stats: None,
            note: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn is_token(&self) -> bool {
        self.kind == CardKind::Token
    }

    pub fn is_copy(&self) -> bool {
        self.kind == CardKind::Copy
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == CardKind::Placeholder
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Does this card answer to the given reference?
    pub fn matches(&self, card_ref: CardRef) -> bool {
        match card_ref {
            CardRef::Instance(instance_id) => self.instance_id == instance_id,
            CardRef::Card(card_id) => self.id == card_id,
        }
    }
}

/// How a caller names a card: by placement or by stable identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardRef {
    Instance(InstanceId),
    Card(CardId),
}

impl CardRef {
    /// The same raw id read as the other kind of identity
    ///
    /// Players, cards and placements share one id sequence, so a raw id
    /// names at most one of them.
    pub fn fallback(self) -> CardRef {
        match self {
            CardRef::Instance(id) => CardRef::Card(CardId::new(id.as_u32())),
            CardRef::Card(id) => CardRef::Instance(InstanceId::new(id.as_u32())),
        }
    }
}

impl From<InstanceId> for CardRef {
    fn from(id: InstanceId) -> Self {
        CardRef::Instance(id)
    }
}

impl From<CardId> for CardRef {
    fn from(id: CardId) -> Self {
        CardRef::Card(id)
    }
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRef::Instance(id) => write!(f, "instance {id}"),
            CardRef::Card(id) => write!(f, "card {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CounterType;

    fn bear() -> Card {
        let mut data = CardData::named("Grizzly Bears", "Creature — Bear");
        data.power = Some("2".to_string());
        data.toughness = Some("2".to_string());
        Card::new(CardId::new(1), InstanceId::new(2), CardKind::Real, data)
    }

    #[test]
    fn test_card_creation() {
        let card = bear();

        assert_eq!(card.name(), "Grizzly Bears");
        assert!(!card.tapped);
        assert!(!card.is_commander);
        assert!(card.owner_id.is_none());
        assert!(card.counters.is_empty());
    }

    #[test]
    fn test_card_counters() {
        let mut card = bear();

        card.counters.add(CounterType::plus_one_plus_one(), 2);
        assert_eq!(card.counters.get(&CounterType::plus_one_plus_one()), 2);

        card.counters.add(CounterType::plus_one_plus_one(), -2);
        assert!(card.counters.is_empty());
    }

    #[test]
    fn test_card_ref_matching() {
        let card = bear();

        assert!(card.matches(CardRef::Instance(InstanceId::new(2))));
        assert!(card.matches(CardRef::Card(CardId::new(1))));
        assert!(!card.matches(CardRef::Instance(InstanceId::new(1))));
    }

    #[test]
    fn test_type_line_classification() {
        assert!(CardData::named("Bolt", "Instant").is_instant_or_sorcery());
        assert!(CardData::named("Forest", "Basic Land — Forest").is_land());
        assert!(!CardData::named("Sol Ring", "Artifact").is_instant_or_sorcery());
        assert!(CardKind::Token.is_impermanent());
        assert!(CardKind::Copy.is_impermanent());
        assert!(!CardKind::Placeholder.is_impermanent());
    }
}
