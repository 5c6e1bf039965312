//! Core game types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{
    AttachTarget, Card, CardData, CardFace, CardId, CardKind, CardRef, Color, CommanderStatus,
    InstanceId, OriginalStats, Placement,
};
pub use entity::{EntityId, IdGenerator};
pub use player::{CommanderInfo, Player, PlayerId, LETHAL_COMMANDER_DAMAGE, MAX_HAND_SIZE};
pub use types::{fuzzy_rank, normalize_card_name, CounterSet, CounterType, PlayerName};
