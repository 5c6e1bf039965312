//! Error types for the commander ledger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Player not found: {0}")]
    PlayerNotFound(u32),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Zone {zone} is not tracked for player {player}")]
    InvalidZone { zone: String, player: u32 },

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Invalid deck format: {0}")]
    DeckFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
