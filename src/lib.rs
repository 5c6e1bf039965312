//! Commander Ledger - authoritative game state for multiplayer Commander
//!
//! The engine tracks life totals, commander damage and tax, hand and
//! library counts, the cards on each battlefield and a timestamped game
//! log. Every change is an [`game::Action`] dispatched through a
//! [`game::Store`], which keeps a bounded undo history.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod zones;

pub use error::{LedgerError, Result};
pub use game::{Action, DispatchOutcome, GameState, Store};
