//! Game state, the action reducer and the dispatching store

pub mod actions;
pub mod commander;
pub mod counters;
pub mod deck;
pub mod history;
pub mod logger;
pub mod permanents;
pub mod sandbox;
pub mod setup;
pub mod state;
pub mod store;
pub mod transfer;
pub mod turn;
pub mod ui;


pub use actions::Action;
pub use counters::{COMMANDER_TAX_INCREMENT, MAX_PLACEHOLDERS};
pub use history::{History, MAX_HISTORY};
pub use logger::{Clock, FixedClock, GameLog, OutputMode, SystemClock};
pub use permanents::{CardProperty, StatusUpdate, TokenTemplate};
pub use sandbox::{SimDestination, SimQuery, OPENING_HAND_SIZE};
pub use setup::{GameOptions, PlayerSetup, DECK_SIZE, PARTNER_DECK_SIZE};
pub use state::{GameMode, GameState, Settings};
pub use store::{DispatchOutcome, Store, SubscriptionId};
pub use transfer::{transfer_rule, CardClass, TransferOutcome, TransferRequest, TransferRule};
pub use turn::{Phase, TurnState};
pub use ui::UiState;
