//! Action dispatcher with undo history and change notification
//!
//! The store owns the one authoritative [`GameState`]. Every change goes
//! through [`Store::dispatch`], which snapshots for undo, applies the
//! action atomically and tells subscribers about the new state.

use crate::game::{Action, Clock, GameState, History, OutputMode, Settings};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

/// What happened to a dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    /// The previous snapshot was restored
    Undone,
    /// UNDO with an empty history; state untouched
    NothingToUndo,
    /// The action was rejected and the state left as it was
    Ignored(String),
}

impl DispatchOutcome {
    pub fn changed_state(&self) -> bool {
        matches!(self, DispatchOutcome::Applied | DispatchOutcome::Undone)
    }
}

type Subscriber = Box<dyn FnMut(&GameState)>;

pub struct Store {
    state: GameState,
    history: History,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u32,
}

impl Store {
    pub fn new(state: GameState) -> Self {
        Store {
            state,
            history: History::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// A store over an empty game with a deterministic RNG
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(GameState::with_seed(settings, seed))
    }

    /// Stamp log lines with the given clock from now on
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.state.log.set_clock(clock);
        self
    }

    /// Echo each new log line to stdout (or stop echoing)
    pub fn set_log_output(&mut self, mode: OutputMode) {
        self.state.log.set_output_mode(mode);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Apply one action, then notify every subscriber once
    ///
    /// Never fails: a rejected action leaves the state exactly as it was
    /// and comes back as [`DispatchOutcome::Ignored`]. Subscribers are
    /// called on every outcome.
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        let outcome = self.dispatch_quiet(action);
        self.notify();
        outcome
    }

    fn dispatch_quiet(&mut self, action: Action) -> DispatchOutcome {
        if action == Action::Undo {
            return self.undo();
        }

        let name = action.name();
        let records = action.records_history();
        let before = self.state.clone();

        match self.state.apply(action) {
            Ok(()) => {
                if records && before.game_started {
                    self.history.push(before);
                }
                log::trace!("{name} applied (history {})", self.history.len());
                DispatchOutcome::Applied
            }
            Err(err) => {
                log::warn!("{name} ignored: {err}");
                self.state = before;
                DispatchOutcome::Ignored(err.to_string())
            }
        }
    }

    /// Dispatch by wire name, as a presentation layer would
    pub fn dispatch_json(&mut self, name: &str, payload: serde_json::Value) -> DispatchOutcome {
        match Action::from_parts(name, payload) {
            Ok(action) => self.dispatch(action),
            Err(err) => {
                log::warn!("unknown or malformed action {name}: {err}");
                self.notify();
                DispatchOutcome::Ignored(err.to_string())
            }
        }
    }

    fn undo(&mut self) -> DispatchOutcome {
        let Some(snapshot) = self.history.pop() else {
            log::debug!("UNDO with empty history");
            return DispatchOutcome::NothingToUndo;
        };
        self.state = snapshot;
        self.state.log.push("Undid last action.");
        DispatchOutcome::Undone
    }

    /// Call `callback` with the current state after every dispatch
    pub fn subscribe(&mut self, callback: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(GameState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::game::{GameOptions, PlayerSetup, MAX_HISTORY};
    use std::cell::Cell;

    fn started() -> (Store, PlayerId) {
        let mut store = Store::with_seed(Settings::default(), 8);
        let outcome = store.dispatch(Action::InitGame {
            players: vec![PlayerSetup::named("Alice"), PlayerSetup::named("Bob")],
            options: GameOptions {
                randomize_turn_order: false,
                ..GameOptions::default()
            },
        });
        assert_eq!(outcome, DispatchOutcome::Applied);
        let alice = store.state().players[0].id;
        (store, alice)
    }

    #[test]
    fn test_init_is_not_undoable() {
        let (mut store, _) = started();
        assert_eq!(store.history_len(), 0);
        assert_eq!(store.dispatch(Action::Undo), DispatchOutcome::NothingToUndo);
        assert!(store.state().game_started);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let (mut store, alice) = started();
        let before = store.state().clone();

        store.dispatch(Action::UpdateLife {
            player_id: alice,
            amount: -7,
        });
        assert_eq!(store.state().get_player(alice).unwrap().life, 33);

        assert_eq!(store.dispatch(Action::Undo), DispatchOutcome::Undone);
        assert_eq!(store.state().players, before.players);
        assert_eq!(store.state().log.latest().map(|l| l.ends_with("Undid last action.")), Some(true));
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let (mut store, _) = started();
        let before = store.state().clone();

        let outcome = store.dispatch(Action::UpdateLife {
            player_id: PlayerId::new(999),
            amount: -1,
        });

        assert!(matches!(outcome, DispatchOutcome::Ignored(_)));
        assert_eq!(store.state(), &before);
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_nothing_recorded_before_start() {
        let mut store = Store::default();
        store.dispatch(Action::AddMemo {
            text: "setup note".to_string(),
        });
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_history_is_capped() {
        let (mut store, alice) = started();
        for _ in 0..(MAX_HISTORY + 5) {
            store.dispatch(Action::UpdateLife {
                player_id: alice,
                amount: -1,
            });
        }
        assert_eq!(store.history_len(), MAX_HISTORY);
    }

    #[test]
    fn test_subscribers_see_every_dispatch() {
        let (mut store, alice) = started();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let id = store.subscribe(move |_| seen.set(seen.get() + 1));

        store.dispatch(Action::UpdateLife {
            player_id: alice,
            amount: 1,
        });
        store.dispatch(Action::Undo);
        assert_eq!(calls.get(), 2);

        // No-ops still notify once each
        assert_eq!(store.dispatch(Action::Undo), DispatchOutcome::NothingToUndo);
        let unknown = store.dispatch_json("FLIP_TABLE", serde_json::Value::Null);
        assert!(matches!(unknown, DispatchOutcome::Ignored(_)));
        let missing = store.dispatch(Action::UpdateLife {
            player_id: PlayerId::new(999),
            amount: 1,
        });
        assert!(matches!(missing, DispatchOutcome::Ignored(_)));
        assert_eq!(calls.get(), 5);

        assert!(store.unsubscribe(id));
        store.dispatch(Action::NextTurn);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_dispatch_json() {
        let (mut store, alice) = started();
        let outcome = store.dispatch_json(
            "UPDATE_LIFE",
            serde_json::json!({"player_id": alice.as_u32(), "amount": -3}),
        );
        assert_eq!(outcome, DispatchOutcome::Applied);
        assert_eq!(store.state().get_player(alice).unwrap().life, 37);

        let unknown = store.dispatch_json("FLIP_TABLE", serde_json::Value::Null);
        assert!(matches!(unknown, DispatchOutcome::Ignored(_)));
    }
}
