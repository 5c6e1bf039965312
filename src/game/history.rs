//! Bounded undo history of whole-state snapshots
//!
//! Snapshots are plain clones of [`GameState`]. Player and card counts
//! are small, so a clone per mutating action is affordable and keeps undo
//! exact (the RNG and the log rewind too).

use crate::game::GameState;
use std::collections::VecDeque;

/// Number of undo steps kept; older snapshots are evicted first
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct History {
    /// Most recent at the back
    snapshots: VecDeque<GameState>,
}

impl History {
    pub fn new() -> Self {
        History {
            snapshots: VecDeque::with_capacity(MAX_HISTORY),
        }
    }

    /// Store a snapshot, evicting the oldest one past the limit
    pub fn push(&mut self, snapshot: GameState) {
        if self.snapshots.len() == MAX_HISTORY {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<GameState> {
        self.snapshots.pop_back()
    }

    pub fn peek(&self) -> Option<&GameState> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Settings;

    fn state_with_life(life: i32) -> GameState {
        let mut game = GameState::with_seed(Settings::default(), 0);
        game.add_player("Alice", life);
        game
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new();
        history.push(state_with_life(1));
        history.push(state_with_life(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().players[0].life, 2);
        assert_eq!(history.pop().unwrap().players[0].life, 1);
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_oldest_snapshot_is_evicted() {
        let mut history = History::new();
        for life in 0..(MAX_HISTORY as i32 + 5) {
            history.push(state_with_life(life));
        }

        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.peek().unwrap().players[0].life, MAX_HISTORY as i32 + 4);

        let mut oldest = None;
        while let Some(snapshot) = history.pop() {
            oldest = Some(snapshot.players[0].life);
        }
        assert_eq!(oldest, Some(5));
    }
}
