//! Board selection and focus state
//!
//! Selection lives in the game state (not the view) so that bulk actions
//! and undo see the same selection the player saw.

use crate::core::{InstanceId, PlayerId};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub selection_mode: bool,
    pub selected_ids: Vec<InstanceId>,
    pub focused_player: Option<PlayerId>,
}

impl GameState {
    /// Leaving selection mode drops the current selection
    pub fn toggle_selection_mode(&mut self) {
        self.ui.selection_mode = !self.ui.selection_mode;
        if !self.ui.selection_mode {
            self.ui.selected_ids.clear();
        }
    }

    pub fn toggle_card_selection(&mut self, card_id: InstanceId) {
        if let Some(pos) = self.ui.selected_ids.iter().position(|id| *id == card_id) {
            self.ui.selected_ids.remove(pos);
        } else {
            self.ui.selected_ids.push(card_id);
        }
    }

    pub fn select_multiple_cards(&mut self, card_ids: &[InstanceId]) {
        self.ui.selection_mode = true;
        self.ui.selected_ids = card_ids.to_vec();
    }

    pub fn clear_selection(&mut self) {
        self.ui.selected_ids.clear();
    }

    pub fn toggle_player_focus(&mut self, player_id: PlayerId) {
        self.ui.focused_player = match self.ui.focused_player {
            Some(current) if current == player_id => None,
            _ => Some(player_id),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_toggles() {
        let mut game = GameState::default();
        let a = InstanceId::new(1);
        let b = InstanceId::new(2);

        game.toggle_selection_mode();
        game.toggle_card_selection(a);
        game.toggle_card_selection(b);
        game.toggle_card_selection(a);
        assert_eq!(game.ui.selected_ids, vec![b]);

        game.toggle_selection_mode();
        assert!(!game.ui.selection_mode);
        assert!(game.ui.selected_ids.is_empty());
    }

    #[test]
    fn test_select_multiple_enables_mode() {
        let mut game = GameState::default();
        game.select_multiple_cards(&[InstanceId::new(5), InstanceId::new(6)]);
        assert!(game.ui.selection_mode);
        assert_eq!(game.ui.selected_ids.len(), 2);

        game.clear_selection();
        assert!(game.ui.selection_mode);
        assert!(game.ui.selected_ids.is_empty());
    }

    #[test]
    fn test_player_focus_toggles() {
        let mut game = GameState::default();
        let p = PlayerId::new(1);
        let q = PlayerId::new(2);

        game.toggle_player_focus(p);
        assert_eq!(game.ui.focused_player, Some(p));
        game.toggle_player_focus(q);
        assert_eq!(game.ui.focused_player, Some(q));
        game.toggle_player_focus(q);
        assert_eq!(game.ui.focused_player, None);
    }
}
