//! The closed set of game actions and the reducer that applies them
//!
//! Actions serialize externally tagged by their wire name, so a script
//! line such as `{"UPDATE_LIFE": {"player_id": 3, "amount": -5}}` maps
//! straight onto a variant.

use crate::core::{AttachTarget, CardData, CardId, CardRef, CounterType, InstanceId, PlayerId};
use crate::game::permanents::{CardProperty, StatusUpdate, TokenTemplate};
use crate::game::sandbox::{SimDestination, SimQuery};
use crate::game::setup::{GameOptions, PlayerSetup};
use crate::game::GameState;
use crate::loader::{CatalogCard, DeckDocument};
use crate::zones::Zone;
use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};

fn one() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Seat players and start the first turn
    InitGame {
        players: Vec<PlayerSetup>,
        #[serde(default)]
        options: GameOptions,
    },

    NextTurn,

    MoveCard {
        player_id: PlayerId,
        card_id: CardRef,
        source_zone: Zone,
        destination: Zone,
    },

    UpdateLife {
        player_id: PlayerId,
        amount: i32,
    },

    UpdateHand {
        player_id: PlayerId,
        amount: i32,
    },

    /// Free-form log line
    LogAction {
        message: String,
    },

    UpdateCommanderDamage {
        player_id: PlayerId,
        source_id: CardId,
        amount: i32,
        source_name: String,
    },

    Undo,

    RestartGame,

    AddCardToBattlefield {
        player_id: PlayerId,
        card: CatalogCard,
    },

    AddCardToDeck {
        player_id: PlayerId,
        card: CatalogCard,
    },

    ToggleTap {
        player_id: PlayerId,
        card_id: InstanceId,
    },

    #[serde(alias = "ADD_COUNTER")]
    ModifyCardCounter {
        player_id: PlayerId,
        card_id: InstanceId,
        counter_type: CounterType,
        value: i32,
    },

    DeleteCard {
        player_id: PlayerId,
        card_id: InstanceId,
    },

    CloneCard {
        player_id: PlayerId,
        card_id: InstanceId,
    },

    ChangeControl {
        card_id: CardRef,
        current_controller_id: PlayerId,
        new_controller_id: PlayerId,
    },

    CastCommander {
        player_id: PlayerId,
        card_id: CardId,
    },

    AdjustLibrary {
        player_id: PlayerId,
        amount: i32,
        #[serde(default)]
        destination: Option<Zone>,
        #[serde(default)]
        silent: bool,
    },

    AdjustHandComplex {
        player_id: PlayerId,
        amount: i32,
        #[serde(default)]
        destination: Option<Zone>,
        #[serde(default)]
        silent: bool,
    },

    /// `None` flips the current setting
    ToggleNoMaxHand {
        player_id: PlayerId,
        #[serde(default)]
        value: Option<bool>,
    },

    AttachCard {
        player_id: PlayerId,
        source_id: InstanceId,
        target: AttachTarget,
    },

    AddToken {
        player_id: PlayerId,
        token: TokenTemplate,
    },

    UpdatePlayerCounter {
        player_id: PlayerId,
        counter_name: CounterType,
        count: i32,
    },

    UpdateCardStatus {
        player_id: PlayerId,
        card_id: InstanceId,
        status: StatusUpdate,
    },

    UpdateCardProperty {
        player_id: PlayerId,
        card_id: InstanceId,
        property: CardProperty,
        #[serde(default)]
        zone: Option<Zone>,
    },

    AddMemo {
        text: String,
    },

    ToggleSelectionMode,

    ToggleCardSelection {
        card_id: InstanceId,
    },

    ClearSelection,

    SelectMultipleCards {
        card_ids: Vec<InstanceId>,
    },

    TogglePlayerFocus {
        player_id: PlayerId,
    },

    LoadDeckData {
        player_id: PlayerId,
        deck: DeckDocument,
    },

    TestInitHand {
        player_id: PlayerId,
    },

    TestMulligan {
        player_id: PlayerId,
    },

    TestDraw {
        player_id: PlayerId,
        #[serde(default = "one")]
        count: usize,
    },

    TestSearch {
        player_id: PlayerId,
        query: SimQuery,
        #[serde(default)]
        destination: SimDestination,
    },

    TestUse {
        player_id: PlayerId,
        card_id: InstanceId,
    },
}

impl Action {
    /// Wire name of the action
    pub fn name(&self) -> &'static str {
        match self {
            Action::InitGame { .. } => "INIT_GAME",
            Action::NextTurn => "NEXT_TURN",
            Action::MoveCard { .. } => "MOVE_CARD",
            Action::UpdateLife { .. } => "UPDATE_LIFE",
            Action::UpdateHand { .. } => "UPDATE_HAND",
            Action::LogAction { .. } => "LOG_ACTION",
            Action::UpdateCommanderDamage { .. } => "UPDATE_COMMANDER_DAMAGE",
            Action::Undo => "UNDO",
            Action::RestartGame => "RESTART_GAME",
            Action::AddCardToBattlefield { .. } => "ADD_CARD_TO_BATTLEFIELD",
            Action::AddCardToDeck { .. } => "ADD_CARD_TO_DECK",
            Action::ToggleTap { .. } => "TOGGLE_TAP",
            Action::ModifyCardCounter { .. } => "MODIFY_CARD_COUNTER",
            Action::DeleteCard { .. } => "DELETE_CARD",
            Action::CloneCard { .. } => "CLONE_CARD",
            Action::ChangeControl { .. } => "CHANGE_CONTROL",
            Action::CastCommander { .. } => "CAST_COMMANDER",
            Action::AdjustLibrary { .. } => "ADJUST_LIBRARY",
            Action::AdjustHandComplex { .. } => "ADJUST_HAND_COMPLEX",
            Action::ToggleNoMaxHand { .. } => "TOGGLE_NO_MAX_HAND",
            Action::AttachCard { .. } => "ATTACH_CARD",
            Action::AddToken { .. } => "ADD_TOKEN",
            Action::UpdatePlayerCounter { .. } => "UPDATE_PLAYER_COUNTER",
            Action::UpdateCardStatus { .. } => "UPDATE_CARD_STATUS",
            Action::UpdateCardProperty { .. } => "UPDATE_CARD_PROPERTY",
            Action::AddMemo { .. } => "ADD_MEMO",
            Action::ToggleSelectionMode => "TOGGLE_SELECTION_MODE",
            Action::ToggleCardSelection { .. } => "TOGGLE_CARD_SELECTION",
            Action::ClearSelection => "CLEAR_SELECTION",
            Action::SelectMultipleCards { .. } => "SELECT_MULTIPLE_CARDS",
            Action::TogglePlayerFocus { .. } => "TOGGLE_PLAYER_FOCUS",
            Action::LoadDeckData { .. } => "LOAD_DECK_DATA",
            Action::TestInitHand { .. } => "TEST_INIT_HAND",
            Action::TestMulligan { .. } => "TEST_MULLIGAN",
            Action::TestDraw { .. } => "TEST_DRAW",
            Action::TestSearch { .. } => "TEST_SEARCH",
            Action::TestUse { .. } => "TEST_USE",
        }
    }

    /// Does this action get an undo snapshot?
    pub fn records_history(&self) -> bool {
        !matches!(self, Action::Undo | Action::InitGame { .. } | Action::RestartGame)
    }

    /// Build an action from its wire name and a JSON payload
    ///
    /// Unit actions accept any payload (usually `null`).
    pub fn from_parts(name: &str, payload: serde_json::Value) -> Result<Self> {
        let value = match payload {
            serde_json::Value::Null => serde_json::Value::String(name.to_string()),
            payload => {
                let mut object = serde_json::Map::new();
                object.insert(name.to_string(), payload);
                serde_json::Value::Object(object)
            }
        };
        match serde_json::from_value(value) {
            Ok(action) => Ok(action),
            // A unit action sent with a payload object
            Err(_) => Ok(serde_json::from_value(serde_json::Value::String(name.to_string()))?),
        }
    }
}

impl GameState {
    /// Apply one action to the state
    ///
    /// Undo is not an operation on a single state; the store handles it.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::InitGame { players, options } => self.init_game(&players, &options),
            Action::NextTurn => self.next_turn(),
            Action::MoveCard {
                player_id,
                card_id,
                source_zone,
                destination,
            } => self.move_card(player_id, card_id, source_zone, destination).map(|_| ()),
            Action::UpdateLife { player_id, amount } => self.update_life(player_id, amount),
            Action::UpdateHand { player_id, amount } => self.update_hand(player_id, amount),
            Action::LogAction { message } => {
                self.log_action(&message);
                Ok(())
            }
            Action::UpdateCommanderDamage {
                player_id,
                source_id,
                amount,
                source_name,
            } => self.update_commander_damage(player_id, source_id, amount, &source_name),
            Action::Undo => Err(LedgerError::InvalidAction(
                "UNDO needs the store's history".to_string(),
            )),
            Action::RestartGame => {
                self.restart_game();
                Ok(())
            }
            Action::AddCardToBattlefield { player_id, card } => self
                .add_card_to_battlefield(player_id, CardData::from(card))
                .map(|_| ()),
            Action::AddCardToDeck { player_id, card } => self
                .add_card_to_deck(player_id, CardData::from(card))
                .map(|_| ()),
            Action::ToggleTap { player_id, card_id } => self.toggle_tap(player_id, card_id),
            Action::ModifyCardCounter {
                player_id,
                card_id,
                counter_type,
                value,
            } => self.modify_card_counter(player_id, card_id, counter_type, value),
            Action::DeleteCard { player_id, card_id } => self.delete_card(player_id, card_id),
            Action::CloneCard { player_id, card_id } => self.clone_card(player_id, card_id).map(|_| ()),
            Action::ChangeControl {
                card_id,
                current_controller_id,
                new_controller_id,
            } => self.change_control(card_id, current_controller_id, new_controller_id),
            Action::CastCommander { player_id, card_id } => {
                self.cast_commander(player_id, card_id).map(|_| ())
            }
            Action::AdjustLibrary {
                player_id,
                amount,
                destination,
                silent,
            } => self.adjust_library(player_id, amount, destination, silent),
            Action::AdjustHandComplex {
                player_id,
                amount,
                destination,
                silent,
            } => self.adjust_hand(player_id, amount, destination, silent),
            Action::ToggleNoMaxHand { player_id, value } => self.toggle_no_max_hand(player_id, value),
            Action::AttachCard {
                player_id,
                source_id,
                target,
            } => self.attach_card(player_id, source_id, target),
            Action::AddToken { player_id, token } => self.add_token(player_id, &token).map(|_| ()),
            Action::UpdatePlayerCounter {
                player_id,
                counter_name,
                count,
            } => self.update_player_counter(player_id, counter_name, count),
            Action::UpdateCardStatus {
                player_id,
                card_id,
                status,
            } => self.update_card_status(player_id, card_id, &status),
            Action::UpdateCardProperty {
                player_id,
                card_id,
                property,
                zone,
            } => self.update_card_property(player_id, card_id, property, zone),
            Action::AddMemo { text } => {
                self.add_memo(&text);
                Ok(())
            }
            Action::ToggleSelectionMode => {
                self.toggle_selection_mode();
                Ok(())
            }
            Action::ToggleCardSelection { card_id } => {
                self.toggle_card_selection(card_id);
                Ok(())
            }
            Action::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
            Action::SelectMultipleCards { card_ids } => {
                self.select_multiple_cards(&card_ids);
                Ok(())
            }
            Action::TogglePlayerFocus { player_id } => {
                self.toggle_player_focus(player_id);
                Ok(())
            }
            Action::LoadDeckData { player_id, deck } => self.load_deck_data(player_id, &deck),
            Action::TestInitHand { player_id } => self.test_init_hand(player_id),
            Action::TestMulligan { player_id } => self.test_mulligan(player_id),
            Action::TestDraw { player_id, count } => self.test_draw(player_id, count).map(|_| ()),
            Action::TestSearch {
                player_id,
                query,
                destination,
            } => self.test_search(player_id, &query, destination),
            Action::TestUse { player_id, card_id } => self.test_use(player_id, card_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let action: Action = serde_json::from_value(json!({
            "MOVE_CARD": {
                "player_id": 1,
                "card_id": {"Instance": 7},
                "source_zone": "battlefield",
                "destination": "grave"
            }
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::MoveCard {
                player_id: PlayerId::new(1),
                card_id: CardRef::Instance(InstanceId::new(7)),
                source_zone: Zone::Battlefield,
                destination: Zone::Graveyard,
            }
        );
        assert_eq!(action.name(), "MOVE_CARD");

        let next: Action = serde_json::from_value(json!("NEXT_TURN")).unwrap();
        assert_eq!(next, Action::NextTurn);
    }

    #[test]
    fn test_add_counter_alias() {
        let action: Action = serde_json::from_value(json!({
            "ADD_COUNTER": {"player_id": 1, "card_id": 2, "counter_type": "+1/+1", "value": 1}
        }))
        .unwrap();
        assert_eq!(action.name(), "MODIFY_CARD_COUNTER");
    }

    #[test]
    fn test_defaults() {
        let action: Action = serde_json::from_value(json!({
            "ADJUST_LIBRARY": {"player_id": 1, "amount": -2}
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::AdjustLibrary {
                player_id: PlayerId::new(1),
                amount: -2,
                destination: None,
                silent: false,
            }
        );

        let draw = Action::from_parts("TEST_DRAW", json!({"player_id": 4})).unwrap();
        assert_eq!(
            draw,
            Action::TestDraw {
                player_id: PlayerId::new(4),
                count: 1
            }
        );
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Action::from_parts("UNDO", serde_json::Value::Null).unwrap(), Action::Undo);
        assert_eq!(Action::from_parts("UNDO", json!({})).unwrap(), Action::Undo);
        assert!(Action::from_parts("SHUFFLE_EVERYTHING", json!({})).is_err());
        assert!(Action::from_parts("UPDATE_LIFE", json!({"player_id": 1})).is_err());
    }

    #[test]
    fn test_history_exclusions() {
        assert!(!Action::Undo.records_history());
        assert!(!Action::RestartGame.records_history());
        assert!(!Action::InitGame {
            players: Vec::new(),
            options: GameOptions::default()
        }
        .records_history());
        assert!(Action::NextTurn.records_history());
        assert!(Action::ToggleSelectionMode.records_history());
    }
}
