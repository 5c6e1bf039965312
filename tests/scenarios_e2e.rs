//! End-to-end table scenarios driven through the store
//!
//! Each test starts a seeded game, dispatches the actions a player would
//! trigger from the board and checks counts and log lines.

use commander_ledger::{
    core::{CardData, CardId, CardKind, PlayerId},
    game::{Action, DispatchOutcome, FixedClock, GameOptions, PlayerSetup, Settings, Store},
    loader::CatalogCard,
    zones::Zone,
    Result,
};
use std::rc::Rc;

fn seated(names: &[&str], seed: u64) -> Store {
    let mut store = Store::with_seed(Settings::default(), seed).with_clock(Rc::new(FixedClock(20, 15, 0)));
    let players = names
        .iter()
        .map(|name| {
            let mut setup = PlayerSetup::named(*name);
            setup.commanders = vec![CatalogCard::named(format!("{name}'s Commander"), "Legendary Creature")];
            setup
        })
        .collect();
    let outcome = store.dispatch(Action::InitGame {
        players,
        options: GameOptions {
            randomize_turn_order: false,
            ..GameOptions::default()
        },
    });
    assert_eq!(outcome, DispatchOutcome::Applied);
    store
}

fn id_of(store: &Store, name: &str) -> PlayerId {
    store
        .state()
        .players
        .iter()
        .find(|p| p.name.as_str() == name)
        .map(|p| p.id)
        .unwrap()
}

fn commander_of(store: &Store, name: &str) -> CardId {
    let player = store.state().get_player(id_of(store, name)).unwrap();
    player.commanders[0].id
}

#[test]
fn test_first_turn_after_init() -> Result<()> {
    let store = seated(&["Alice", "Bob", "Carol", "Dave"], 1);
    let state = store.state();

    assert_eq!(state.turn.count, 1);
    let active = state.get_player(state.turn.active_player.unwrap())?;
    assert_eq!(active.hand_count, 8);
    assert_eq!(active.library_count, 91);

    for player in state.players.iter().filter(|p| p.id != active.id) {
        assert_eq!(player.hand_count, 7);
        assert_eq!(player.library_count, 92);
        assert_eq!(player.life, 40);
    }
    assert_eq!(
        state.log.latest(),
        Some("[20:15:00] Turn 1: Alice's turn. Untap & Draw. (Hand:Alice:8)")
    );
    Ok(())
}

#[test]
fn test_commander_damage_eliminates() -> Result<()> {
    let mut store = seated(&["Alice", "Bob", "Carol", "Dave"], 2);
    let bob = id_of(&store, "Bob");
    let source = commander_of(&store, "Alice");

    store.dispatch(Action::UpdateCommanderDamage {
        player_id: bob,
        source_id: source,
        amount: 21,
        source_name: "Alice's Commander".to_string(),
    });

    let state = store.state();
    let victim = state.get_player(bob)?;
    assert_eq!(victim.life, 19);
    assert_eq!(victim.commander_damage_from(source), 21);
    assert!(victim.eliminated);
    assert!(state.winner.is_none());
    assert!(state
        .log
        .contains("(CMDdmg:Alice{Alice's Commander}→Bob:21)"));
    assert!(state
        .log
        .contains("Bob has been eliminated (21+ Commander Damage from Alice's Commander)."));
    Ok(())
}

#[test]
fn test_last_elimination_crowns_winner() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 3);
    let bob = id_of(&store, "Bob");
    let source = commander_of(&store, "Alice");

    for _ in 0..3 {
        store.dispatch(Action::UpdateCommanderDamage {
            player_id: bob,
            source_id: source,
            amount: 7,
            source_name: "Alice's Commander".to_string(),
        });
    }

    let state = store.state();
    assert_eq!(state.winner, Some(id_of(&store, "Alice")));
    assert!(state.log.latest().unwrap().ends_with("GAME OVER! Winner: Alice"));

    // Play goes on after the winner is recorded
    let outcome = store.dispatch(Action::UpdateLife {
        player_id: id_of(&store, "Alice"),
        amount: -5,
    });
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(store.state().get_player(id_of(&store, "Alice"))?.life, 35);
    Ok(())
}

#[test]
fn test_turn_skips_eliminated_players() -> Result<()> {
    let mut store = seated(&["Alice", "Bob", "Carol"], 4);
    let bob = id_of(&store, "Bob");
    store.dispatch(Action::UpdateLife {
        player_id: bob,
        amount: -40,
    });
    assert!(store.state().get_player(bob)?.eliminated);

    store.dispatch(Action::NextTurn);
    let state = store.state();
    assert_eq!(state.turn.count, 2);
    assert_eq!(state.turn.active_player, Some(id_of(&store, "Carol")));
    Ok(())
}

#[test]
fn test_end_of_turn_discards_to_seven() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 5);
    let alice = id_of(&store, "Alice");
    store.dispatch(Action::UpdateHand {
        player_id: alice,
        amount: 2,
    });
    assert_eq!(store.state().get_player(alice)?.hand_count, 10);

    store.dispatch(Action::NextTurn);

    let state = store.state();
    assert_eq!(state.get_player(alice)?.hand_count, 7);
    assert_eq!(state.get_player_zones(alice)?.graveyard.len(), 3);
    assert!(state
        .log
        .contains("[End Phase] Alice discarded 3 cards to Graveyard (Hand Limit > 7) (Hand:Alice:7)."));
    Ok(())
}

#[test]
fn test_move_to_library_counts() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 6);
    let alice = id_of(&store, "Alice");
    store.dispatch(Action::AddCardToBattlefield {
        player_id: alice,
        card: CatalogCard::named("Sol Ring", "Artifact"),
    });
    let ring = store.state().get_player_zones(alice)?.battlefield.cards[0].instance_id;
    let library_before = store.state().get_player(alice)?.library_count;

    store.dispatch(Action::MoveCard {
        player_id: alice,
        card_id: ring.into(),
        source_zone: Zone::Battlefield,
        destination: Zone::Library,
    });

    let state = store.state();
    assert_eq!(state.get_player(alice)?.library_count, library_before + 1);
    assert!(state.get_player_zones(alice)?.battlefield.is_empty());
    assert!(!state.all_cards().any(|(_, _, c)| c.instance_id == ring));
    Ok(())
}

#[test]
fn test_clone_card_copies_without_state() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 7);
    let alice = id_of(&store, "Alice");
    store.dispatch(Action::AddCardToBattlefield {
        player_id: alice,
        card: CatalogCard::named("Llanowar Elves", "Creature — Elf Druid"),
    });
    let original = store.state().get_player_zones(alice)?.battlefield.cards[0].clone();
    store.dispatch_json(
        "ADD_COUNTER",
        serde_json::json!({
            "player_id": alice.as_u32(),
            "card_id": original.instance_id.as_u32(),
            "counter_type": "+1/+1",
            "value": 2
        }),
    );
    let original = store.state().get_player_zones(alice)?.battlefield.cards[0].clone();

    store.dispatch(Action::CloneCard {
        player_id: alice,
        card_id: original.instance_id,
    });

    let battlefield = &store.state().get_player_zones(alice)?.battlefield;
    assert_eq!(battlefield.len(), 2);
    assert_eq!(battlefield.cards[0], original);
    let copy = &battlefield.cards[1];
    assert_eq!(copy.kind, CardKind::Copy);
    assert!(!copy.is_commander);
    assert!(copy.counters.is_empty());
    assert_ne!(copy.instance_id, original.instance_id);
    assert!(store.state().placements_are_unique());
    Ok(())
}

#[test]
fn test_commander_cast_and_return() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 8);
    let alice = id_of(&store, "Alice");
    let commander = commander_of(&store, "Alice");

    store.dispatch(Action::CastCommander {
        player_id: alice,
        card_id: commander,
    });
    let on_board = store.state().get_player_zones(alice)?.battlefield.cards[0].instance_id;
    store.dispatch(Action::DeleteCard {
        player_id: alice,
        card_id: on_board,
    });

    let state = store.state();
    let card = state.get_player_zones(alice)?.command.get(commander.into()).unwrap();
    assert_eq!(card.commander_tax, 2);
    assert_eq!(
        state.log.latest(),
        Some("[20:15:00] Alice's Commander {Alice's Commander} returned to Command Zone. (TAX{Alice's Commander}:2)")
    );
    Ok(())
}

#[test]
fn test_instants_go_to_graveyard() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 9);
    let alice = id_of(&store, "Alice");
    store.dispatch(Action::AddCardToBattlefield {
        player_id: alice,
        card: CatalogCard::from(&CardData::named("Swords to Plowshares", "Instant")),
    });

    let zones = store.state().get_player_zones(alice)?;
    assert!(zones.battlefield.is_empty());
    assert_eq!(zones.graveyard.len(), 1);
    assert_eq!(store.state().get_player(alice)?.hand_count, 7);
    Ok(())
}

#[test]
fn test_discard_to_exile_leaves_placeholders() -> Result<()> {
    let mut store = seated(&["Alice", "Bob"], 10);
    let bob = id_of(&store, "Bob");
    store.dispatch(Action::AdjustHandComplex {
        player_id: bob,
        amount: -2,
        destination: Some(Zone::Exile),
        silent: false,
    });

    let state = store.state();
    let exile = &state.get_player_zones(bob)?.exile;
    assert_eq!(exile.len(), 2);
    assert!(exile.iter().all(|c| c.kind == CardKind::Placeholder && c.name() == "Hand -> Exile"));
    assert_eq!(state.get_player(bob)?.hand_count, 5);
    assert!(state.log.latest().unwrap().ends_with("Bob adjusted Hand by -2. (Hand:Bob:5)"));
    Ok(())
}

#[test]
fn test_restart_returns_to_setup() {
    let mut store = seated(&["Alice", "Bob"], 11);
    store.dispatch(Action::NextTurn);
    let history = store.history_len();

    store.dispatch(Action::RestartGame);

    let state = store.state();
    assert!(!state.game_started);
    assert!(state.players.is_empty());
    assert_eq!(state.log.len(), 1);
    assert_eq!(store.history_len(), history);
}
