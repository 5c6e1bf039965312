//! Hand simulator
//!
//! Works on a private copy of the deck-builder library: commanders are
//! left out and every card gets a new placement. Nothing here touches
//! hand or library counts.

use crate::core::{fuzzy_rank, Card, InstanceId, PlayerId};
use crate::game::GameState;
use crate::zones::SandboxZones;
use crate::{LedgerError, Result};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Cards drawn for an opening hand
pub const OPENING_HAND_SIZE: usize = 7;

/// How TEST_SEARCH picks a card from the simulated library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimQuery {
    Instance(InstanceId),
    /// Best fuzzy name match
    Name(String),
}

/// Where a searched card goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimDestination {
    #[default]
    Hand,
    Graveyard,
    /// Out of the simulation entirely
    Void,
}

impl SandboxZones {
    /// Move up to `count` cards from the top of the library to the hand
    fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            let Some(card) = self.library.draw_top() else {
                break;
            };
            self.hand.add(card);
            drawn += 1;
        }
        drawn
    }

    fn find(&self, query: &SimQuery) -> Option<usize> {
        match query {
            SimQuery::Instance(id) => self.library.position((*id).into()),
            SimQuery::Name(name) => self
                .library
                .iter()
                .enumerate()
                .filter_map(|(pos, card)| fuzzy_rank(name, card.name()).map(|rank| (rank, pos)))
                .min()
                .map(|(_, pos)| pos),
        }
    }
}

impl GameState {
    /// The running simulation and the RNG, borrowed together
    fn sandbox_mut(&mut self, player_id: PlayerId) -> Result<(&mut SandboxZones, &mut ChaCha12Rng)> {
        let rng = &mut self.rng;
        let zones = self
            .player_zones
            .iter_mut()
            .find(|(id, _)| *id == player_id)
            .map(|(_, zones)| zones)
            .ok_or(LedgerError::PlayerNotFound(player_id.as_u32()))?;
        let sandbox = zones
            .sandbox
            .as_mut()
            .ok_or_else(|| LedgerError::InvalidAction("no hand simulation running".to_string()))?;
        Ok((sandbox, rng))
    }

    /// Start (or restart) a simulation: copy the deck, shuffle, draw seven
    pub fn test_init_hand(&mut self, player_id: PlayerId) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let deck: Vec<Card> = self
            .get_player_zones(player_id)?
            .library
            .as_ref()
            .map(|library| library.iter().filter(|c| !c.is_commander).cloned().collect())
            .unwrap_or_default();

        let mut sandbox = SandboxZones::new(player_id);
        for mut card in deck {
            self.reissue_placement(&mut card);
            card.untap();
            card.counters.clear();
            sandbox.library.add(card);
        }
        sandbox.library.shuffle(&mut self.rng);
        sandbox.draw(OPENING_HAND_SIZE);

        self.get_player_zones_mut(player_id)?.sandbox = Some(sandbox);
        self.log.push(format!("{actor} started Hand Simulation (Sandbox)."));
        Ok(())
    }

    /// Hand to the bottom of the library (no reshuffle), then draw seven
    pub fn test_mulligan(&mut self, player_id: PlayerId) -> Result<()> {
        let (sandbox, _) = self.sandbox_mut(player_id)?;
        let hand = std::mem::take(&mut sandbox.hand.cards);
        sandbox.library.add_to_bottom(hand);
        sandbox.draw(OPENING_HAND_SIZE);
        sandbox.mulligans += 1;

        self.log.push("Sim: Mulligan (Hand -> Bottom, Draw 7).");
        Ok(())
    }

    /// Draw up to `count` cards; running out of library just stops early
    pub fn test_draw(&mut self, player_id: PlayerId, count: usize) -> Result<usize> {
        let (sandbox, _) = self.sandbox_mut(player_id)?;
        let drawn = sandbox.draw(count);
        self.log.push(format!("Sim: Drew {drawn} card(s)."));
        Ok(drawn)
    }

    /// Pull one card out of the simulated library, then shuffle the rest
    pub fn test_search(&mut self, player_id: PlayerId, query: &SimQuery, destination: SimDestination) -> Result<()> {
        let (sandbox, rng) = self.sandbox_mut(player_id)?;
        let pos = sandbox
            .find(query)
            .ok_or_else(|| LedgerError::CardNotFound(format!("{query:?} in simulated library")))?;
        let card = sandbox.library.cards.remove(pos);
        let name = card.data.name.clone();

        match destination {
            SimDestination::Hand => sandbox.hand.add(card),
            SimDestination::Graveyard => sandbox.graveyard.add(card),
            SimDestination::Void => {}
        }
        sandbox.library.shuffle(rng);

        self.log.push(match destination {
            SimDestination::Hand => format!("Sim: Searched {{{name}}} and shuffled."),
            SimDestination::Graveyard => format!("Sim: Searched {{{name}}} into the graveyard and shuffled."),
            SimDestination::Void => format!("Sim: Searched {{{name}}} out of the deck and shuffled."),
        });
        Ok(())
    }

    /// Play a card from the simulated hand (it goes to the simulated graveyard)
    pub fn test_use(&mut self, player_id: PlayerId, card_id: InstanceId) -> Result<()> {
        let (sandbox, _) = self.sandbox_mut(player_id)?;
        let card = sandbox
            .hand
            .remove(card_id.into())
            .ok_or_else(|| LedgerError::CardNotFound(format!("instance {card_id} in simulated hand")))?;
        let name = card.data.name.clone();
        sandbox.graveyard.add(card);

        self.log.push(format!("Sim: Used {{{name}}}."));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameMode, Settings};
    use crate::loader::{CatalogCard, DeckDocument};

    fn simulator(library_size: usize) -> (GameState, PlayerId) {
        let mut game = GameState::with_seed(
            Settings {
                game_mode: GameMode::DeckBuilder,
                ..Settings::default()
            },
            99,
        );
        let id = game.add_player("Sim", 40);
        let deck = DeckDocument {
            deck_name: "Test".to_string(),
            commanders: vec![CatalogCard::named("Omnath", "Legendary Creature — Elemental")],
            library: (0..library_size)
                .map(|i| CatalogCard::named(format!("Card {i}"), "Creature"))
                .collect(),
            sideboard: Vec::new(),
        };
        game.load_deck_data(id, &deck).unwrap();
        (game, id)
    }

    fn sandbox(game: &GameState, id: PlayerId) -> &SandboxZones {
        game.get_player_zones(id).unwrap().sandbox.as_ref().unwrap()
    }

    #[test]
    fn test_init_excludes_commanders_and_reissues_placements() {
        let (mut game, id) = simulator(20);
        game.test_init_hand(id).unwrap();

        let sim = sandbox(&game, id);
        assert_eq!(sim.hand.len(), 7);
        assert_eq!(sim.library.len(), 13);
        assert!(sim.hand.iter().chain(sim.library.iter()).all(|c| !c.is_commander));
        assert!(game.placements_are_unique());
        // The real library is untouched
        assert_eq!(game.get_player(id).unwrap().library_count, 21);
        assert_eq!(game.get_player(id).unwrap().hand_count, 0);
    }

    #[test]
    fn test_actions_need_a_running_simulation() {
        let (mut game, id) = simulator(5);
        assert!(game.test_draw(id, 1).is_err());
        assert!(game.test_mulligan(id).is_err());
    }

    #[test]
    fn test_mulligan_puts_hand_on_bottom() {
        let (mut game, id) = simulator(20);
        game.test_init_hand(id).unwrap();
        let old_hand: Vec<InstanceId> = sandbox(&game, id).hand.iter().map(|c| c.instance_id).collect();

        game.test_mulligan(id).unwrap();

        let sim = sandbox(&game, id);
        assert_eq!(sim.hand.len(), 7);
        assert_eq!(sim.mulligans, 1);
        let bottom: Vec<InstanceId> = sim.library.iter().take(7).map(|c| c.instance_id).collect();
        assert_eq!(bottom, old_hand);
    }

    #[test]
    fn test_draw_stops_when_library_runs_out() {
        let (mut game, id) = simulator(9);
        game.test_init_hand(id).unwrap();
        assert_eq!(game.test_draw(id, 5).unwrap(), 2);
        assert!(game.log.latest().unwrap().ends_with("Sim: Drew 2 card(s)."));
    }

    #[test]
    fn test_search_by_name_and_use() {
        let (mut game, id) = simulator(20);
        game.test_init_hand(id).unwrap();
        let wanted = sandbox(&game, id).library.cards[0].name().to_uppercase();

        game.test_search(id, &SimQuery::Name(wanted.clone()), SimDestination::Hand)
            .unwrap();

        let sim = sandbox(&game, id);
        assert_eq!(sim.hand.len(), 8);
        assert_eq!(sim.library.len(), 12);
        let found = sim
            .hand
            .iter()
            .find(|c| c.name().to_uppercase() == wanted)
            .unwrap()
            .instance_id;
        assert!(game.log.latest().unwrap().contains("Sim: Searched {"));

        game.test_use(id, found).unwrap();
        let sim = sandbox(&game, id);
        assert_eq!(sim.graveyard.len(), 1);
        assert_eq!(sim.hand.len(), 7);
        assert!(game.log.latest().unwrap().contains("Sim: Used {"));

        let miss = game.test_search(id, &SimQuery::Name("zzzz".to_string()), SimDestination::Hand);
        assert!(miss.is_err());
    }

    #[test]
    fn test_search_to_void_removes_card() {
        let (mut game, id) = simulator(30);
        game.test_init_hand(id).unwrap();
        let target = sandbox(&game, id).library.cards[0].instance_id;

        game.test_search(id, &SimQuery::Instance(target), SimDestination::Void)
            .unwrap();

        let sim = sandbox(&game, id);
        assert_eq!(sim.library.len(), 22);
        assert!(!sim.library.contains_instance(target));
        assert_eq!(sim.hand.len(), 7);
    }
}
