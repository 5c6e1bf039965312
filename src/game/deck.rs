//! Deck builder: tracked library and sideboard objects

use crate::core::{Card, CardData, CardKind, InstanceId, PlayerId};
use crate::game::GameState;
use crate::loader::{CatalogCard, DeckDocument};
use crate::zones::{CardZone, Zone};
use crate::Result;

impl GameState {
    fn deck_cards(&mut self, records: &[CatalogCard], commander: bool) -> Vec<Card> {
        records
            .iter()
            .map(|record| {
                let mut card = self.make_card(CardKind::Real, CardData::from(record.clone()));
                card.is_commander = commander;
                card
            })
            .collect()
    }

    /// Replace a player's tracked library and sideboard with a deck document
    ///
    /// The library lists commanders first, then the main deck; the library
    /// count becomes its length.
    pub fn load_deck_data(&mut self, player_id: PlayerId, deck: &DeckDocument) -> Result<()> {
        self.get_player(player_id)?;

        let mut library = self.deck_cards(&deck.commanders, true);
        library.extend(self.deck_cards(&deck.library, false));
        let sideboard = self.deck_cards(&deck.sideboard, false);
        let library_len = library.len() as u32;

        let zones = self.get_player_zones_mut(player_id)?;
        let tracked = zones
            .library
            .get_or_insert_with(|| CardZone::new(Zone::Library, player_id));
        tracked.cards = library;
        zones
            .sideboard
            .get_or_insert_with(|| CardZone::new(Zone::Sideboard, player_id))
            .cards = sideboard;

        self.get_player_mut(player_id)?.library_count = library_len;
        log::debug!("loaded deck '{}' for player {player_id}", deck.deck_name);
        self.log.push("Deck loaded.");
        Ok(())
    }

    /// Append one catalog card to the tracked library and resync the count
    pub fn add_card_to_deck(&mut self, player_id: PlayerId, data: CardData) -> Result<InstanceId> {
        self.get_player(player_id)?;
        let card = self.make_card(CardKind::Real, data);
        let instance_id = card.instance_id;

        let library = self
            .get_player_zones_mut(player_id)?
            .library
            .get_or_insert_with(|| CardZone::new(Zone::Library, player_id));
        library.add(card);
        let library_len = library.len() as u32;

        self.get_player_mut(player_id)?.library_count = library_len;
        Ok(instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameMode, Settings};

    fn builder() -> (GameState, PlayerId) {
        let mut game = GameState::with_seed(
            Settings {
                game_mode: GameMode::DeckBuilder,
                ..Settings::default()
            },
            5,
        );
        let id = game.add_player("Builder", 40);
        (game, id)
    }

    fn document() -> DeckDocument {
        DeckDocument {
            deck_name: "Elves".to_string(),
            commanders: vec![CatalogCard::named("Lathril, Blade of the Elves", "Legendary Creature — Elf Noble")],
            library: vec![CatalogCard::named("Llanowar Elves", "Creature — Elf Druid"); 4],
            sideboard: vec![CatalogCard::named("Elvish Archdruid", "Creature — Elf Druid")],
        }
    }

    #[test]
    fn test_load_puts_commanders_first() {
        let (mut game, id) = builder();
        game.load_deck_data(id, &document()).unwrap();

        let zones = game.get_player_zones(id).unwrap();
        let library = zones.library.as_ref().unwrap();
        assert_eq!(library.len(), 5);
        assert!(library.cards[0].is_commander);
        assert!(library.cards[1..].iter().all(|c| !c.is_commander));
        assert_eq!(zones.sideboard.as_ref().unwrap().len(), 1);
        assert_eq!(game.get_player(id).unwrap().library_count, 5);
        assert!(game.placements_are_unique());
    }

    #[test]
    fn test_reload_replaces_library() {
        let (mut game, id) = builder();
        game.load_deck_data(id, &document()).unwrap();
        game.load_deck_data(id, &DeckDocument::default()).unwrap();
        assert_eq!(game.get_player(id).unwrap().library_count, 0);
    }

    #[test]
    fn test_add_card_to_deck_creates_library_when_missing() {
        let mut game = GameState::with_seed(Settings::default(), 5);
        let id = game.add_player("Player", 40);

        game.add_card_to_deck(id, CardData::named("Sol Ring", "Artifact")).unwrap();
        game.add_card_to_deck(id, CardData::named("Arcane Signet", "Artifact")).unwrap();

        assert_eq!(game.get_player(id).unwrap().library_count, 2);
        assert!(game.has_zone(id, Zone::Library));
    }
}
