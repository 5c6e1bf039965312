//! Counter adjustments: life, hand, library, player counters, commander tax
//!
//! Hand and library sizes are plain integers with a floor of zero. When a
//! negative adjustment names a graveyard or exile destination, the cards
//! that left are materialized as placeholder entities so the destination
//! collection shows them.

use crate::core::{Card, CardData, CardKind, CounterType, PlayerId};
use crate::game::GameState;
use crate::zones::Zone;
use crate::Result;

/// Tax added each time a commander enters the command zone
pub const COMMANDER_TAX_INCREMENT: u32 = 2;

/// Type line given to placeholder stubs
const PLACEHOLDER_TYPE_LINE: &str = "Card";

/// Apply a signed delta to a counter that cannot go below zero
pub(crate) fn floored(value: u32, delta: i32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}

/// "+3" / "-2" / "0"
pub(crate) fn signed(n: i32) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

/// Most stubs a single adjustment materializes; a Commander deck has 100 cards
pub const MAX_PLACEHOLDERS: u32 = 100;

impl GameState {
    /// Push `count` placeholder stubs (at most [`MAX_PLACEHOLDERS`]) into a graveyard or exile
    ///
    /// Other destinations have no object representation and are ignored.
    fn materialize_placeholders(
        &mut self,
        player_id: PlayerId,
        origin: &str,
        destination: Zone,
        count: u32,
    ) -> Result<()> {
        if !matches!(destination, Zone::Graveyard | Zone::Exile) {
            return Ok(());
        }
        if count > MAX_PLACEHOLDERS {
            log::debug!("capping {count} placeholders at {MAX_PLACEHOLDERS}");
        }
        let name = format!("{origin} -> {}", destination.display_name());
        let stubs: Vec<Card> = (0..count.min(MAX_PLACEHOLDERS))
            .map(|_| {
                self.make_card(
                    CardKind::Placeholder,
                    CardData::named(name.clone(), PLACEHOLDER_TYPE_LINE),
                )
            })
            .collect();

        if let Some(zone) = self.get_player_zones_mut(player_id)?.get_zone_mut(destination) {
            zone.cards.extend(stubs);
        }
        Ok(())
    }

    /// Change the hand size, optionally sending what left to a destination
    ///
    /// Library destinations raise the library count; graveyard and exile
    /// destinations receive placeholders.
    pub fn adjust_hand(
        &mut self,
        player_id: PlayerId,
        amount: i32,
        destination: Option<Zone>,
        silent: bool,
    ) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        player.hand_count = floored(player.hand_count, amount);

        if let Some(destination) = destination.filter(|_| amount < 0) {
            let count = amount.unsigned_abs();
            if destination == Zone::Library {
                let player = self.get_player_mut(player_id)?;
                player.library_count = player.library_count.saturating_add(count);
            } else {
                self.materialize_placeholders(player_id, "Hand", destination, count)?;
            }
        }

        if !silent {
            let player = self.get_player(player_id)?;
            let message = format!(
                "{} adjusted Hand by {}. (Hand:{}:{})",
                player.name,
                signed(amount),
                player.name,
                player.hand_count
            );
            self.log.push(message);
        }
        Ok(())
    }

    /// Change the library size, optionally sending what left to a destination
    pub fn adjust_library(
        &mut self,
        player_id: PlayerId,
        amount: i32,
        destination: Option<Zone>,
        silent: bool,
    ) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        player.library_count = floored(player.library_count, amount);

        if let Some(destination) = destination.filter(|_| amount < 0) {
            let count = amount.unsigned_abs();
            if destination == Zone::Hand {
                let player = self.get_player_mut(player_id)?;
                player.hand_count = player.hand_count.saturating_add(count);
            } else {
                self.materialize_placeholders(player_id, "Library", destination, count)?;
            }
        }

        if !silent {
            let player = self.get_player(player_id)?;
            let message = format!(
                "{} adjusted Library by {}. (Total: {})",
                player.name,
                signed(amount),
                player.library_count
            );
            self.log.push(message);
        }
        Ok(())
    }

    /// Quick hand edit from the player panel (eliminated players are skipped)
    pub fn update_hand(&mut self, player_id: PlayerId, amount: i32) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        if player.eliminated {
            return Ok(());
        }
        player.hand_count = floored(player.hand_count, amount);
        let message = format!("(Hand:{}:{})", player.name, player.hand_count);
        self.log.push(message);
        Ok(())
    }

    /// Change a life total; reaching zero eliminates
    pub fn update_life(&mut self, player_id: PlayerId, amount: i32) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        if player.eliminated {
            return Ok(());
        }
        player.life = player.life.saturating_add(amount);
        let (life, message) = (
            player.life,
            format!(
                "{}'s life changed by {}. Current: {}",
                player.name,
                signed(amount),
                player.life
            ),
        );
        self.log.push(message);

        if life <= 0 {
            self.eliminate(player_id, "Life 0")?;
            self.check_winner();
        }
        Ok(())
    }

    /// Add to a named player counter; the entry is dropped once it hits zero
    pub fn update_player_counter(
        &mut self,
        player_id: PlayerId,
        counter: CounterType,
        count: i32,
    ) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        let name = counter.to_string();
        let total = player.counters.add(counter, count);
        let message = format!(
            "{} got {} {} counter(s) (Total: {}).",
            player.name,
            signed(count),
            name,
            total
        );
        self.log.push(message);
        Ok(())
    }

    /// Set or flip the "no maximum hand size" override
    pub fn toggle_no_max_hand(&mut self, player_id: PlayerId, value: Option<bool>) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        player.no_max_hand_size = value.unwrap_or(!player.no_max_hand_size);
        let message = format!(
            "{} {} \"No Max Hand Size\".",
            player.name,
            if player.no_max_hand_size { "enabled" } else { "disabled" }
        );
        self.log.push(message);
        Ok(())
    }

    /// Raise a commander's tax by the fixed increment and return the new tax
    pub(crate) fn add_commander_tax(card: &mut Card) -> u32 {
        card.commander_tax = card.commander_tax.saturating_add(COMMANDER_TAX_INCREMENT);
        card.commander_tax
    }

    pub fn add_memo(&mut self, text: &str) {
        self.log.push(format!("[Memo] {text}"));
    }

    /// Free-form log line from the presentation layer
    pub fn log_action(&mut self, message: &str) {
        self.log.push(message);
    }
}
