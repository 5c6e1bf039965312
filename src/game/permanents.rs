//! Battlefield card operations
//!
//! Adding cards and tokens, tapping, counters, cloning, control changes,
//! attachments and manual stat overrides. Anything that takes a card out
//! of the battlefield is a zone transfer (see `transfer.rs`).

use crate::core::{
    AttachTarget, Card, CardData, CardId, CardKind, CardRef, Color, CounterType, InstanceId,
    OriginalStats, PlayerId,
};
use crate::game::transfer::{TransferOutcome, TransferRequest};
use crate::game::GameState;
use crate::zones::Zone;
use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// What to create with ADD_TOKEN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTemplate {
    pub name: String,
    pub color: Color,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default = "default_token_count")]
    pub count: u32,
}

fn default_token_count() -> u32 {
    1
}

impl TokenTemplate {
    /// Generated art: a plain card-sized tile in the token's colour
    pub fn image_url(&self) -> String {
        format!(
            "https://via.placeholder.com/223x310/{}/ffffff?text={}",
            self.color.hex(),
            percent_encode(&self.name)
        )
    }

    fn card_data(&self) -> CardData {
        CardData {
            power: self.power.clone(),
            toughness: self.toughness.clone(),
            image_url: Some(self.image_url()),
            ..CardData::named(self.name.clone(), self.type_line.clone())
        }
    }
}

/// Percent-encode everything except unreserved URL characters
fn percent_encode(text: &str) -> String {
    text.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Manual power/toughness/type override for a battlefield card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    /// Appended to the type line, e.g. "Zombie"
    #[serde(default)]
    pub type_suffix: Option<String>,
    /// Restore the printed stats instead
    #[serde(default)]
    pub reset: bool,
}

/// Annotations that can be edited on any tracked card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardProperty {
    Name(String),
    ImageUrl(Option<String>),
    Note(Option<String>),
}

/// Zones searched by UPDATE_CARD_PROPERTY when no zone is named
const PROPERTY_SEARCH_ORDER: [Zone; 4] = [Zone::Battlefield, Zone::Hand, Zone::Library, Zone::Graveyard];

/// Non-empty, trimmed text
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl GameState {
    fn battlefield_card(&self, player_id: PlayerId, card_ref: CardRef) -> Result<&Card> {
        self.get_player_zones(player_id)?
            .battlefield
            .get(card_ref)
            .ok_or_else(|| LedgerError::CardNotFound(format!("{card_ref} on battlefield")))
    }

    fn battlefield_card_mut(&mut self, player_id: PlayerId, card_ref: CardRef) -> Result<&mut Card> {
        self.get_player_zones_mut(player_id)?
            .battlefield
            .get_mut(card_ref)
            .ok_or_else(|| LedgerError::CardNotFound(format!("{card_ref} on battlefield")))
    }

    /// Play a catalog card from hand
    ///
    /// The hand count drops by one. Instants and sorceries (that are not
    /// also lands) go straight to the graveyard, everything else enters the
    /// battlefield untapped.
    pub fn add_card_to_battlefield(&mut self, player_id: PlayerId, data: CardData) -> Result<InstanceId> {
        self.get_player(player_id)?;
        let card = self.make_card(CardKind::Real, data);
        let instance_id = card.instance_id;
        let used = card.data.is_instant_or_sorcery() && !card.data.is_land();
        let name = card.data.name.clone();

        let zones = self.get_player_zones_mut(player_id)?;
        if used {
            zones.graveyard.add(card);
        } else {
            zones.battlefield.add(card);
        }

        let player = self.get_player_mut(player_id)?;
        let before = player.hand_count;
        player.hand_count = before.saturating_sub(1);
        let suffix = if before != player.hand_count {
            format!(" (Hand:{}:{})", player.name, player.hand_count)
        } else {
            String::new()
        };
        let actor = player.name.to_string();

        self.log.push(if used {
            format!("{actor} used {{{name}}}.{suffix}")
        } else {
            format!("{actor} added {{{name}}} to battlefield.{suffix}")
        });
        Ok(instance_id)
    }

    /// Create `count` tokens on the player's battlefield
    pub fn add_token(&mut self, player_id: PlayerId, template: &TokenTemplate) -> Result<Vec<InstanceId>> {
        let actor = self.player_name(player_id)?;
        let data = template.card_data();
        let tokens: Vec<Card> = (0..template.count)
            .map(|_| self.make_card(CardKind::Token, data.clone()))
            .collect();
        let ids = tokens.iter().map(|t| t.instance_id).collect();

        self.get_player_zones_mut(player_id)?
            .battlefield
            .cards
            .extend(tokens);
        self.log.push(format!(
            "{actor} created {} {{{}}} token(s).",
            template.count, template.name
        ));
        Ok(ids)
    }

    pub fn toggle_tap(&mut self, player_id: PlayerId, card_id: InstanceId) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let card = self.battlefield_card_mut(player_id, card_id.into())?;
        card.tapped = !card.tapped;
        let message = format!(
            "{actor} {} {{{}}}.",
            if card.tapped { "tapped" } else { "untapped" },
            card.name()
        );
        self.log.push(message);
        Ok(())
    }

    /// Add or remove counters on a battlefield card
    pub fn modify_card_counter(
        &mut self,
        player_id: PlayerId,
        card_id: InstanceId,
        counter_type: CounterType,
        value: i32,
    ) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let card = self.battlefield_card_mut(player_id, card_id.into())?;
        let kind = counter_type.to_string();
        card.counters.add(counter_type, value);
        let message = format!(
            "{actor} {} {} {kind} counter(s) on {{{}}}.",
            if value > 0 { "added" } else { "removed" },
            value.unsigned_abs(),
            card.name()
        );
        self.log.push(message);
        Ok(())
    }

    /// Remove a card from the battlefield
    ///
    /// A commander goes back to the command zone (paying tax), a token or
    /// copy ceases to exist, and anything else goes to its owner's graveyard.
    pub fn delete_card(&mut self, player_id: PlayerId, card_id: InstanceId) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let card = self.battlefield_card(player_id, card_id.into())?;
        let (name, is_commander) = (card.data.name.clone(), card.is_commander);
        let destination = if is_commander { Zone::Command } else { Zone::Graveyard };

        let outcome = self.transfer(
            TransferRequest {
                player_id,
                card: card_id.into(),
                source: Zone::Battlefield,
                destination,
            },
            false,
        )?;

        match outcome {
            TransferOutcome::Placed {
                holder,
                zone: Zone::Command,
                ..
            } => {
                let tax = self
                    .get_player_zones(holder)?
                    .command
                    .get(card_id.into())
                    .map_or(0, |c| c.commander_tax);
                self.log.push(format!(
                    "{actor}'s Commander {{{name}}} returned to Command Zone. (TAX{{{name}}}:{tax})"
                ));
            }
            TransferOutcome::Placed {
                holder,
                redirected: true,
                ..
            } => {
                let owner = self.player_name(holder)?;
                self.log.push(format!(
                    "{actor}'s {{{name}}} was returned to {owner}'s graveyard."
                ));
            }
            TransferOutcome::Placed { .. } => {
                self.log.push(format!("{actor}'s {{{name}}} was moved to graveyard."));
            }
            // The transfer logged these itself
            TransferOutcome::RemovedFromGame
            | TransferOutcome::FellBackToGraveyard
            | TransferOutcome::TuckedIntoLibrary { .. }
            | TransferOutcome::CountedIntoLibrary { .. } => {}
        }
        Ok(())
    }

    /// Put a copy of a battlefield card onto the same battlefield
    ///
    /// The copy is never a commander, carries no counters or tax, and has
    /// its own identities.
    pub fn clone_card(&mut self, player_id: PlayerId, card_id: InstanceId) -> Result<InstanceId> {
        let actor = self.player_name(player_id)?;
        let original = self.battlefield_card(player_id, card_id.into())?;
        let name = original.data.name.clone();
        let mut data = original.data.clone();
        data.name = format!("{name} (Copy)");

        let copy = self.make_card(CardKind::Copy, data);
        let instance_id = copy.instance_id;
        self.get_player_zones_mut(player_id)?.battlefield.add(copy);
        self.log.push(format!("{actor} created a copy of {{{name}}}."));
        Ok(instance_id)
    }

    /// Move a permanent to another player's battlefield
    ///
    /// The first control change records the original controller as owner,
    /// so the card later returns to them when it leaves the battlefield.
    pub fn change_control(
        &mut self,
        card_ref: CardRef,
        current_controller_id: PlayerId,
        new_controller_id: PlayerId,
    ) -> Result<()> {
        let from = self.player_name(current_controller_id)?;
        let to = self.player_name(new_controller_id)?;
        self.battlefield_card(current_controller_id, card_ref)?;

        let mut card = self
            .get_player_zones_mut(current_controller_id)?
            .battlefield
            .remove(card_ref)
            .ok_or_else(|| LedgerError::CardNotFound(format!("{card_ref} on battlefield")))?;
        card.owner_id.get_or_insert(current_controller_id);
        card.untap();
        let name = card.data.name.clone();

        self.get_player_zones_mut(new_controller_id)?.battlefield.add(card);
        self.log.push(format!("{from} gave control of {{{name}}} to {to}."));
        Ok(())
    }

    /// Attach an equipment or aura, or detach it when already attached there
    pub fn attach_card(&mut self, player_id: PlayerId, source_id: InstanceId, target: AttachTarget) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let (target_name, target_holder) = match target {
            AttachTarget::Card(target_id) => self
                .all_cards()
                .find(|(_, zone, card)| *zone == Zone::Battlefield && card.instance_id == target_id)
                .map(|(holder, _, card)| (card.data.name.clone(), holder))
                .ok_or_else(|| LedgerError::CardNotFound(format!("attach target {target_id}")))?,
            AttachTarget::Player(target_player) => (self.player_name(target_player)?, target_player),
        };
        let holder_name = self.player_name(target_holder)?;

        let card = self.battlefield_card_mut(player_id, source_id.into())?;
        let message = if card.attached_to == Some(target) {
            card.attached_to = None;
            format!("{actor}'s {{{}}} unequipped from {target_name}.", card.name())
        } else {
            card.attached_to = Some(target);
            format!(
                "{actor}'s {{{}}} attached to {target_name} ({holder_name}).",
                card.name()
            )
        };
        self.log.push(message);
        Ok(())
    }

    /// Override power/toughness or extend the type line, or undo overrides
    pub fn update_card_status(&mut self, player_id: PlayerId, card_id: InstanceId, update: &StatusUpdate) -> Result<()> {
        let actor = self.player_name(player_id)?;
        let card = self.battlefield_card_mut(player_id, card_id.into())?;

        let message = if update.reset {
            if let Some(original) = card.original_stats.take() {
                card.data.power = original.power;
                card.data.toughness = original.toughness;
                card.data.type_line = original.type_line;
            }
            format!("{actor} reset status of {}.", card.name())
        } else {
            if card.original_stats.is_none() {
                card.original_stats = Some(OriginalStats {
                    power: card.data.power.clone(),
                    toughness: card.data.toughness.clone(),
                    type_line: card.data.type_line.clone(),
                });
            }
            if let Some(power) = filled(&update.power) {
                card.data.power = Some(power.to_string());
            }
            if let Some(toughness) = filled(&update.toughness) {
                card.data.toughness = Some(toughness.to_string());
            }
            if let Some(suffix) = filled(&update.type_suffix) {
                card.data.type_line = format!("{} {suffix}", card.data.type_line);
            }
            format!(
                "{actor} updated status of {{{}}}. P/T: {}/{}, Type: {}",
                card.name(),
                card.data.power.as_deref().unwrap_or("-"),
                card.data.toughness.as_deref().unwrap_or("-"),
                card.data.type_line
            )
        };
        self.log.push(message);
        Ok(())
    }

    /// Edit an annotation on a card (no log line)
    ///
    /// With no zone given, the battlefield, hand, library and graveyard are
    /// searched in that order.
    pub fn update_card_property(
        &mut self,
        player_id: PlayerId,
        card_id: InstanceId,
        property: CardProperty,
        zone: Option<Zone>,
    ) -> Result<()> {
        let zones = self.get_player_zones_mut(player_id)?;
        let search: &[Zone] = match zone {
            Some(ref zone) => std::slice::from_ref(zone),
            None => &PROPERTY_SEARCH_ORDER,
        };
        let zone = search
            .iter()
            .copied()
            .find(|z| zones.get_zone(*z).is_some_and(|c| c.contains_instance(card_id)))
            .ok_or_else(|| LedgerError::CardNotFound(format!("instance {card_id}")))?;
        let card = zones
            .get_zone_mut(zone)
            .and_then(|c| c.get_mut(card_id.into()))
            .ok_or_else(|| LedgerError::CardNotFound(format!("instance {card_id}")))?;

        match property {
            CardProperty::Name(name) => card.data.name = name,
            CardProperty::ImageUrl(url) => card.data.image_url = url,
            CardProperty::Note(note) => card.note = note,
        }
        Ok(())
    }

    /// Cast a commander from the command zone onto the battlefield
    ///
    /// The commander gets a new placement and loses its counters; tax is
    /// not charged here but when it returns to the command zone.
    pub fn cast_commander(&mut self, player_id: PlayerId, card_id: CardId) -> Result<InstanceId> {
        let actor = self.player_name(player_id)?;
        let instance_id = self.next_id();
        let card = self
            .get_player_zones_mut(player_id)?
            .command
            .get_mut(card_id.into())
            .ok_or_else(|| LedgerError::CardNotFound(format!("{} in command zone", CardRef::from(card_id))))?;
        card.instance_id = instance_id;
        card.counters.clear();
        let name = card.data.name.clone();

        self.transfer(
            TransferRequest {
                player_id,
                card: card_id.into(),
                source: Zone::Command,
                destination: Zone::Battlefield,
            },
            false,
        )?;
        self.log.push(format!("{actor} cast Commander {{{name}}} from Command Zone."));
        Ok(instance_id)
    }
}
