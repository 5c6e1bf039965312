//! Zone transfers
//!
//! Every move of a card entity between two zones goes through
//! [`GameState::move_card`]. The policy for what happens on arrival is a
//! small table keyed by card class and destination ([`transfer_rule`]);
//! the engine applies the rule and the per-destination side effects.

use crate::core::{Card, CardRef, CommanderStatus, PlayerId};
use crate::game::GameState;
use crate::zones::Zone;
use crate::{LedgerError, Result};

/// The classes of card the transfer policy distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardClass {
    /// Tokens and copies
    Impermanent,
    Commander,
    Ordinary,
}

impl CardClass {
    pub fn of(card: &Card) -> Self {
        if card.kind.is_impermanent() {
            CardClass::Impermanent
        } else if card.is_commander {
            CardClass::Commander
        } else {
            CardClass::Ordinary
        }
    }
}

/// What happens to a card when it arrives at a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferRule {
    /// The object is discarded; it never reaches the destination
    CeaseToExist,
    /// Stays in the owner's command list, marked as shuffled into the library
    TuckCommander,
    /// Library count goes up; the object is kept only where libraries are tracked
    CountIntoLibrary,
    /// Lands in the acting player's collection
    EnterUnderController,
    /// Lands in the owner's collection, whoever moved it
    ReturnToOwner,
}

/// Arrival policy for a card class and destination
pub fn transfer_rule(class: CardClass, destination: Zone) -> TransferRule {
    match (class, destination) {
        (CardClass::Impermanent, _) => TransferRule::CeaseToExist,
        (CardClass::Commander, Zone::Library) => TransferRule::TuckCommander,
        (_, Zone::Library) => TransferRule::CountIntoLibrary,
        (_, Zone::Battlefield) => TransferRule::EnterUnderController,
        _ => TransferRule::ReturnToOwner,
    }
}

/// A request to move one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    /// Player whose source collection holds the card
    pub player_id: PlayerId,
    pub card: CardRef,
    pub source: Zone,
    pub destination: Zone,
}

/// Where a transferred card ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    RemovedFromGame,
    TuckedIntoLibrary { owner: PlayerId },
    CountedIntoLibrary { holder: PlayerId, tracked: bool },
    Placed { holder: PlayerId, zone: Zone, redirected: bool },
    /// The destination has no collection in this mode
    FellBackToGraveyard,
}

impl GameState {
    /// Move a card between two zones, applying ownership and class rules
    pub fn move_card(
        &mut self,
        player_id: PlayerId,
        card: CardRef,
        source: Zone,
        destination: Zone,
    ) -> Result<TransferOutcome> {
        self.transfer(
            TransferRequest {
                player_id,
                card,
                source,
                destination,
            },
            true,
        )
    }

    /// Apply a transfer; `announce` controls the ordinary "moved" log line
    pub(crate) fn transfer(&mut self, request: TransferRequest, announce: bool) -> Result<TransferOutcome> {
        let TransferRequest {
            player_id,
            card: card_ref,
            source,
            destination,
        } = request;

        // Everything is resolved before the first mutation
        let actor = self.player_name(player_id)?;
        if source.is_sandbox() {
            return Err(LedgerError::InvalidZone {
                zone: source.to_string(),
                player: player_id.as_u32(),
            });
        }
        let source_zone = self
            .get_player_zones(player_id)?
            .get_zone(source)
            .ok_or_else(|| LedgerError::InvalidZone {
                zone: source.to_string(),
                player: player_id.as_u32(),
            })?;
        let found = source_zone
            .get(card_ref)
            .ok_or_else(|| LedgerError::CardNotFound(format!("{card_ref} in {source}")))?;

        let rule = transfer_rule(CardClass::of(found), destination);
        let owner = found
            .owner_id
            .filter(|owner| *owner != player_id && self.get_player(*owner).is_ok());

        let mut card = self
            .get_player_zones_mut(player_id)?
            .get_zone_mut(source)
            .and_then(|zone| zone.remove(card_ref))
            .ok_or_else(|| LedgerError::CardNotFound(format!("{card_ref} in {source}")))?;

        if source == Zone::Hand {
            let player = self.get_player_mut(player_id)?;
            player.hand_count = player.hand_count.saturating_sub(1);
        }

        match rule {
            TransferRule::CeaseToExist => {
                self.log.push(format!(
                    "{}'s {} {{{}}} was removed from the game.",
                    actor,
                    card.kind.label(),
                    card.name()
                ));
                Ok(TransferOutcome::RemovedFromGame)
            }
            TransferRule::TuckCommander => {
                let owner_id = owner.unwrap_or(player_id);
                card.commander_status = Some(CommanderStatus::Library);
                card.untap();
                let name = card.data.name.clone();

                self.get_player_zones_mut(owner_id)?.command.add(card);
                let deck = {
                    let owner = self.get_player_mut(owner_id)?;
                    owner.library_count = owner.library_count.saturating_add(1);
                    owner.library_count
                };
                self.log.push(format!(
                    "{actor} moved Commander {{{name}}} to Library. (Deck: {deck})"
                ));
                Ok(TransferOutcome::TuckedIntoLibrary { owner: owner_id })
            }
            TransferRule::CountIntoLibrary => {
                let holder = owner.unwrap_or(player_id);
                let name = card.data.name.clone();

                let tracked = match self.get_player_zones_mut(holder)?.library.as_mut() {
                    Some(library) => {
                        library.add_to_bottom(vec![card]);
                        true
                    }
                    None => false,
                };
                let deck = {
                    let holder = self.get_player_mut(holder)?;
                    holder.library_count = holder.library_count.saturating_add(1);
                    holder.library_count
                };

                let message = match owner {
                    Some(owner_id) => format!(
                        "{actor} returned {{{name}}} to {}'s Library (Bottom). (Deck: {deck})",
                        self.player_name(owner_id)?
                    ),
                    None => format!("{actor} moved {{{name}}} to Library (Bottom). (Deck: {deck})"),
                };
                self.log.push(message);
                Ok(TransferOutcome::CountedIntoLibrary { holder, tracked })
            }
            TransferRule::EnterUnderController | TransferRule::ReturnToOwner => {
                let redirect = match rule {
                    TransferRule::ReturnToOwner => owner,
                    _ => None,
                };
                let holder = redirect.unwrap_or(player_id);
                self.place(card, holder, player_id, &actor, destination, redirect.is_some(), announce)
            }
        }
    }

    fn place(
        &mut self,
        mut card: Card,
        holder: PlayerId,
        actor_id: PlayerId,
        actor: &str,
        destination: Zone,
        redirected: bool,
        announce: bool,
    ) -> Result<TransferOutcome> {
        let has_collection = !destination.is_sandbox() && self.has_zone(holder, destination);
        if !has_collection {
            log::warn!(
                "no {destination} collection for player {holder}; {} goes to the graveyard",
                card.name()
            );
            let name = card.data.name.clone();
            self.get_player_zones_mut(actor_id)?.graveyard.add(card);
            self.log.push(format!(
                "{actor} moved {{{name}}} to Graveyard (no {destination} available)."
            ));
            return Ok(TransferOutcome::FellBackToGraveyard);
        }

        let mut suffix = String::new();
        match destination {
            Zone::Hand => {
                let player = self.get_player_mut(holder)?;
                player.hand_count = player.hand_count.saturating_add(1);
                suffix = format!(" (Hand:{}:{})", player.name, player.hand_count);
            }
            Zone::Command if card.is_commander => {
                let tax = Self::add_commander_tax(&mut card);
                card.commander_status = None;
                suffix = format!(" (TAX{{{}}}:{})", card.name(), tax);
            }
            Zone::Battlefield => {
                card.untap();
                card.commander_status = None;
            }
            _ => {}
        }

        let name = card.data.name.clone();
        if let Some(zone) = self.get_player_zones_mut(holder)?.get_zone_mut(destination) {
            zone.add(card);
        }

        if announce {
            let message = if redirected {
                format!(
                    "{actor} returned {{{name}}} to {}'s {}.{suffix}",
                    self.player_name(holder)?,
                    destination.display_name()
                )
            } else {
                format!("{actor} moved {{{name}}} to {}.{suffix}", destination.display_name())
            };
            self.log.push(message);
        }

        Ok(TransferOutcome::Placed {
            holder,
            zone: destination,
            redirected,
        })
    }
}
