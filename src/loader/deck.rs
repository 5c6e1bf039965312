//! Deck documents and text decklists
//!
//! A [`DeckDocument`] is the saved form of a deck-builder deck (JSON). A
//! [`DeckList`] is a plain text list ("1 Sol Ring") that becomes a
//! document once its names are resolved against a [`CardCatalog`].

use crate::loader::{CardCatalog, CatalogCard};
use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted deck: commanders, main library and sideboard candidates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDocument {
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub commanders: Vec<CatalogCard>,
    #[serde(default)]
    pub library: Vec<CatalogCard>,
    #[serde(default)]
    pub sideboard: Vec<CatalogCard>,
}

impl DeckDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Commanders plus main library
    pub fn deck_size(&self) -> usize {
        self.commanders.len() + self.library.len()
    }
}

/// Text decklist loader
///
/// Format: one "N Card Name" per line, optionally "N Card Name|SET".
/// `[Commander]` and `[Sideboard]` headers switch sections; any other
/// header, blank line or `#` comment is skipped.
pub struct DeckLoader;

impl DeckLoader {
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<DeckList> {
        let mut deck = DeckList::default();
        let mut section = Section::Main;

        for line in content.lines() {
            let line = line.trim();

            if let Some(header) = line.strip_prefix('[') {
                let header = header.trim_end_matches(']').trim().to_lowercase();
                section = match header.as_str() {
                    "commander" | "commanders" => Section::Commander,
                    "sideboard" => Section::Sideboard,
                    "main" | "deck" => Section::Main,
                    _ => Section::Other,
                };
                continue;
            }
            if line.is_empty() || line.starts_with('#') || section == Section::Other {
                continue;
            }

            let Some((count_str, rest)) = line.split_once(' ') else {
                continue;
            };
            let Ok(count) = count_str.trim_end_matches('x').parse::<u8>() else {
                continue;
            };
            let card_name = rest
                .split_once('|')
                .map_or(rest, |(name, _set)| name)
                .trim()
                .to_string();

            let entry = DeckEntry { card_name, count };
            match section {
                Section::Commander => deck.commanders.push(entry),
                Section::Sideboard => deck.sideboard.push(entry),
                _ => deck.main_deck.push(entry),
            }
        }

        if deck.main_deck.is_empty() && deck.commanders.is_empty() {
            return Err(LedgerError::DeckFormat("Empty deck".to_string()));
        }
        Ok(deck)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Commander,
    Main,
    Sideboard,
    Other,
}

/// A card name and how many copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// A parsed text decklist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub commanders: Vec<DeckEntry>,
    pub main_deck: Vec<DeckEntry>,
    pub sideboard: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in main deck
    pub fn total_cards(&self) -> usize {
        self.main_deck.iter().map(|e| e.count as usize).sum()
    }

    /// Total cards in sideboard
    pub fn sideboard_size(&self) -> usize {
        self.sideboard.iter().map(|e| e.count as usize).sum()
    }

    /// Look every name up in the catalog and expand the counts
    pub fn resolve(&self, deck_name: &str, catalog: &CardCatalog) -> Result<DeckDocument> {
        let expand = |entries: &[DeckEntry]| -> Result<Vec<CatalogCard>> {
            let mut cards = Vec::new();
            for entry in entries {
                let card = catalog.require(&entry.card_name)?;
                cards.extend((0..entry.count).map(|_| (*card).clone()));
            }
            Ok(cards)
        };

        Ok(DeckDocument {
            deck_name: deck_name.to_string(),
            commanders: expand(&self.commanders)?,
            library: expand(&self.main_deck)?,
            sideboard: expand(&self.sideboard)?,
        })
    }
}
