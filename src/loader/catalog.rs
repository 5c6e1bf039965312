//! Card catalog records
//!
//! The catalog is an external data source. Its records are taken as they
//! come: the engine copies the descriptive fields into [`CardData`] and
//! never validates them.

use crate::core::{fuzzy_rank, normalize_card_name, CardData, CardFace};
use crate::{LedgerError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One card record as served by the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCard {
    /// Catalog identifier of the printing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_faces: Vec<CardFace>,
}

impl CatalogCard {
    pub fn named(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        CatalogCard {
            name: name.into(),
            type_line: type_line.into(),
            ..CatalogCard::default()
        }
    }
}

impl From<CatalogCard> for CardData {
    fn from(card: CatalogCard) -> Self {
        CardData {
            catalog_id: card.id,
            name: card.name,
            type_line: card.type_line,
            mana_cost: card.mana_cost,
            power: card.power,
            toughness: card.toughness,
            image_url: card.image_url,
            card_faces: card.card_faces,
        }
    }
}

impl From<&CardData> for CatalogCard {
    fn from(data: &CardData) -> Self {
        CatalogCard {
            id: data.catalog_id.clone(),
            name: data.name.clone(),
            type_line: data.type_line.clone(),
            mana_cost: data.mana_cost.clone(),
            power: data.power.clone(),
            toughness: data.toughness.clone(),
            image_url: data.image_url.clone(),
            card_faces: data.card_faces.clone(),
        }
    }
}

/// In-memory catalog keyed by normalized card name
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Arc<CatalogCard>>,
}

impl CardCatalog {
    pub fn new() -> Self {
        CardCatalog::default()
    }

    /// Build a catalog from records; later duplicates replace earlier ones
    pub fn from_cards(cards: impl IntoIterator<Item = CatalogCard>) -> Self {
        let mut catalog = CardCatalog::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Parse a JSON array of catalog records
    pub fn from_json(content: &str) -> Result<Self> {
        let cards: Vec<CatalogCard> = serde_json::from_str(content)?;
        Ok(Self::from_cards(cards))
    }

    /// Load a JSON catalog file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, card: CatalogCard) {
        self.cards
            .insert(normalize_card_name(&card.name), Arc::new(card));
    }

    /// Exact lookup, ignoring case and accents
    pub fn get(&self, name: &str) -> Option<Arc<CatalogCard>> {
        self.cards.get(&normalize_card_name(name)).cloned()
    }

    /// Exact lookup that reports a missing card as an error
    pub fn require(&self, name: &str) -> Result<Arc<CatalogCard>> {
        self.get(name)
            .ok_or_else(|| LedgerError::CardNotFound(format!("'{name}' is not in the catalog")))
    }

    /// Fuzzy search, best match first (ties broken alphabetically)
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<CatalogCard>> {
        let mut hits: Vec<(u32, &Arc<CatalogCard>)> = self
            .cards
            .values()
            .filter_map(|card| fuzzy_rank(query, &card.name).map(|rank| (rank, card)))
            .collect();
        hits.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.name.cmp(&b.name)));
        hits.into_iter()
            .take(limit)
            .map(|(_, card)| Arc::clone(card))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
