//! Catalog and deck loaders
//!
//! Card records from the external catalog, persisted deck documents (JSON)
//! and text decklists.

pub mod catalog;
pub mod deck;
pub mod deck_async;

pub use catalog::{CardCatalog, CatalogCard};
pub use deck::{DeckDocument, DeckEntry, DeckList, DeckLoader};
pub use deck_async::{load_catalog, load_deck_document, save_deck_document};
