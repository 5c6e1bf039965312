//! Async file loading for deck documents and catalogs
//!
//! File reads go through `tokio::fs`; JSON parsing runs on the blocking
//! pool since a full catalog dump can be large.

use crate::loader::{CardCatalog, DeckDocument};
use crate::Result;
use std::path::Path;

pub async fn load_deck_document(path: &Path) -> Result<DeckDocument> {
    let content = tokio::fs::read_to_string(path).await?;
    DeckDocument::from_json(&content)
}

pub async fn save_deck_document(document: &DeckDocument, path: &Path) -> Result<()> {
    let json = document.to_json()?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub async fn load_catalog(path: &Path) -> Result<CardCatalog> {
    let content = tokio::fs::read_to_string(path).await?;
    let catalog = tokio::task::spawn_blocking(move || CardCatalog::from_json(&content)).await??;
    log::debug!("loaded {} catalog cards from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogCard;

    #[tokio::test]
    async fn test_deck_document_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let document = DeckDocument {
            deck_name: "Goblins".to_string(),
            commanders: vec![CatalogCard::named("Krenko, Mob Boss", "Legendary Creature — Goblin Warrior")],
            library: vec![CatalogCard::named("Mountain", "Basic Land — Mountain"); 3],
            sideboard: Vec::new(),
        };

        save_deck_document(&document, &path).await.unwrap();
        let loaded = load_deck_document(&path).await.unwrap();
        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_deck_document(&dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(crate::LedgerError::IoError(_))));
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"name": "Sol Ring", "type_line": "Artifact"}]"#).unwrap();

        let catalog = load_catalog(&path).await.unwrap();
        assert!(catalog.get("SOL RING").is_some());
    }
}
