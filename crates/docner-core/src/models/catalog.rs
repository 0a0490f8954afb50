//! Entity catalog: the fixed list of literal strings the annotator looks for.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocnerError, Result};

/// A single literal-text entity to search for.
///
/// Field names serialize in the `Text` / `Type` / `Context` form used by
/// entity-list files for NER training tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Literal text matched by substring search.
    #[serde(rename = "Text")]
    pub text: String,

    /// Entity type tag (e.g. `COMPANY_NAME`).
    #[serde(rename = "Type")]
    pub entity_type: String,

    /// Text that must appear on an earlier line for a match to count.
    #[serde(rename = "Context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl CatalogEntry {
    /// Create an entry without a context rule.
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            context: None,
        }
    }

    /// Require `context` on a strictly earlier line.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Ordered list of catalog entries. Declaration order is output order within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EntityCatalog {
    entries: Vec<CatalogEntry>,
}

impl EntityCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The catalog of the Global Tiles purchase-order workflow.
    pub fn global_tiles() -> Self {
        Self::new(vec![
            CatalogEntry::new("Global Tiles", "COMPANY_NAME"),
            CatalogEntry::new("CF24 5EF", "POSTCODE"),
            CatalogEntry::new("info@globaltiles.co.uk", "EMAIL"),
            CatalogEntry::new("95481", "CUSTOMER_PO_NUMBER"),
            CatalogEntry::new("TIS3067", "PRODUCT"),
            CatalogEntry::new("1", "QUANTITY").with_context("TIS3067"),
            CatalogEntry::new("TIS4294", "PRODUCT"),
            CatalogEntry::new("1", "QUANTITY").with_context("TIS4294"),
        ])
    }

    /// Load a catalog from a JSON array of entries.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject entries that could never match.
    pub fn validate(&self) -> Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.text.is_empty() {
                return Err(DocnerError::Config(format!(
                    "catalog entry {} has empty Text",
                    i + 1
                )));
            }
            if entry.context.as_deref() == Some("") {
                return Err(DocnerError::Config(format!(
                    "catalog entry {} ('{}') has empty Context",
                    i + 1,
                    entry.text
                )));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

impl From<Vec<CatalogEntry>> for EntityCatalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a EntityCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_entity_list_json() {
        let json = r#"[
            {"Text": "Global Tiles", "Type": "COMPANY_NAME"},
            {"Text": "1", "Type": "QUANTITY", "Context": "TIS3067"}
        ]"#;
        let catalog: EntityCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(
            catalog.entries(),
            &[
                CatalogEntry::new("Global Tiles", "COMPANY_NAME"),
                CatalogEntry::new("1", "QUANTITY").with_context("TIS3067"),
            ]
        );
    }

    #[test]
    fn test_context_omitted_when_absent() {
        let json = serde_json::to_string(&CatalogEntry::new("CF24 5EF", "POSTCODE")).unwrap();
        assert_eq!(json, r#"{"Text":"CF24 5EF","Type":"POSTCODE"}"#);
    }

    #[test]
    fn test_global_tiles_catalog_order() {
        let catalog = EntityCatalog::global_tiles();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.entries()[0].text, "Global Tiles");
        assert_eq!(catalog.entries()[7].context.as_deref(), Some("TIS4294"));
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let catalog = EntityCatalog::new(vec![CatalogEntry::new("", "EMPTY")]);
        assert!(matches!(catalog.validate(), Err(DocnerError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"Text": "ACME", "Type": "COMPANY_NAME"}]"#).unwrap();

        let catalog = EntityCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.entries(), &[CatalogEntry::new("ACME", "COMPANY_NAME")]);
    }
}
