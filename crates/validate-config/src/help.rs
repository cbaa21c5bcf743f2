//! Field help for every document kind.
//!
//! The help text lives in `field_help.json`, embedded at compile time so the
//! binary needs no data files at runtime.

use crate::documents::DocumentKind;
use confcheck_report::{HelpEntry, HelpResult, HelpTable};
use std::collections::BTreeMap;

const FIELD_HELP_JSON: &str = include_str!("../field_help.json");

/// One help table per document kind, sharing a documentation base URL.
#[derive(Debug, Clone)]
pub struct HelpCatalog {
    tables: BTreeMap<DocumentKind, HelpTable>,
    empty: HelpTable,
}

impl HelpCatalog {
    /// Load the embedded help data.
    pub fn embedded(base_url: &str) -> HelpResult<Self> {
        Self::from_json(base_url, FIELD_HELP_JSON)
    }

    /// Parse `{ "<kind>": { "<dotted.path>": { "description", "doc" } } }`.
    ///
    /// Kinds missing from the JSON get an empty table.
    pub fn from_json(base_url: &str, json: &str) -> HelpResult<Self> {
        let sections: BTreeMap<DocumentKind, BTreeMap<String, HelpEntry>> =
            serde_json::from_str(json)?;

        let tables = sections
            .into_iter()
            .map(|(kind, entries)| (kind, HelpTable::from_entries(base_url, entries)))
            .collect();

        Ok(Self {
            tables,
            empty: HelpTable::new(base_url),
        })
    }

    pub fn table(&self, kind: DocumentKind) -> &HelpTable {
        self.tables.get(&kind).unwrap_or(&self.empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_DOCS_BASE_URL;

    #[test]
    fn test_embedded_loads_every_kind() {
        let catalog = HelpCatalog::embedded(DEFAULT_DOCS_BASE_URL).unwrap();
        for kind in DocumentKind::ALL {
            assert!(!catalog.table(kind).is_empty(), "no help for {}", kind);
        }
    }

    #[test]
    fn test_embedded_links() {
        let catalog = HelpCatalog::embedded(DEFAULT_DOCS_BASE_URL).unwrap();
        let table = catalog.table(DocumentKind::Main);
        let entry = table.lookup("integrations.ai.provider").unwrap();
        assert_eq!(
            table.doc_link(entry),
            "https://statistics-for-strava-docs.robiningelbrecht.be/#/configuration/ai-integration"
        );
    }

    #[test]
    fn test_missing_section_is_empty() {
        let catalog = HelpCatalog::from_json("https://x/", r#"{"main": {}}"#).unwrap();
        assert!(catalog.table(DocumentKind::CustomGear).is_empty());
        assert_eq!(catalog.table(DocumentKind::CustomGear).base_url(), "https://x/");
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(HelpCatalog::from_json("https://x/", r#"{"nope": {}}"#).is_err());
    }
}
