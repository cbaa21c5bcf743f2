//! Field help tables.
//!
//! A help table maps dotted field paths (like `general.athlete.birthday`) to
//! a human description and a documentation anchor. The final link is the
//! table's base URL with the anchor appended.
//!
//! Keys may use `*` in place of a list index, so `customGears.*.tag` covers
//! `customGears.0.tag`, `customGears.1.tag` and so on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Help for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Human description of the field
    pub description: String,

    /// Documentation anchor, appended to the base URL
    pub doc: String,
}

impl HelpEntry {
    pub fn new(description: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            doc: doc.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HelpError {
    #[error("invalid help table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type HelpResult<T> = std::result::Result<T, HelpError>;

/// Read-only lookup table from dotted field path to help.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpTable {
    base_url: String,
    entries: BTreeMap<String, HelpEntry>,
}

impl HelpTable {
    /// An empty table. Every lookup misses, and generic help links to `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries(base_url: impl Into<String>, entries: BTreeMap<String, HelpEntry>) -> Self {
        Self {
            base_url: base_url.into(),
            entries,
        }
    }

    /// Parse a JSON object of `{ "path": { "description": .., "doc": .. } }`.
    ///
    /// ```
    /// use confcheck_report::HelpTable;
    ///
    /// let table = HelpTable::from_json(
    ///     "https://docs.example/#/configuration/",
    ///     r#"{"zwift.level": {"description": "Your Zwift level (1-100).", "doc": "main-configuration"}}"#,
    /// ).unwrap();
    ///
    /// let entry = table.lookup("zwift.level").unwrap();
    /// assert_eq!(
    ///     table.doc_link(entry),
    ///     "https://docs.example/#/configuration/main-configuration"
    /// );
    /// ```
    pub fn from_json(base_url: impl Into<String>, json: &str) -> HelpResult<Self> {
        let entries: BTreeMap<String, HelpEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(base_url, entries))
    }

    pub fn with_entry(mut self, path: impl Into<String>, entry: HelpEntry) -> Self {
        self.entries.insert(path.into(), entry);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Find help for a dotted path.
    ///
    /// The exact key wins. Otherwise wildcard keys are tried in sorted order
    /// and the first one matching is returned.
    pub fn lookup(&self, dotted: &str) -> Option<&HelpEntry> {
        if let Some(entry) = self.entries.get(dotted) {
            return Some(entry);
        }

        self.entries
            .iter()
            .filter(|(key, _)| key.contains('*'))
            .find(|(key, _)| wildcard_matches(key, dotted))
            .map(|(_, entry)| entry)
    }

    /// The documentation link for an entry: base URL followed by its anchor.
    pub fn doc_link(&self, entry: &HelpEntry) -> String {
        format!("{}{}", self.base_url, entry.doc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `*` matches exactly one segment made only of ASCII digits.
fn wildcard_matches(pattern: &str, dotted: &str) -> bool {
    let mut pattern_segments = pattern.split('.');
    let mut path_segments = dotted.split('.');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(seg)) => {
                if seg.is_empty() || !seg.bytes().all(|b| b.is_ascii_digit()) {
                    return false;
                }
            }
            (Some(p), Some(seg)) => {
                if p != seg {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
