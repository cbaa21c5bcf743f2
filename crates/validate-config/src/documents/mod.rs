//! The configuration documents and their schemas.

mod custom_gear;
mod gear_maintenance;
mod main_config;

use clap::ValueEnum;
use confcheck_validation::{Schema, SchemaResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Which configuration file a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// config.yaml
    Main,
    /// custom-gear.yaml
    CustomGear,
    /// gear-maintenance.yaml
    GearMaintenance,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Main,
        DocumentKind::CustomGear,
        DocumentKind::GearMaintenance,
    ];

    /// Conventional file name.
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Main => "config.yaml",
            DocumentKind::CustomGear => "custom-gear.yaml",
            DocumentKind::GearMaintenance => "gear-maintenance.yaml",
        }
    }

    /// Infer the kind from a file name (`.yaml` or `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let ext = path.extension()?.to_str()?;
        if ext != "yaml" && ext != "yml" {
            return None;
        }
        match stem {
            "config" => Some(DocumentKind::Main),
            "custom-gear" => Some(DocumentKind::CustomGear),
            "gear-maintenance" => Some(DocumentKind::GearMaintenance),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// The schema of every document kind, built once.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    main: Schema,
    custom_gear: Schema,
    gear_maintenance: Schema,
}

impl SchemaSet {
    pub fn build() -> SchemaResult<Self> {
        Ok(Self {
            main: main_config::schema()?,
            custom_gear: custom_gear::schema()?,
            gear_maintenance: gear_maintenance::schema()?,
        })
    }

    pub fn schema(&self, kind: DocumentKind) -> &Schema {
        match kind {
            DocumentKind::Main => &self.main,
            DocumentKind::CustomGear => &self.custom_gear,
            DocumentKind::GearMaintenance => &self.gear_maintenance,
        }
    }
}
