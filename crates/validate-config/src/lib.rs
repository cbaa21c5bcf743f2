//! Validation of Statistics for Strava configuration files.
//!
//! Three documents are supported, each with its own schema and help table:
//! `config.yaml`, `custom-gear.yaml` and `gear-maintenance.yaml`. The
//! [`Runner`] reads, parses, validates and reports on each of them.

pub mod documents;
pub mod help;
pub mod logging;
pub mod notify;
pub mod runner;
pub mod settings;

pub use documents::{DocumentKind, SchemaSet};
pub use help::HelpCatalog;
pub use notify::BrowserNotifier;
pub use runner::{DocumentOutcome, RunSummary, Runner, Target, resolve_targets};
pub use settings::{DEFAULT_DOCS_BASE_URL, OutputFormat, Settings, SettingsError};
