//! Diagnostic messages and field help for configuration validation reports.
//!
//! This crate holds the presentation side of a validation run:
//!
//! - [`DiagnosticMessage`]: one reported problem, with emoji-bulleted details
//!   and an optional documentation link
//! - [`DiagnosticMessageBuilder`]: builder API for assembling messages
//! - [`HelpTable`]: per-field descriptions and documentation links, keyed by
//!   dotted field path
//!
//! # Example
//!
//! ```
//! use confcheck_report::DiagnosticMessageBuilder;
//!
//! let msg = DiagnosticMessageBuilder::new("`general.appUrl`")
//!     .with_code("type-mismatch")
//!     .problem("Expected string, got integer")
//!     .add_detail("Invalid value: 42")
//!     .build();
//!
//! assert!(msg.to_text().starts_with("• ❌ `general.appUrl`: Expected string"));
//! ```

pub mod builder;
pub mod diagnostic;
pub mod help;

pub use builder::DiagnosticMessageBuilder;
pub use diagnostic::{DetailItem, DetailKind, DiagnosticMessage, DocsKind};
pub use help::{HelpEntry, HelpError, HelpResult, HelpTable};
