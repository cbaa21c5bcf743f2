// Schema-based validation for configuration documents
//
// A schema describes the expected shape of one configuration file. The
// validator walks a parsed document against it and collects every violation
// it finds; the enricher turns those violations into a report with the
// offending value and field-specific help.

pub mod enrich;
pub mod error;
pub mod schema;
pub mod validator;

pub use enrich::{
    ActualValue, BlockHelp, Enricher, NoopNotifier, Notifier, RenderedBlock, RenderedReport,
};
pub use error::{FieldPath, PathSegment, SchemaError, SchemaResult, Violation, ViolationKind};
pub use schema::{Field, Gate, ObjectSchema, ObjectSchemaBuilder, ScalarKind, Schema};
pub use validator::{ValidationContext, navigate, validate, validate_at};
