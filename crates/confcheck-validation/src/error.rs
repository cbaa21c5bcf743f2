// Error types for configuration validation

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Mistakes made while assembling a schema.
///
/// These are programming errors in the schema definitions themselves and
/// surface when the schema is built, never while validating a document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("gate field '{gate}' is not declared in the object")]
    UnknownGateField { gate: String },

    #[error("gate field '{gate}' must be a boolean, found {found}")]
    GateNotBoolean { gate: String, found: String },

    #[error("gated field '{field}' is not declared in the object")]
    UnknownGatedField { field: String },

    #[error("gate field '{gate}' cannot gate itself")]
    GateGatesItself { gate: String },

    #[error("an object can have at most one gate, found '{first}' and '{second}'")]
    MultipleGates { first: String, second: String },

    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },

    #[error("enumeration must allow at least one value")]
    EmptyEnum,

    #[error("enumeration values must be scalars, found {found}")]
    NonScalarEnumValue { found: String },

    #[error("union must have at least one alternative")]
    EmptyUnion,

    #[error("invalid string pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A segment in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PathSegment {
    /// Map key
    Key(String),
    /// List index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a document (e.g., ["customGears", 0, "tag"])
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a new empty path (the document root)
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Pop the last segment from the path
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the segments as a slice
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A copy of this path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment.into());
        path
    }

    /// Segments joined with `.`, indices in decimal. The root is `""`.
    ///
    /// This is the key format used by help tables.
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.dotted())
        }
    }
}

/// What went wrong at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A required field is absent
    MissingField { field: String },

    /// A closed object contains a key it does not declare
    UnexpectedField { field: String },

    /// The value has the wrong type
    TypeMismatch { expected: String, got: String },

    /// The value is not one of the allowed literals
    InvalidEnumValue { value: String, allowed: Vec<String> },

    /// No alternative of a union accepted the value
    NoUnionMatch { alternatives: Vec<String> },

    /// A string does not match the required pattern
    PatternMismatch { value: String, pattern: String },
}

impl ViolationKind {
    /// Stable identifier of the violation kind.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingField { .. } => "missing-field",
            ViolationKind::UnexpectedField { .. } => "unexpected-field",
            ViolationKind::TypeMismatch { .. } => "type-mismatch",
            ViolationKind::InvalidEnumValue { .. } => "invalid-enum-value",
            ViolationKind::NoUnionMatch { .. } => "no-union-match",
            ViolationKind::PatternMismatch { .. } => "pattern-mismatch",
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            ViolationKind::MissingField { field } => {
                format!("Missing required field '{}'", field)
            }
            ViolationKind::UnexpectedField { field } => {
                format!("Unexpected field '{}'", field)
            }
            ViolationKind::TypeMismatch { expected, got } => {
                format!("Expected {}, got {}", expected, got)
            }
            ViolationKind::InvalidEnumValue { value, allowed } => {
                format!("Value must be one of: {}, got {}", allowed.join(", "), value)
            }
            ViolationKind::NoUnionMatch { alternatives } => {
                format!(
                    "Value does not match any allowed shape: {}",
                    alternatives.join(" | ")
                )
            }
            ViolationKind::PatternMismatch { value, pattern } => {
                format!("String '{}' does not match pattern '{}'", value, pattern)
            }
        }
    }
}

/// A single structural problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,

    /// Where in the document the problem is
    pub path: FieldPath,

    /// Description of the shape the schema expects at `path`
    pub expected: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, path: FieldPath, expected: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            expected: expected.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message())
    }
}
