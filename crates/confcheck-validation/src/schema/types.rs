// Schema node payloads

use super::Schema;
use confcheck_yaml::ValueNode;
use regex::Regex;

/// Kind of scalar a [`ScalarSchema`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    String,
    Bool,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "integer",
            ScalarKind::Float => "number",
            ScalarKind::String => "string",
            ScalarKind::Bool => "boolean",
        }
    }

    /// Integers satisfy `Float`; floats never satisfy `Int`.
    pub fn accepts(self, value: &ValueNode) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Int, ValueNode::Int(_))
                | (ScalarKind::Float, ValueNode::Int(_) | ValueNode::Float(_))
                | (ScalarKind::String, ValueNode::String(_))
                | (ScalarKind::Bool, ValueNode::Bool(_))
        )
    }
}

/// A compiled string pattern.
#[derive(Debug, Clone)]
pub struct Pattern(pub(crate) Regex);

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.0.is_match(s)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSchema {
    pub kind: ScalarKind,
    /// Only meaningful for `ScalarKind::String`
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    /// Allowed literals, in declaration order
    pub allowed: Vec<ValueNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSchema {
    pub element: Box<Schema>,
}

/// Map with arbitrary string keys and uniformly typed values
#[derive(Debug, Clone, PartialEq)]
pub struct MapSchema {
    pub value: Box<Schema>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    pub alternatives: Vec<Schema>,
}

/// A declared object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
}

impl Field {
    /// Whether absence is a violation when the field is not gated.
    pub fn is_required(&self) -> bool {
        self.required && !self.schema.is_optional()
    }
}

/// A boolean sibling that switches a group of fields on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub field: String,
    pub gated: Vec<String>,
}

/// Object with a fixed set of named fields.
///
/// Built with [`ObjectSchema::builder`](super::ObjectSchemaBuilder), which
/// checks the gate and field declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub(crate) fields: Vec<Field>,
    pub(crate) closed: bool,
    pub(crate) gate: Option<Gate>,
}

impl ObjectSchema {
    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether undeclared input keys are violations
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }

    pub fn is_gated(&self, name: &str) -> bool {
        self.gate
            .as_ref()
            .is_some_and(|gate| gate.gated.iter().any(|g| g == name))
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all declared fields, joined for messages.
    pub(crate) fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
