// Schema model for configuration documents
//
// A schema is a tree of `Schema` nodes rooted at one object per document
// kind. Schemas are assembled in code through the constructors below and
// `ObjectSchema::builder()`, which reject malformed definitions up front.

mod builder;
mod types;

pub use builder::ObjectSchemaBuilder;
pub use types::{
    EnumSchema, Field, Gate, ListSchema, MapSchema, ObjectSchema, Pattern, ScalarKind,
    ScalarSchema, UnionSchema,
};

use crate::error::{SchemaError, SchemaResult};
use confcheck_yaml::ValueNode;
use regex::Regex;

/// Schema node
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts every value
    Any,
    /// Accepts only null
    Null,
    Scalar(ScalarSchema),
    Enum(EnumSchema),
    List(ListSchema),
    Map(MapSchema),
    Object(ObjectSchema),
    Union(UnionSchema),
    /// The inner schema, or absence
    Optional(Box<Schema>),
}

impl Schema {
    pub fn any() -> Self {
        Schema::Any
    }

    pub fn null() -> Self {
        Schema::Null
    }

    pub fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    pub fn int() -> Self {
        Self::scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    pub fn boolean() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    fn scalar(kind: ScalarKind) -> Self {
        Schema::Scalar(ScalarSchema {
            kind,
            pattern: None,
        })
    }

    /// A string that must match `pattern` somewhere (anchor it to match whole).
    pub fn string_matching(pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Schema::Scalar(ScalarSchema {
            kind: ScalarKind::String,
            pattern: Some(Pattern(regex)),
        }))
    }

    pub fn list_of(element: Schema) -> Self {
        Schema::List(ListSchema {
            element: Box::new(element),
        })
    }

    pub fn map_of(value: Schema) -> Self {
        Schema::Map(MapSchema {
            value: Box::new(value),
        })
    }

    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    /// `inner` or an explicit null.
    pub fn nullable(inner: Schema) -> Self {
        Schema::Union(UnionSchema {
            alternatives: vec![inner, Schema::Null],
        })
    }

    pub fn any_of(alternatives: Vec<Schema>) -> SchemaResult<Self> {
        if alternatives.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Schema::Union(UnionSchema { alternatives }))
    }

    /// Enumeration of literal scalars. Membership is exact: `12` and `"12"`
    /// are different values.
    pub fn enumeration<I, V>(values: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ValueNode>,
    {
        let allowed: Vec<ValueNode> = values.into_iter().map(Into::into).collect();
        if allowed.is_empty() {
            return Err(SchemaError::EmptyEnum);
        }
        if let Some(bad) = allowed
            .iter()
            .find(|v| matches!(v, ValueNode::List(_) | ValueNode::Map(_)))
        {
            return Err(SchemaError::NonScalarEnumValue {
                found: bad.kind_name().to_string(),
            });
        }
        Ok(Schema::Enum(EnumSchema { allowed }))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_))
    }

    /// Short type name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Any => "any",
            Schema::Null => "null",
            Schema::Scalar(s) => s.kind.name(),
            Schema::Enum(_) => "enum",
            Schema::List(_) => "list",
            Schema::Map(_) => "map",
            Schema::Object(_) => "object",
            Schema::Union(_) => "union",
            Schema::Optional(inner) => inner.type_name(),
        }
    }

    /// Human description of the expected shape.
    ///
    /// ```
    /// use confcheck_validation::Schema;
    ///
    /// assert_eq!(Schema::list_of(Schema::string()).describe(), "list of string");
    /// let units = Schema::enumeration(["metric", "imperial"]).unwrap();
    /// assert_eq!(units.describe(), "one of: \"metric\", \"imperial\"");
    /// ```
    pub fn describe(&self) -> String {
        match self {
            Schema::Any => "any value".to_string(),
            Schema::Null => "null".to_string(),
            Schema::Scalar(s) => match &s.pattern {
                Some(pattern) => format!("{} matching {}", s.kind.name(), pattern.as_str()),
                None => s.kind.name().to_string(),
            },
            Schema::Enum(e) => format!(
                "one of: {}",
                e.allowed
                    .iter()
                    .map(ValueNode::literal)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Schema::List(l) => format!("list of {}", l.element.describe()),
            Schema::Map(m) => format!("map of {}", m.value.describe()),
            Schema::Object(_) => "object".to_string(),
            Schema::Union(u) => u
                .alternatives
                .iter()
                .map(Schema::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Schema::Optional(inner) => inner.describe(),
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(Schema::int().describe(), "integer");
        assert_eq!(Schema::float().describe(), "number");
        assert_eq!(Schema::map_of(Schema::int()).describe(), "map of integer");
        assert_eq!(
            Schema::nullable(Schema::string()).describe(),
            "string or null"
        );
        assert_eq!(Schema::optional(Schema::boolean()).describe(), "boolean");
        assert_eq!(
            Schema::enumeration([12, 24]).unwrap().describe(),
            "one of: 12, 24"
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Schema::optional(Schema::int()).type_name(), "integer");
        assert_eq!(Schema::list_of(Schema::any()).type_name(), "list");
    }

    #[test]
    fn test_empty_enum_rejected() {
        let values: Vec<ValueNode> = Vec::new();
        assert!(matches!(
            Schema::enumeration(values),
            Err(SchemaError::EmptyEnum)
        ));
    }

    #[test]
    fn test_non_scalar_enum_rejected() {
        let result = Schema::enumeration([ValueNode::list([ValueNode::Int(1)])]);
        assert!(matches!(result, Err(SchemaError::NonScalarEnumValue { .. })));
    }

    #[test]
    fn test_empty_union_rejected() {
        assert!(matches!(Schema::any_of(vec![]), Err(SchemaError::EmptyUnion)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(matches!(
            Schema::string_matching("(unclosed"),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_pattern_in_description() {
        let url = Schema::string_matching("^https?://").unwrap();
        assert_eq!(url.describe(), "string matching ^https?://");
    }
}
