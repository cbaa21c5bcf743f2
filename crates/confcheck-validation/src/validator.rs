// Configuration validation engine

use crate::error::{FieldPath, PathSegment, Violation, ViolationKind};
use crate::schema::{EnumSchema, ListSchema, MapSchema, ObjectSchema, ScalarSchema, Schema, UnionSchema};
use confcheck_yaml::ValueNode;
use tracing::debug;

/// Validate a whole document against a schema.
///
/// Every violation is collected; validation never stops at the first one.
/// An empty result means the document is valid.
///
/// # Example
///
/// ```
/// use confcheck_validation::{validate, Schema};
/// use confcheck_yaml::ValueNode;
///
/// let schema = Schema::list_of(Schema::int());
/// let value = ValueNode::list([ValueNode::Int(1), ValueNode::Int(2), ValueNode::from("x")]);
///
/// let violations = validate(&schema, &value);
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].code(), "type-mismatch");
/// assert_eq!(violations[0].path.to_string(), "2");
/// ```
pub fn validate(schema: &Schema, value: &ValueNode) -> Vec<Violation> {
    validate_at(schema, Some(value), &FieldPath::new())
}

/// Validate a possibly absent value found at `path`.
///
/// An absent value satisfies only an `Optional` schema; any other schema
/// reports it as a missing field.
pub fn validate_at(schema: &Schema, value: Option<&ValueNode>, path: &FieldPath) -> Vec<Violation> {
    debug!(path = %path, schema = schema.type_name(), "validation started");

    let mut context = ValidationContext::at(path.clone());
    match value {
        Some(value) => validate_generic(value, schema, &mut context),
        None => {
            if !schema.is_optional() {
                let field = path
                    .last()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| path.to_string());
                context.add_violation(ViolationKind::MissingField { field }, schema.describe());
            }
        }
    }

    debug!(path = %path, violations = context.violations.len(), "validation finished");
    context.into_violations()
}

/// Validation context tracks state during validation
pub struct ValidationContext {
    /// Current path (e.g., ["general", "athlete", "birthday"])
    path: FieldPath,
    /// Collected violations
    violations: Vec<Violation>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::at(FieldPath::new())
    }

    /// A context whose current path starts at `path`
    pub fn at(path: FieldPath) -> Self {
        Self {
            path,
            violations: Vec::new(),
        }
    }

    /// Record a violation at the current path
    pub fn add_violation(&mut self, kind: ViolationKind, expected: impl Into<String>) {
        self.violations
            .push(Violation::new(kind, self.path.clone(), expected));
    }

    /// Execute a function with a new path segment
    pub fn with_path<F, R>(&mut self, segment: PathSegment, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigate through a value tree using a field path
///
/// Returns `None` as soon as a segment is missing or does not fit the node
/// (a key on a list, an index on a map, anything on a scalar).
pub fn navigate<'a>(path: &FieldPath, value: &'a ValueNode, path_index: usize) -> Option<&'a ValueNode> {
    let Some(segment) = path.segments().get(path_index) else {
        return Some(value);
    };

    let next = match (segment, value) {
        (PathSegment::Key(key), ValueNode::Map(_)) => value.get(key)?,
        (PathSegment::Index(index), ValueNode::List(items)) => items.get(*index)?,
        _ => return None,
    };
    navigate(path, next, path_index + 1)
}

/// Main validation dispatcher
fn validate_generic(value: &ValueNode, schema: &Schema, context: &mut ValidationContext) {
    match schema {
        Schema::Any => {}
        Schema::Null => validate_null(value, context),
        Schema::Scalar(s) => validate_scalar(value, s, context),
        Schema::Enum(s) => validate_enum(value, s, context),
        Schema::List(s) => validate_list(value, schema, s, context),
        Schema::Map(s) => validate_map(value, schema, s, context),
        Schema::Object(s) => validate_object(value, s, context),
        Schema::Union(s) => validate_union(value, schema, s, context),
        Schema::Optional(inner) => validate_generic(value, inner, context),
    }
}

fn type_mismatch(value: &ValueNode, expected: &str, described: String, context: &mut ValidationContext) {
    context.add_violation(
        ViolationKind::TypeMismatch {
            expected: expected.to_string(),
            got: value.kind_name().to_string(),
        },
        described,
    );
}

fn validate_null(value: &ValueNode, context: &mut ValidationContext) {
    if !value.is_null() {
        type_mismatch(value, "null", "null".to_string(), context);
    }
}

fn validate_scalar(value: &ValueNode, schema: &ScalarSchema, context: &mut ValidationContext) {
    if !schema.kind.accepts(value) {
        let described = Schema::Scalar(schema.clone()).describe();
        type_mismatch(value, schema.kind.name(), described, context);
        return;
    }

    if let (Some(pattern), ValueNode::String(s)) = (&schema.pattern, value)
        && !pattern.is_match(s)
    {
        context.add_violation(
            ViolationKind::PatternMismatch {
                value: s.clone(),
                pattern: pattern.as_str().to_string(),
            },
            format!("string matching {}", pattern.as_str()),
        );
    }
}

fn validate_enum(value: &ValueNode, schema: &EnumSchema, context: &mut ValidationContext) {
    if schema.allowed.contains(value) {
        return;
    }

    let allowed: Vec<String> = schema.allowed.iter().map(ValueNode::literal).collect();
    let expected = format!("one of: {}", allowed.join(", "));
    context.add_violation(
        ViolationKind::InvalidEnumValue {
            value: value.literal(),
            allowed,
        },
        expected,
    );
}

fn validate_list(value: &ValueNode, schema: &Schema, list: &ListSchema, context: &mut ValidationContext) {
    let Some(items) = value.as_list() else {
        type_mismatch(value, "list", schema.describe(), context);
        return;
    };

    for (i, item) in items.iter().enumerate() {
        context.with_path(PathSegment::Index(i), |ctx| {
            validate_generic(item, &list.element, ctx)
        });
    }
}

fn validate_map(value: &ValueNode, schema: &Schema, map: &MapSchema, context: &mut ValidationContext) {
    let Some(entries) = value.as_map() else {
        type_mismatch(value, "map", schema.describe(), context);
        return;
    };

    for (key, item) in entries {
        context.with_path(PathSegment::Key(key.clone()), |ctx| {
            validate_generic(item, &map.value, ctx)
        });
    }
}

/// Validate an object, honoring its gate and closed field set
fn validate_object(value: &ValueNode, schema: &ObjectSchema, context: &mut ValidationContext) {
    let Some(entries) = value.as_map() else {
        type_mismatch(value, "object", "object".to_string(), context);
        return;
    };

    // The gate is read directly from this object, never from nested values.
    let gate_open = schema
        .gate()
        .is_some_and(|gate| matches!(value.get(&gate.field), Some(ValueNode::Bool(true))));

    for field in schema.fields() {
        let gated = schema.is_gated(&field.name);
        if gated && !gate_open {
            continue;
        }
        let required = gated || field.is_required();

        context.with_path(PathSegment::Key(field.name.clone()), |ctx| match value.get(&field.name) {
            Some(child) => validate_generic(child, &field.schema, ctx),
            None if required => ctx.add_violation(
                ViolationKind::MissingField {
                    field: field.name.clone(),
                },
                field.schema.describe(),
            ),
            None => {}
        });
    }

    if schema.is_closed() {
        let expected = format!("no extra fields; allowed: {}", schema.field_list());
        for (key, _) in entries {
            if !schema.declares(key) {
                context.with_path(PathSegment::Key(key.clone()), |ctx| {
                    ctx.add_violation(
                        ViolationKind::UnexpectedField { field: key.clone() },
                        expected.clone(),
                    )
                });
            }
        }
    }
}

/// Validate a union (at least one alternative must match)
fn validate_union(value: &ValueNode, schema: &Schema, union: &UnionSchema, context: &mut ValidationContext) {
    for alternative in &union.alternatives {
        let mut trial = ValidationContext::at(context.path.clone());
        validate_generic(value, alternative, &mut trial);
        if !trial.has_violations() {
            return;
        }
    }

    context.add_violation(
        ViolationKind::NoUnionMatch {
            alternatives: union.alternatives.iter().map(Schema::describe).collect(),
        },
        schema.describe(),
    );
}
