// Builder for object schemas

use super::types::{Field, Gate, ObjectSchema, ScalarKind, ScalarSchema};
use super::Schema;
use crate::error::{SchemaError, SchemaResult};
use std::collections::HashSet;

/// Builder for [`ObjectSchema`].
///
/// Declaration problems (duplicate fields, a gate that is not a declared
/// boolean, gated fields that do not exist) are reported by [`build`].
///
/// # Example
///
/// ```
/// use confcheck_validation::{ObjectSchema, Schema};
///
/// let ai = ObjectSchema::builder()
///     .closed(true)
///     .required("enabled", Schema::boolean())
///     .required("provider", Schema::enumeration(["openAI", "ollama"]).unwrap())
///     .gated_by("enabled", ["provider"])
///     .build()
///     .unwrap();
///
/// assert_eq!(ai.type_name(), "object");
/// ```
///
/// [`build`]: ObjectSchemaBuilder::build
#[derive(Debug, Clone, Default)]
pub struct ObjectSchemaBuilder {
    fields: Vec<Field>,
    closed: bool,
    gates: Vec<Gate>,
}

impl ObjectSchema {
    /// Start building an object schema. Objects are open until `.closed(true)`.
    pub fn builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }
}

impl ObjectSchemaBuilder {
    /// Declare a field that must be present (unless its schema is optional).
    pub fn required(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, schema, true)
    }

    /// Declare a field that may be absent.
    pub fn optional(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, schema, false)
    }

    /// Reject input keys that are not declared.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Make `fields` conditional on the boolean field `gate`.
    ///
    /// While the gate is `true` the gated fields are required and validated.
    /// Otherwise they are ignored entirely.
    pub fn gated_by<I, S>(mut self, gate: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gates.push(Gate {
            field: gate.into(),
            gated: fields.into_iter().map(Into::into).collect(),
        });
        self
    }

    fn field(mut self, name: impl Into<String>, schema: Schema, required: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            schema,
            required,
        });
        self
    }

    /// Check the declarations and produce the object schema.
    pub fn build_object(self) -> SchemaResult<ObjectSchema> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name.clone(),
                });
            }
        }

        let mut gates = self.gates.into_iter();
        let gate = gates.next();
        if let (Some(first), Some(second)) = (&gate, gates.next()) {
            return Err(SchemaError::MultipleGates {
                first: first.field.clone(),
                second: second.field,
            });
        }

        let object = ObjectSchema {
            fields: self.fields,
            closed: self.closed,
            gate,
        };
        if let Some(gate) = &object.gate {
            check_gate(&object, gate)?;
        }
        Ok(object)
    }

    /// Like [`build_object`](Self::build_object), wrapped as a [`Schema`].
    pub fn build(self) -> SchemaResult<Schema> {
        self.build_object().map(Schema::Object)
    }
}

fn check_gate(object: &ObjectSchema, gate: &Gate) -> SchemaResult<()> {
    let Some(gate_field) = object.field(&gate.field) else {
        return Err(SchemaError::UnknownGateField {
            gate: gate.field.clone(),
        });
    };

    if !is_boolean(&gate_field.schema) {
        return Err(SchemaError::GateNotBoolean {
            gate: gate.field.clone(),
            found: gate_field.schema.describe(),
        });
    }

    for name in &gate.gated {
        if name == &gate.field {
            return Err(SchemaError::GateGatesItself {
                gate: gate.field.clone(),
            });
        }
        if !object.declares(name) {
            return Err(SchemaError::UnknownGatedField {
                field: name.clone(),
            });
        }
    }

    Ok(())
}

fn is_boolean(schema: &Schema) -> bool {
    match schema {
        Schema::Scalar(ScalarSchema {
            kind: ScalarKind::Bool,
            ..
        }) => true,
        Schema::Optional(inner) => is_boolean(inner),
        _ => false,
    }
}
