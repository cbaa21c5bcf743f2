// End-to-end validation behavior on small schemas

use confcheck_validation::{
    FieldPath, ObjectSchema, PathSegment, Schema, ViolationKind, validate, validate_at,
};
use confcheck_yaml::{Error, ValueNode, parse};

fn key_path(keys: &[&str]) -> FieldPath {
    keys.iter().copied().collect()
}

fn gated_schema() -> Schema {
    ObjectSchema::builder()
        .closed(true)
        .required("enabled", Schema::boolean())
        .required("key", Schema::string())
        .gated_by("enabled", ["key"])
        .build()
        .unwrap()
}

#[test]
fn closed_object_reports_extra_field() {
    let schema = ObjectSchema::builder()
        .closed(true)
        .required("name", Schema::string())
        .build()
        .unwrap();
    let doc = ValueNode::map([("name", ValueNode::from("abc")), ("extra", ValueNode::Int(1))]);

    let violations = validate(&schema, &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "unexpected-field");
    assert_eq!(violations[0].path, key_path(&["extra"]));
}

#[test]
fn closed_object_reports_each_unknown_key_once() {
    let schema = ObjectSchema::builder()
        .closed(true)
        .required("name", Schema::string())
        .build()
        .unwrap();
    let doc = parse("name: abc\nfoo: 1\nbar: [1]\nbaz: {x: 1}").unwrap();

    let violations = validate(&schema, &doc);
    let unexpected: Vec<String> = violations
        .iter()
        .filter(|v| v.code() == "unexpected-field")
        .map(|v| v.path.dotted())
        .collect();
    assert_eq!(unexpected, vec!["foo", "bar", "baz"]);
    assert_eq!(violations.len(), 3);
}

#[test]
fn gate_true_requires_gated_field() {
    let doc = ValueNode::map([("enabled", ValueNode::Bool(true))]);
    let violations = validate(&gated_schema(), &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].kind,
        ViolationKind::MissingField {
            field: "key".into()
        }
    );
    assert_eq!(violations[0].path, key_path(&["key"]));
}

#[test]
fn gate_false_ignores_gated_field() {
    let doc = ValueNode::map([("enabled", ValueNode::Bool(false))]);
    assert!(validate(&gated_schema(), &doc).is_empty());
}

#[test]
fn gate_false_tolerates_invalid_gated_values() {
    // Disabled sections may hold anything, including wrong types.
    let doc = ValueNode::map([("enabled", ValueNode::Bool(false)), ("key", ValueNode::Int(5))]);
    assert!(validate(&gated_schema(), &doc).is_empty());
}

#[test]
fn gate_true_validates_gated_values() {
    let doc = ValueNode::map([("enabled", ValueNode::Bool(true)), ("key", ValueNode::Int(5))]);
    let violations = validate(&gated_schema(), &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "type-mismatch");
    assert_eq!(violations[0].path, key_path(&["key"]));
}

#[test]
fn absent_gate_counts_as_false() {
    let schema = ObjectSchema::builder()
        .closed(true)
        .optional("enabled", Schema::boolean())
        .required("key", Schema::string())
        .gated_by("enabled", ["key"])
        .build()
        .unwrap();
    assert!(validate(&schema, &ValueNode::Map(vec![])).is_empty());
}

#[test]
fn list_element_mismatch_points_at_index() {
    let schema = Schema::list_of(Schema::int());
    let doc = ValueNode::list([ValueNode::Int(1), ValueNode::Int(2), ValueNode::from("x")]);

    let violations = validate(&schema, &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "type-mismatch");
    assert_eq!(violations[0].path.segments(), &[PathSegment::Index(2)]);
}

#[test]
fn enum_lists_allowed_values() {
    let schema = Schema::enumeration(["a", "b"]).unwrap();
    let violations = validate(&schema, &ValueNode::from("c"));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "invalid-enum-value");
    assert!(violations[0].path.is_empty());

    let message = violations[0].message();
    assert!(message.contains("\"a\""));
    assert!(message.contains("\"b\""));
}

#[test]
fn union_reports_single_violation() {
    let schema = Schema::any_of(vec![
        Schema::int(),
        Schema::list_of(Schema::string()),
        ObjectSchema::builder()
            .closed(true)
            .required("a", Schema::int())
            .build()
            .unwrap(),
    ])
    .unwrap();

    assert!(validate(&schema, &ValueNode::Int(3)).is_empty());
    assert!(validate(&schema, &ValueNode::list([ValueNode::from("x")])).is_empty());

    let doc = ValueNode::map([("b", ValueNode::Float(1.5))]);
    let violations = validate(&schema, &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "no-union-match");
    assert!(violations[0].path.is_empty());
}

#[test]
fn float_accepts_int_but_not_reverse() {
    assert!(validate(&Schema::float(), &ValueNode::Int(3)).is_empty());

    let violations = validate(&Schema::int(), &ValueNode::Float(3.5));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "type-mismatch");
}

#[test]
fn null_and_absent_differ() {
    let schema = ObjectSchema::builder()
        .closed(true)
        .optional("nickname", Schema::optional(Schema::string()))
        .build()
        .unwrap();

    assert!(validate(&schema, &ValueNode::Map(vec![])).is_empty());

    let doc = ValueNode::map([("nickname", ValueNode::Null)]);
    let violations = validate(&schema, &doc);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code(), "type-mismatch");

    let nullable = ObjectSchema::builder()
        .closed(true)
        .required("nickname", Schema::nullable(Schema::string()))
        .build()
        .unwrap();
    assert!(validate(&nullable, &doc).is_empty());
}

#[test]
fn empty_collections_are_valid() {
    assert!(validate(&Schema::list_of(Schema::int()), &ValueNode::List(vec![])).is_empty());
    assert!(validate(&Schema::map_of(Schema::int()), &ValueNode::Map(vec![])).is_empty());
}

#[test]
fn nested_violations_accumulate() {
    let athlete = ObjectSchema::builder()
        .closed(true)
        .required("birthday", Schema::string())
        .required("maxHeartRate", Schema::int())
        .build()
        .unwrap();
    let schema = ObjectSchema::builder()
        .closed(true)
        .required("athlete", athlete)
        .required("units", Schema::enumeration(["metric", "imperial"]).unwrap())
        .build()
        .unwrap();

    let doc = parse("athlete:\n  maxHeartRate: high\n  shoe: 42\nunits: si\n").unwrap();
    let violations = validate(&schema, &doc);
    let summary: Vec<(String, &str)> = violations
        .iter()
        .map(|v| (v.path.dotted(), v.code()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("athlete.birthday".to_string(), "missing-field"),
            ("athlete.maxHeartRate".to_string(), "type-mismatch"),
            ("athlete.shoe".to_string(), "unexpected-field"),
            ("units".to_string(), "invalid-enum-value"),
        ]
    );
}

#[test]
fn validation_is_deterministic() {
    let schema = gated_schema();
    let doc = parse("enabled: true\nkey: 3\nother: x\n").unwrap();
    let first = validate(&schema, &doc);
    let second = validate(&schema, &doc);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn duplicate_input_keys_are_rejected_before_validation() {
    for input in [
        "name: abc\nextra: 1\nextra: 2\n",
        "level: not-a-number\nlevel: 3\n",
        "a: x\na: y\n",
    ] {
        let err = parse(input).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }), "{}: {:?}", input, err);
    }
}

#[test]
fn one_violation_per_unknown_key() {
    let schema = ObjectSchema::builder()
        .closed(true)
        .required("name", Schema::string())
        .build()
        .unwrap();
    let doc = parse("name: abc\nextra: 1\nmore: 2\n").unwrap();
    let violations = validate(&schema, &doc);
    let paths: Vec<String> = violations.iter().map(|v| v.path.dotted()).collect();
    assert_eq!(paths, vec!["extra", "more"]);
}

#[test]
fn merge_keys_fill_closed_objects() {
    let zone = ObjectSchema::builder()
        .closed(true)
        .required("from", Schema::int())
        .required("to", Schema::int())
        .build()
        .unwrap();
    let schema = Schema::map_of(zone);
    let doc = parse("a: &base {from: 1, to: 2}\nb:\n  <<: *base\n  to: 3\n").unwrap();
    assert!(validate(&schema, &doc).is_empty());
}

#[test]
fn validate_at_missing_required() {
    let violations = validate_at(&Schema::string(), None, &key_path(&["general", "appUrl"]));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message(), "Missing required field 'appUrl'");
}
