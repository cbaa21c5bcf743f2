//! YAML parser that builds ValueNode trees.

use std::collections::HashMap;

use crate::{Error, Result, ValueNode};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML from a string, producing a ValueNode tree.
///
/// Only the first document of a multi-document stream is read. An empty
/// document (or one holding only comments) parses to [`ValueNode::Null`].
///
/// Scalars follow the YAML 1.2 core schema: quoted scalars are always
/// strings, `yes`/`no`/`on`/`off` stay strings. Core tags (`!!str`,
/// `!!int`, ...) override that resolution; any other tag yields a string.
///
/// Merge keys (`<<: *base`) are expanded, explicit keys taking precedence
/// over merged ones. A mapping that repeats a key is an error.
///
/// # Example
///
/// ```rust
/// use confcheck_yaml::{parse, ValueNode};
///
/// let value = parse("enabled: true").unwrap();
/// assert_eq!(value.get("enabled"), Some(&ValueNode::Bool(true)));
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is syntactically invalid, a mapping has a
/// duplicate key, or a core-tagged scalar does not fit its tag.
pub fn parse(content: &str) -> Result<ValueNode> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = ValueBuilder::new();

    parser
        .load(&mut builder, false) // false = single document only
        .map_err(Error::from)?;

    builder.result()
}

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";
const MERGE_KEY: &str = "<<";

/// Event receiver that assembles a ValueNode tree.
struct ValueBuilder {
    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    /// The completed root node
    root: Option<ValueNode>,

    /// First problem seen, reported after loading
    error: Option<Error>,

    /// Anchored nodes by anchor id, for alias resolution
    anchors: HashMap<usize, ValueNode>,
}

/// What the next value in a mapping belongs to.
enum PendingKey {
    Key { name: String, line: usize },
    Merge { line: usize },
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        items: Vec<ValueNode>,
        anchor: usize,
    },
    Mapping {
        entries: Vec<(String, ValueNode)>,
        pending_key: Option<PendingKey>,
        /// Mappings named by `<<`, in precedence order
        merges: Vec<Vec<(String, ValueNode)>>,
        merged: bool,
        anchor: usize,
    },
}

impl ValueBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            error: None,
            anchors: HashMap::new(),
        }
    }

    fn result(self) -> Result<ValueNode> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.stack.is_empty() {
            return Err(Error::InvalidStructure {
                message: "unterminated collection".into(),
            });
        }
        Ok(self.root.unwrap_or(ValueNode::Null))
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn fail_structure(&mut self, message: &str) {
        self.fail(Error::InvalidStructure {
            message: message.to_string(),
        });
    }

    /// True when the next scalar would be read as a key of the open mapping.
    fn expecting_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(BuildNode::Mapping {
                pending_key: None,
                ..
            })
        )
    }

    fn push_complete(&mut self, node: ValueNode, anchor: usize, marker: Marker) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        let Some(parent) = self.stack.last_mut() else {
            // This is the root
            self.root = Some(node);
            return;
        };

        let problem = match parent {
            BuildNode::Sequence { items, .. } => {
                items.push(node);
                None
            }
            BuildNode::Mapping {
                entries,
                pending_key,
                merges,
                ..
            } => match pending_key.take() {
                Some(PendingKey::Key { name, line }) => {
                    if entries.iter().any(|(key, _)| *key == name) {
                        Some(Error::DuplicateKey { key: name, line })
                    } else {
                        entries.push((name, node));
                        None
                    }
                }
                Some(PendingKey::Merge { line }) => match merge_sources(node) {
                    Some(sources) => {
                        merges.extend(sources);
                        None
                    }
                    None => Some(Error::InvalidStructure {
                        message: format!(
                            "merge key on line {} must name a mapping or a list of mappings",
                            line
                        ),
                    }),
                },
                None => {
                    *pending_key = Some(PendingKey::Key {
                        name: key_string(&node),
                        line: marker.line(),
                    });
                    None
                }
            },
        };

        if let Some(err) = problem {
            self.fail(err);
        }
    }

    /// Mark the open mapping's next value as a merge source.
    fn begin_merge(&mut self, marker: Marker) {
        let duplicate = match self.stack.last_mut() {
            Some(BuildNode::Mapping {
                pending_key,
                merged,
                ..
            }) => {
                *pending_key = Some(PendingKey::Merge {
                    line: marker.line(),
                });
                std::mem::replace(merged, true)
            }
            _ => false,
        };

        if duplicate {
            self.fail(Error::DuplicateKey {
                key: MERGE_KEY.to_string(),
                line: marker.line(),
            });
        }
    }

    fn on_scalar(&mut self, value: String, style: TScalarStyle, anchor: usize, tag: Option<Tag>, marker: Marker) {
        let plain = matches!(style, TScalarStyle::Plain);
        if plain && tag.is_none() && value == MERGE_KEY && self.expecting_key() {
            self.begin_merge(marker);
            return;
        }

        let node = match tag {
            Some(tag) => match resolve_tagged_scalar(value, &tag, marker) {
                Ok(node) => node,
                Err(err) => {
                    self.fail(err);
                    ValueNode::Null
                }
            },
            None if plain => parse_plain_scalar(&value),
            None => ValueNode::String(value),
        };
        self.push_complete(node, anchor, marker);
    }
}

impl MarkedEventReceiver for ValueBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, anchor, tag) => {
                self.on_scalar(value, style, anchor, tag, marker);
            }

            Event::SequenceStart(anchor, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    items: Vec::new(),
                    anchor,
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence { items, anchor }) => {
                    self.push_complete(ValueNode::List(items), anchor, marker);
                }
                _ => self.fail_structure("sequence end without matching start"),
            },

            Event::MappingStart(anchor, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                    merges: Vec::new(),
                    merged: false,
                    anchor,
                });
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping {
                    entries,
                    pending_key,
                    merges,
                    anchor,
                    ..
                }) => {
                    if pending_key.is_some() {
                        self.fail_structure("mapping key without value");
                    }
                    let entries = apply_merges(entries, merges);
                    self.push_complete(ValueNode::Map(entries), anchor, marker);
                }
                _ => self.fail_structure("mapping end without matching start"),
            },

            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or(ValueNode::Null);
                self.push_complete(node, 0, marker);
            }

            _ => {}
        }
    }
}

/// The mappings a `<<` value contributes, or `None` if it is not a mapping
/// or a list of mappings.
fn merge_sources(node: ValueNode) -> Option<Vec<Vec<(String, ValueNode)>>> {
    match node {
        ValueNode::Map(entries) => Some(vec![entries]),
        ValueNode::List(items) => items
            .into_iter()
            .map(|item| match item {
                ValueNode::Map(entries) => Some(entries),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Append merged keys the mapping does not set itself. Among merge
/// sources, the first one naming a key wins.
fn apply_merges(
    mut entries: Vec<(String, ValueNode)>,
    merges: Vec<Vec<(String, ValueNode)>>,
) -> Vec<(String, ValueNode)> {
    for source in merges {
        for (key, value) in source {
            if !entries.iter().any(|(existing, _)| *existing == key) {
                entries.push((key, value));
            }
        }
    }
    entries
}

/// Resolve a tagged scalar. Core tags constrain the value; `!!str` and
/// every non-core tag produce a string.
fn resolve_tagged_scalar(value: String, tag: &Tag, marker: Marker) -> Result<ValueNode> {
    if tag.handle != CORE_TAG_PREFIX {
        return Ok(ValueNode::String(value));
    }

    let node = parse_plain_scalar(&value);
    let resolved = match (tag.suffix.as_str(), node) {
        ("bool", node @ ValueNode::Bool(_)) => node,
        ("int", node @ ValueNode::Int(_)) => node,
        ("float", node @ ValueNode::Float(_)) => node,
        ("float", ValueNode::Int(i)) => ValueNode::Float(i as f64),
        ("null", ValueNode::Null) => ValueNode::Null,
        ("bool" | "int" | "float" | "null", _) => {
            return Err(Error::InvalidTaggedValue {
                tag: tag.suffix.clone(),
                value,
                line: marker.line(),
            });
        }
        _ => ValueNode::String(value),
    };
    Ok(resolved)
}

/// Map keys are strings in the value tree; other scalars are stringified.
fn key_string(node: &ValueNode) -> String {
    match node {
        ValueNode::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve an unquoted scalar using the YAML 1.2 core schema.
fn parse_plain_scalar(value: &str) -> ValueNode {
    match value {
        "null" | "Null" | "NULL" | "~" | "" => return ValueNode::Null,
        "true" | "True" | "TRUE" => return ValueNode::Bool(true),
        "false" | "False" | "FALSE" => return ValueNode::Bool(false),
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
            return ValueNode::Float(f64::INFINITY);
        }
        "-.inf" | "-.Inf" | "-.INF" => return ValueNode::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return ValueNode::Float(f64::NAN),
        _ => {}
    }

    if let Ok(i) = value.parse::<i64>() {
        return ValueNode::Int(i);
    }
    if let Some(hex) = value.strip_prefix("0x")
        && let Ok(i) = i64::from_str_radix(hex, 16)
    {
        return ValueNode::Int(i);
    }
    if let Some(oct) = value.strip_prefix("0o")
        && let Ok(i) = i64::from_str_radix(oct, 8)
    {
        return ValueNode::Int(i);
    }

    // Rust's float parser also accepts "inf", "NaN" and friends; YAML does not.
    let looks_numeric = value.chars().any(|c| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if looks_numeric && let Ok(x) = value.parse::<f64>() {
        return ValueNode::Float(x);
    }

    ValueNode::String(value.to_string())
}
