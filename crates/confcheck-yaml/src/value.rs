//! The generic value tree produced by the parser.

use std::fmt;

/// A node of a parsed configuration document.
///
/// Maps keep their keys in input order. If a document repeats a key, both
/// entries are kept and lookups return the last one.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ValueNode>),
    Map(Vec<(String, ValueNode)>),
}

impl ValueNode {
    /// Build a map node from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValueNode)>,
    {
        ValueNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a list node.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ValueNode>,
    {
        ValueNode::List(items.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueNode::Null)
    }

    pub fn as_map(&self) -> Option<&[(String, ValueNode)]> {
        match self {
            ValueNode::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValueNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up a key in a map node.
    pub fn get(&self, key: &str) -> Option<&ValueNode> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up an element of a list node.
    pub fn get_index(&self, index: usize) -> Option<&ValueNode> {
        self.as_list()?.get(index)
    }

    /// Name of the node's type as shown in violation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueNode::Null => "null",
            ValueNode::Bool(_) => "boolean",
            ValueNode::Int(_) => "integer",
            ValueNode::Float(_) => "float",
            ValueNode::String(_) => "string",
            ValueNode::List(_) => "list",
            ValueNode::Map(_) => "map",
        }
    }

    /// Literal rendering used when listing enum members: strings quoted.
    pub fn literal(&self) -> String {
        match self {
            ValueNode::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }

    /// Convert to a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ValueNode::Null => serde_json::Value::Null,
            ValueNode::Bool(b) => serde_json::Value::Bool(*b),
            ValueNode::Int(i) => serde_json::Value::from(*i),
            ValueNode::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ValueNode::String(s) => serde_json::Value::String(s.clone()),
            ValueNode::List(items) => {
                serde_json::Value::Array(items.iter().map(ValueNode::to_json).collect())
            }
            ValueNode::Map(entries) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in entries {
                    obj.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(obj)
            }
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueNode::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Top-level strings are written raw; strings nested in lists and maps are
/// quoted. Collections use YAML flow style.
impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueNode::Null => write!(f, "null"),
            ValueNode::Bool(b) => write!(f, "{}", b),
            ValueNode::Int(i) => write!(f, "{}", i),
            ValueNode::Float(x) => {
                if x.is_nan() {
                    write!(f, ".nan")
                } else if x.is_infinite() {
                    write!(f, "{}", if *x > 0.0 { ".inf" } else { "-.inf" })
                } else {
                    write!(f, "{:?}", x)
                }
            }
            ValueNode::String(s) => write!(f, "{}", s),
            ValueNode::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "]")
            }
            ValueNode::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", k)?;
                    v.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ValueNode {
    fn from(b: bool) -> Self {
        ValueNode::Bool(b)
    }
}

impl From<i64> for ValueNode {
    fn from(i: i64) -> Self {
        ValueNode::Int(i)
    }
}

impl From<i32> for ValueNode {
    fn from(i: i32) -> Self {
        ValueNode::Int(i64::from(i))
    }
}

impl From<f64> for ValueNode {
    fn from(x: f64) -> Self {
        ValueNode::Float(x)
    }
}

impl From<&str> for ValueNode {
    fn from(s: &str) -> Self {
        ValueNode::String(s.to_string())
    }
}

impl From<String> for ValueNode {
    fn from(s: String) -> Self {
        ValueNode::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get() {
        let node = ValueNode::map([("a", ValueNode::Int(1)), ("b", ValueNode::Int(2))]);
        assert_eq!(node.get("b"), Some(&ValueNode::Int(2)));
        assert_eq!(node.get("c"), None);
    }

    #[test]
    fn test_get_on_non_map() {
        assert_eq!(ValueNode::Int(1).get("a"), None);
        assert_eq!(ValueNode::from("x").get_index(0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueNode::from("abc").to_string(), "abc");
        assert_eq!(ValueNode::Float(1.0).to_string(), "1.0");
        assert_eq!(ValueNode::Null.to_string(), "null");
        let list = ValueNode::list([ValueNode::Int(1), ValueNode::from("x")]);
        assert_eq!(list.to_string(), "[1, \"x\"]");
        let map = ValueNode::map([("k", ValueNode::Bool(true))]);
        assert_eq!(map.to_string(), "{k: true}");
    }

    #[test]
    fn test_literal_quotes_strings() {
        assert_eq!(ValueNode::from("metric").literal(), "\"metric\"");
        assert_eq!(ValueNode::Int(12).literal(), "12");
    }

    #[test]
    fn test_to_json() {
        let node = ValueNode::map([
            ("n", ValueNode::Null),
            ("f", ValueNode::Float(f64::NAN)),
            ("l", ValueNode::list([ValueNode::Int(3)])),
        ]);
        assert_eq!(
            node.to_json(),
            serde_json::json!({"n": null, "f": null, "l": [3]})
        );
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(ValueNode::Int(1).kind_name(), "integer");
        assert_eq!(ValueNode::Float(1.5).kind_name(), "float");
        assert_eq!(ValueNode::Map(vec![]).kind_name(), "map");
    }
}
