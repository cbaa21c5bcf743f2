//! # confcheck-yaml
//!
//! YAML parsing into a generic, dynamically-typed value tree.
//!
//! The validator and the error enricher never look at YAML directly. They
//! consume a [`ValueNode`]: maps with ordered string keys, ordered lists and
//! scalars. This crate turns YAML 1.2 text into that tree.
//!
//! ## Example
//!
//! ```rust
//! use confcheck_yaml::{parse, ValueNode};
//!
//! let doc = parse("appearance:\n  locale: en_US\n  timeFormat: 24").unwrap();
//! let appearance = doc.get("appearance").unwrap();
//! assert_eq!(appearance.get("timeFormat"), Some(&ValueNode::Int(24)));
//! ```

mod error;
mod parser;
mod value;

pub use error::{Error, Result};
pub use parser::parse;
pub use value::ValueNode;
