// Turning violations into an actionable report
//
// Each violation becomes one block: where it is, what is wrong, the value
// actually found there, and either field-specific help from a help table or
// a generic hint with a link to the documentation root.

use crate::error::{FieldPath, Violation};
use crate::validator::navigate;
use confcheck_report::{DiagnosticMessage, DiagnosticMessageBuilder, HelpTable};
use confcheck_yaml::ValueNode;
use serde_json::json;
use std::collections::HashSet;
use std::fmt;
use std::io;
use tracing::warn;

/// Side channel told about documentation links as they are rendered.
pub trait Notifier {
    fn notify(&self, link: &str) -> io::Result<()>;
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _link: &str) -> io::Result<()> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, link: &str) -> io::Result<()> {
        (**self).notify(link)
    }
}

/// The value found at a violation's path.
#[derive(Debug, Clone, PartialEq)]
pub enum ActualValue {
    Found(ValueNode),
    NotFound,
}

impl ActualValue {
    fn to_json(&self) -> serde_json::Value {
        match self {
            ActualValue::Found(value) => value.to_json(),
            ActualValue::NotFound => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for ActualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualValue::Found(value) => write!(f, "{}", value),
            ActualValue::NotFound => write!(f, "<value not found>"),
        }
    }
}

/// Help attached to a rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockHelp {
    /// The help table knows the field
    Documented { description: String, link: String },
    /// Fallback: what the schema expected, and the documentation root
    Generic { expected: String, link: String },
}

impl BlockHelp {
    pub fn link(&self) -> &str {
        match self {
            BlockHelp::Documented { link, .. } | BlockHelp::Generic { link, .. } => link,
        }
    }
}

/// One violation, enriched.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub path: FieldPath,
    pub code: &'static str,
    pub message: String,
    pub actual: ActualValue,
    pub help: BlockHelp,
}

impl RenderedBlock {
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        let builder = DiagnosticMessageBuilder::new(format!("`{}`", self.path.dotted()))
            .with_code(self.code)
            .problem(self.message.clone())
            .add_detail(format!("Invalid value: {}", self.actual));

        let builder = match &self.help {
            BlockHelp::Documented { description, link } => {
                builder.add_info(description.clone()).with_docs_url(link.clone())
            }
            BlockHelp::Generic { expected, link } => builder
                .add_note(format!("Expected type: {}", expected))
                .with_docs_root(link.clone()),
        };
        builder.build()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let help = match &self.help {
            BlockHelp::Documented { description, link } => json!({
                "kind": "documented",
                "description": description,
                "link": link,
            }),
            BlockHelp::Generic { expected, link } => json!({
                "kind": "generic",
                "expected": expected,
                "link": link,
            }),
        };

        json!({
            "path": self.path.dotted(),
            "segments": self.path,
            "code": self.code,
            "message": self.message,
            "found": matches!(self.actual, ActualValue::Found(_)),
            "actual": self.actual.to_json(),
            "help": help,
        })
    }
}

/// Enriched violations, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedReport {
    blocks: Vec<RenderedBlock>,
}

impl RenderedReport {
    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render as text.
    ///
    /// ```text
    /// ❌ Validation failed:
    ///
    /// • ❌ `appearance.unitSystem`: Value must be one of: "metric", "imperial", got "si"
    ///   🔎 Invalid value: si
    ///   🧾 Metric or imperial units.
    ///   📘 See docs: https://.../#/configuration/main-configuration
    ///
    /// ```
    pub fn to_text(&self) -> String {
        let mut text = String::from("❌ Validation failed:\n\n");
        for block in &self.blocks {
            text.push_str(&block.to_diagnostic().to_text());
            text.push('\n');
        }
        text
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.blocks.iter().map(RenderedBlock::to_json).collect())
    }
}

/// Renders violations against the document they came from.
///
/// The enricher remembers which documentation links it has passed to its
/// notifier, so over one run each link is announced at most once.
pub struct Enricher<'a> {
    notifier: Box<dyn Notifier + 'a>,
    notified: HashSet<String>,
}

impl Default for Enricher<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Enricher<'a> {
    /// An enricher with a [`NoopNotifier`]
    pub fn new() -> Self {
        Self::with_notifier(NoopNotifier)
    }

    pub fn with_notifier(notifier: impl Notifier + 'a) -> Self {
        Self {
            notifier: Box::new(notifier),
            notified: HashSet::new(),
        }
    }

    /// Build one block per violation, in order.
    ///
    /// The notifier hears about field documentation links (not the generic
    /// documentation root) the first time each is rendered. Notifier
    /// failures are logged and otherwise ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use confcheck_report::HelpTable;
    /// use confcheck_validation::{validate, Enricher, ObjectSchema, Schema};
    /// use confcheck_yaml::ValueNode;
    ///
    /// let schema = ObjectSchema::builder()
    ///     .closed(true)
    ///     .required("name", Schema::string())
    ///     .build()
    ///     .unwrap();
    /// let doc = ValueNode::map([("name", ValueNode::Int(7))]);
    ///
    /// let violations = validate(&schema, &doc);
    /// let help = HelpTable::new("https://docs.example/");
    /// let report = Enricher::new().render(&violations, &doc, &help);
    ///
    /// assert_eq!(report.len(), 1);
    /// assert!(report.to_text().contains("🔎 Invalid value: 7"));
    /// ```
    pub fn render(&mut self, violations: &[Violation], document: &ValueNode, help: &HelpTable) -> RenderedReport {
        let blocks = violations
            .iter()
            .map(|violation| self.render_block(violation, document, help))
            .collect();
        RenderedReport { blocks }
    }

    fn render_block(&mut self, violation: &Violation, document: &ValueNode, help: &HelpTable) -> RenderedBlock {
        let actual = match navigate(&violation.path, document, 0) {
            Some(value) => ActualValue::Found(value.clone()),
            None => ActualValue::NotFound,
        };

        let block_help = match help.lookup(&violation.path.dotted()) {
            Some(entry) => {
                let link = help.doc_link(entry);
                self.notify_once(&link);
                BlockHelp::Documented {
                    description: entry.description.clone(),
                    link,
                }
            }
            None => BlockHelp::Generic {
                expected: violation.expected.clone(),
                link: help.base_url().to_string(),
            },
        };

        RenderedBlock {
            path: violation.path.clone(),
            code: violation.code(),
            message: violation.message(),
            actual,
            help: block_help,
        }
    }

    fn notify_once(&mut self, link: &str) {
        if !self.notified.insert(link.to_string()) {
            return;
        }
        if let Err(err) = self.notifier.notify(link) {
            warn!(link, error = %err, "could not open documentation link");
        }
    }
}
