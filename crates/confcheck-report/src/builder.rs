//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticMessage, DocsKind};

/// Builder for creating diagnostic messages.
///
/// # Example
///
/// ```
/// use confcheck_report::DiagnosticMessageBuilder;
///
/// let msg = DiagnosticMessageBuilder::new("`appearance.unitSystem`")
///     .with_code("invalid-enum-value")
///     .problem("Value must be one of: \"metric\", \"imperial\", got \"si\"")
///     .add_detail("Invalid value: si")
///     .add_info("Metric or imperial units.")
///     .with_docs_url("https://docs.example/#/configuration/main-configuration")
///     .build();
///
/// assert_eq!(msg.code, Some("invalid-enum-value".to_string()));
/// assert_eq!(msg.details.len(), 2);
/// assert!(msg.docs_url.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    title: String,
    code: Option<String>,
    problem: Option<String>,
    details: Vec<DetailItem>,
    docs_url: Option<String>,
    docs_kind: DocsKind,
}

impl DiagnosticMessageBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            docs_url: None,
            docs_kind: DocsKind::Field,
        }
    }

    /// Set the violation code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the problem statement shown on the title line.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    /// Add an error detail (🔎 bullet).
    pub fn add_detail(self, detail: impl Into<String>) -> Self {
        self.push(DetailKind::Error, detail)
    }

    /// Add an info detail (🧾 bullet).
    pub fn add_info(self, info: impl Into<String>) -> Self {
        self.push(DetailKind::Info, info)
    }

    /// Add a note detail (↪️ bullet).
    pub fn add_note(self, note: impl Into<String>) -> Self {
        self.push(DetailKind::Note, note)
    }

    /// Link to the page documenting this field.
    pub fn with_docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self.docs_kind = DocsKind::Field;
        self
    }

    /// Link to the documentation root, when the field has no page of its own.
    pub fn with_docs_root(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self.docs_kind = DocsKind::Root;
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            problem: self.problem,
            details: self.details,
            docs_url: self.docs_url,
            docs_kind: self.docs_kind,
        }
    }

    fn push(mut self, kind: DetailKind, content: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind,
            content: content.into(),
        });
        self
    }
}
