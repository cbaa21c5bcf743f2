//! Core diagnostic message types.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// How a detail line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// What was found (🔎 bullet)
    Error,
    /// Description of the field (🧾 bullet)
    Info,
    /// Fallback guidance when nothing more specific is known (↪️ bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "🔎",
            DetailKind::Info => "🧾",
            DetailKind::Note => "↪️ ",
        }
    }
}

/// What a docs link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocsKind {
    /// The page documenting this field
    #[default]
    Field,
    /// The documentation root, for fields without their own help
    Root,
}

impl DocsKind {
    fn label(self) -> &'static str {
        match self {
            DocsKind::Field => "See docs",
            DocsKind::Root => "Docs",
        }
    }
}

/// A detail line in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
}

/// One reported problem.
///
/// Structure:
/// 1. **Code**: optional stable identifier (e.g. `missing-field`)
/// 2. **Title**: where the problem is
/// 3. **Problem**: what is wrong
/// 4. **Details**: bulleted supporting lines
/// 5. **Docs URL**: where to read more
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    pub details: Vec<DetailItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,

    #[serde(default)]
    pub docs_kind: DocsKind,
}

impl DiagnosticMessage {
    /// Create a message with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            problem: None,
            details: Vec::new(),
            docs_url: None,
            docs_kind: DocsKind::Field,
        }
    }

    /// Render as text.
    ///
    /// Format:
    /// ```text
    /// • ❌ title: problem
    ///   🔎 error detail
    ///   🧾 info detail
    ///   ↪️  note detail
    ///   📘 See docs: url
    /// ```
    ///
    /// A link to the documentation root reads `📘 Docs: url` instead.
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        // Writing into a String cannot fail.
        let _ = match &self.problem {
            Some(problem) => writeln!(result, "• ❌ {}: {}", self.title, problem),
            None => writeln!(result, "• ❌ {}", self.title),
        };

        for detail in &self.details {
            let _ = writeln!(result, "  {} {}", detail.kind.bullet(), detail.content);
        }

        if let Some(url) = &self.docs_url {
            let _ = writeln!(result, "  📘 {}: {}", self.docs_kind.label(), url);
        }

        result
    }

    /// Render as a JSON value.
    ///
    /// ```
    /// use confcheck_report::DiagnosticMessage;
    ///
    /// let json = DiagnosticMessage::new("`athlete`").to_json();
    /// assert_eq!(json["title"], "`athlete`");
    /// assert!(json.get("code").is_none());
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiagnosticMessage {
        DiagnosticMessage {
            code: Some("type-mismatch".into()),
            title: "`general.athlete.birthday`".into(),
            problem: Some("Expected string, got integer".into()),
            details: vec![
                DetailItem {
                    kind: DetailKind::Error,
                    content: "Invalid value: 1990".into(),
                },
                DetailItem {
                    kind: DetailKind::Info,
                    content: "Your birthday (YYYY-MM-DD).".into(),
                },
            ],
            docs_url: Some("https://docs.example/#/configuration/main-configuration".into()),
            docs_kind: DocsKind::Field,
        }
    }

    #[test]
    fn test_to_text_layout() {
        let text = sample().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "• ❌ `general.athlete.birthday`: Expected string, got integer",
                "  🔎 Invalid value: 1990",
                "  🧾 Your birthday (YYYY-MM-DD).",
                "  📘 See docs: https://docs.example/#/configuration/main-configuration",
            ]
        );
    }

    #[test]
    fn test_note_bullet() {
        let mut msg = DiagnosticMessage::new("x");
        msg.details.push(DetailItem {
            kind: DetailKind::Note,
            content: "Expected type: integer".into(),
        });
        assert!(msg.to_text().contains("  ↪️  Expected type: integer\n"));
    }

    #[test]
    fn test_root_docs_label() {
        let mut msg = DiagnosticMessage::new("x");
        msg.docs_url = Some("https://docs.example/#/configuration/".into());
        msg.docs_kind = DocsKind::Root;
        assert_eq!(
            msg.to_text(),
            "• ❌ x\n  📘 Docs: https://docs.example/#/configuration/\n"
        );
        assert_eq!(msg.to_json()["docs_kind"], "root");
    }

    #[test]
    fn test_title_only() {
        assert_eq!(DiagnosticMessage::new("Broken").to_text(), "• ❌ Broken\n");
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json();
        assert_eq!(json["code"], "type-mismatch");
        assert_eq!(json["details"][0]["kind"], "error");
        assert_eq!(json["details"][1]["content"], "Your birthday (YYYY-MM-DD).");
    }
}
