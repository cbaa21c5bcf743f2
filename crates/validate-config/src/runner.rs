//! Checking configuration files and reporting the results.

use crate::documents::{DocumentKind, SchemaSet};
use crate::help::HelpCatalog;
use crate::settings::{OutputFormat, Settings};
use anyhow::{Context, Result, bail};
use confcheck_validation::{Enricher, Notifier, RenderedReport, validate};
use serde_json::json;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file to check, and the schema to check it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// A target whose kind follows from its file name.
    pub fn infer(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = DocumentKind::from_path(&path)?;
        Some(Self { path, kind })
    }

    /// The conventional file of each kind inside `dir`.
    pub fn defaults_in(dir: &Path) -> Vec<Self> {
        DocumentKind::ALL
            .into_iter()
            .map(|kind| Self::new(dir.join(kind.file_name()), kind))
            .collect()
    }
}

/// The targets of one run.
///
/// Without `files`, the conventional files in `dir` are checked: all three,
/// or only the one for `kind`. Given files are checked as `kind` when set;
/// otherwise their kind is inferred from the file name.
pub fn resolve_targets(files: &[PathBuf], dir: &Path, kind: Option<DocumentKind>) -> Result<Vec<Target>> {
    if files.is_empty() {
        return Ok(match kind {
            Some(kind) => vec![Target::new(dir.join(kind.file_name()), kind)],
            None => Target::defaults_in(dir),
        });
    }

    files
        .iter()
        .map(|path| match kind {
            Some(kind) => Ok(Target::new(path.clone(), kind)),
            None => match Target::infer(path.clone()) {
                Some(target) => Ok(target),
                None => bail!(
                    "Cannot tell which configuration file {} is; use --kind",
                    path.display()
                ),
            },
        })
        .collect()
}

/// Result of checking one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Valid,
    Invalid(RenderedReport),
    /// The file could not be read or parsed
    Unreadable(String),
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DocumentOutcome::Valid)
    }

    fn to_json(&self, target: &Target) -> serde_json::Value {
        let file = target.path.display().to_string();
        match self {
            DocumentOutcome::Valid => json!({
                "file": file,
                "kind": target.kind.file_name(),
                "status": "valid",
            }),
            DocumentOutcome::Invalid(report) => json!({
                "file": file,
                "kind": target.kind.file_name(),
                "status": "invalid",
                "violations": report.to_json(),
            }),
            DocumentOutcome::Unreadable(reason) => json!({
                "file": file,
                "kind": target.kind.file_name(),
                "status": "unreadable",
                "reason": reason,
            }),
        }
    }

    fn to_text(&self, target: &Target) -> String {
        let file = target.path.display();
        match self {
            DocumentOutcome::Valid => format!("✅ {} is valid!\n", file),
            DocumentOutcome::Invalid(report) => {
                format!("❌ {} has errors!\n{}", file, report.to_text())
            }
            DocumentOutcome::Unreadable(reason) => format!("❌ {}: {}\n", reason, file),
        }
    }
}

/// Outcomes of a run, in the order the documents were checked.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: Vec<(Target, DocumentOutcome)>,
}

impl RunSummary {
    /// True iff every checked document is valid.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, outcome)| outcome.is_success())
    }

    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.results
                .iter()
                .map(|(target, outcome)| outcome.to_json(target))
                .collect(),
        )
    }
}

/// Validates documents against the built-in schemas.
///
/// One runner is one run: documentation links are announced to the notifier
/// at most once across all the documents it checks.
pub struct Runner<'a> {
    settings: Settings,
    schemas: SchemaSet,
    help: HelpCatalog,
    enricher: Enricher<'a>,
}

impl<'a> Runner<'a> {
    pub fn new(settings: Settings, notifier: impl Notifier + 'a) -> Result<Self> {
        let schemas = SchemaSet::build().context("Invalid built-in schema")?;
        let help = HelpCatalog::embedded(&settings.docs_base_url)
            .context("Invalid built-in field help")?;

        Ok(Self {
            settings,
            schemas,
            help,
            enricher: Enricher::with_notifier(notifier),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read, parse and validate one document.
    pub fn check(&mut self, target: &Target) -> DocumentOutcome {
        let path = &target.path;
        info!(file = %path.display(), kind = ?target.kind, "checking document");

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return DocumentOutcome::Unreadable("File not found".to_string());
            }
            Err(err) => {
                return DocumentOutcome::Unreadable(format!("Could not read file ({})", err));
            }
        };

        let document = match confcheck_yaml::parse(&content) {
            Ok(document) => document,
            Err(err) => return DocumentOutcome::Unreadable(format!("Invalid YAML ({})", err)),
        };

        let violations = validate(self.schemas.schema(target.kind), &document);
        if violations.is_empty() {
            return DocumentOutcome::Valid;
        }

        info!(file = %path.display(), violations = violations.len(), "document has violations");
        let report = self
            .enricher
            .render(&violations, &document, self.help.table(target.kind));
        DocumentOutcome::Invalid(report)
    }

    /// Check every target in order and write the results to `out`.
    ///
    /// Text output is written as each document is checked; JSON output is
    /// written once at the end as an array. With `fail_fast` the run stops
    /// after the first document that is not valid.
    pub fn run<W: Write>(&mut self, targets: &[Target], out: &mut W) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for target in targets {
            let outcome = self.check(target);
            if self.settings.format == OutputFormat::Text {
                write!(out, "{}", outcome.to_text(target))?;
            }

            let failed = !outcome.is_success();
            summary.results.push((target.clone(), outcome));
            if failed && self.settings.fail_fast {
                debug!(file = %target.path.display(), "stopping after first failure");
                break;
            }
        }

        if self.settings.format == OutputFormat::Json {
            writeln!(out, "{:#}", summary.to_json())?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confcheck_validation::NoopNotifier;

    #[test]
    fn test_infer_target() {
        let target = Target::infer("some/dir/gear-maintenance.yaml").unwrap();
        assert_eq!(target.kind, DocumentKind::GearMaintenance);
        assert!(Target::infer("notes.txt").is_none());
    }

    #[test]
    fn test_defaults_in() {
        let targets = Target::defaults_in(Path::new("cfg"));
        let paths: Vec<PathBuf> = targets.into_iter().map(|t| t.path).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("cfg/config.yaml"),
                PathBuf::from("cfg/custom-gear.yaml"),
                PathBuf::from("cfg/gear-maintenance.yaml"),
            ]
        );
    }

    #[test]
    fn test_resolve_defaults() {
        let targets = resolve_targets(&[], Path::new("cfg"), None).unwrap();
        assert_eq!(targets, Target::defaults_in(Path::new("cfg")));

        let targets = resolve_targets(&[], Path::new("cfg"), Some(DocumentKind::CustomGear)).unwrap();
        assert_eq!(
            targets,
            vec![Target::new("cfg/custom-gear.yaml", DocumentKind::CustomGear)]
        );
    }

    #[test]
    fn test_resolve_infers_kind() {
        let files = vec![PathBuf::from("a/gear-maintenance.yml"), PathBuf::from("config.yaml")];
        let targets = resolve_targets(&files, Path::new("ignored"), None).unwrap();
        let kinds: Vec<DocumentKind> = targets.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![DocumentKind::GearMaintenance, DocumentKind::Main]);
        assert_eq!(targets[0].path, PathBuf::from("a/gear-maintenance.yml"));
    }

    #[test]
    fn test_resolve_forced_kind() {
        let files = vec![PathBuf::from("staging.yaml")];
        let targets = resolve_targets(&files, Path::new("."), Some(DocumentKind::Main)).unwrap();
        assert_eq!(targets, vec![Target::new("staging.yaml", DocumentKind::Main)]);
    }

    #[test]
    fn test_resolve_unknown_file_name() {
        let files = vec![PathBuf::from("config.yaml"), PathBuf::from("staging.yaml")];
        let err = resolve_targets(&files, Path::new("."), None).unwrap_err();
        assert!(err.to_string().contains("staging.yaml"));
        assert!(err.to_string().contains("--kind"));
    }

    #[test]
    fn test_missing_file() {
        let mut runner = Runner::new(Settings::default(), NoopNotifier).unwrap();
        let outcome = runner.check(&Target::new("/no/such/config.yaml", DocumentKind::Main));
        assert_eq!(outcome, DocumentOutcome::Unreadable("File not found".into()));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_unreadable_text() {
        let target = Target::new("config.yaml", DocumentKind::Main);
        let text = DocumentOutcome::Unreadable("File not found".into()).to_text(&target);
        assert_eq!(text, "❌ File not found: config.yaml\n");
        assert_eq!(DocumentOutcome::Valid.to_text(&target), "✅ config.yaml is valid!\n");
    }
}
