use confcheck_validation::Notifier;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use validate_config::logging::DEFAULT_LOG_FILTER;
use validate_config::{DocumentOutcome, Runner, Settings, Target};

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8(bytes).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct NoBrowser;

impl Notifier for NoBrowser {
    fn notify(&self, _link: &str) -> io::Result<()> {
        Err(io::Error::other("no browser available"))
    }
}

#[test]
fn default_filter_shows_notifier_failures() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom-gear.yaml");
    fs::write(
        &path,
        "enabled: true\nhashtagPrefix: sfs\ncustomGears:\n  - tag: a\n    label: A\n    isRetired: nope\n",
    )
    .unwrap();
    let target = Target::infer(path).unwrap();

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let outcome = tracing::subscriber::with_default(subscriber, || {
        let mut runner = Runner::new(Settings::default(), NoBrowser).unwrap();
        runner.check(&target)
    });

    assert!(matches!(outcome, DocumentOutcome::Invalid(_)));
    let logs = captured.text();
    assert!(logs.contains("could not open documentation link"), "{}", logs);
    assert!(logs.contains("no browser available"), "{}", logs);
    // info-level progress stays hidden by default
    assert!(!logs.contains("checking document"), "{}", logs);
}
