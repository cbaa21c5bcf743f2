use anyhow::{Context, Result};
use clap::Parser;
use confcheck_validation::{NoopNotifier, Notifier};
use std::io;
use std::path::PathBuf;
use std::process;
use validate_config::{
    BrowserNotifier, DocumentKind, OutputFormat, Runner, Settings, logging, resolve_targets,
};

/// Validate Statistics for Strava configuration files
#[derive(Parser, Debug)]
#[command(name = "validate-config")]
#[command(version)]
#[command(about = "Validate Statistics for Strava configuration files", long_about = None)]
struct Args {
    /// Files to validate (default: config.yaml, custom-gear.yaml and
    /// gear-maintenance.yaml in --dir)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Directory holding the default configuration files
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Validate every file as this kind instead of inferring it from the file name
    #[arg(long, value_enum)]
    kind: Option<DocumentKind>,

    /// Open the documentation of failing fields in a browser
    #[arg(long)]
    open_docs: bool,

    /// Stop after the first file with errors
    #[arg(long)]
    fail_fast: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Base URL of the configuration documentation
    #[arg(long, value_name = "URL")]
    docs_base_url: Option<String>,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    logging::init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    let targets = resolve_targets(&args.files, &args.dir, args.kind)?;

    let browser = BrowserNotifier;
    let noop = NoopNotifier;
    let notifier: &dyn Notifier = if settings.open_docs { &browser } else { &noop };

    let mut runner = Runner::new(settings, notifier)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner
        .run(&targets, &mut out)
        .context("Failed to write report")?;

    Ok(summary.is_success())
}

/// Settings file first, then command-line flags on top.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if args.open_docs {
        settings.open_docs = true;
    }
    if args.fail_fast {
        settings.fail_fast = true;
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    if let Some(url) = &args.docs_base_url {
        settings.docs_base_url = url.clone();
    }

    Ok(settings)
}
