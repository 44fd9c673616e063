//! envstack demo - example wiring for the settings chain.
//!
//! Responsibilities:
//! - Declare a small schema and load it through the default chain
//!   (overrides, env vars, `_FILE` env vars).
//! - Show the `_FILE` secrets pattern end to end:
//!   `LAUNCH_CODE_FILE=/run/secrets/launch_code envstack-demo`.
//!
//! Does NOT handle:
//! - Resolution or validation logic (see `crates/settings`).
//!
//! Invariants:
//! - `.env` loading happens BEFORE snapshot capture so dotenv-provided
//!   variables participate in resolution.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use envstack_settings::{FieldSpec, Schema, SettingsLoader};
use secrecy::ExposeSecret;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "envstack-demo", about = "Load example settings from the environment")]
struct Cli {
    /// Explicit .env file to load before resolution.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Prefix applied to field-derived variable names (e.g. "APP_").
    #[arg(long, default_value = "")]
    env_prefix: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Unable to load settings: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let schema = Schema::new()
        .field(FieldSpec::new("threshold").required())
        .field(FieldSpec::new("launch_code").required());

    let mut loader = SettingsLoader::new(schema).with_env_prefix(cli.env_prefix);
    loader = match cli.env_file {
        Some(path) => loader
            .load_dotenv_from(&path)
            .with_context(|| format!("loading env file {}", path.display()))?,
        None => loader.load_dotenv().context("loading .env")?,
    };

    let settings = loader.load()?;
    tracing::info!(warnings = settings.warnings().len(), "settings loaded");

    let threshold: u64 = settings
        .parse("threshold")?
        .context("threshold resolved but empty")?;
    let launch_code = settings
        .secret("launch_code")
        .context("launch_code resolved but empty")?;

    println!("Loaded settings:");
    println!("  threshold   = {threshold}");
    println!(
        "  launch_code = {} chars (redacted)",
        launch_code.expose_secret().len()
    );
    for warning in settings.warnings() {
        println!("  warning: {warning}");
    }

    Ok(())
}
