//! Charsheet - derive a character sheet from a character-builder export.
//!
//! Usage: `charsheet <input.json> [output.json]`. Without an output path the
//! sheet is written to stdout.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_engine::document::load_document;
use charsheet_engine::{CharacterAssembler, EngineConfig};

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: charsheet <input.json> [output.json]");
    };
    let output = args.next().map(PathBuf::from);

    let config = EngineConfig::from_env();
    tracing::debug!(settings = ?config.settings, pretty = config.pretty, "Loaded configuration");

    let character = load_document(&input)
        .with_context(|| format!("Failed to load character export {}", input.display()))?;
    let sheet = CharacterAssembler::new(config.settings).derive(&character);

    let json = if config.pretty {
        serde_json::to_string_pretty(&sheet)
    } else {
        serde_json::to_string(&sheet)
    }
    .context("Failed to serialize character sheet")?;

    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), character = %sheet.name, "Wrote character sheet");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
