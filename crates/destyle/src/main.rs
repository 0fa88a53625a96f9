//! Destyle CLI - migrates styled-components definitions to CSS Modules.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use destyle_transform::{migrate, MigrateOptions, StylesheetNaming};

#[derive(Parser)]
#[command(name = "destyle")]
#[command(about = "Migrates styled-components definitions to CSS Modules")]
#[command(version)]
struct Cli {
    /// Directory to migrate (overrides destyle.toml)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Run the full pipeline without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Path to destyle.toml config file
    #[arg(short, long, default_value = "destyle.toml")]
    config: PathBuf,
}

/// Configuration file structure (destyle.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    migrate: MigrateConfig,
}

#[derive(Debug, Deserialize)]
struct MigrateConfig {
    #[serde(default = "default_root")]
    root: String,
    #[serde(default = "default_style_import")]
    style_import: String,
    #[serde(default = "default_style_ext")]
    style_ext: String,
    #[serde(default = "default_exclude")]
    exclude: String,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            style_import: default_style_import(),
            style_ext: default_style_ext(),
            exclude: default_exclude(),
        }
    }
}

fn default_root() -> String {
    "src".to_string()
}
fn default_style_import() -> String {
    "styles".to_string()
}
fn default_style_ext() -> String {
    "scss".to_string()
}
fn default_exclude() -> String {
    "app/pages".to_string()
}

/// Load configuration from destyle.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &PathBuf) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = load_config(&cli.config)?;

    let options = MigrateOptions {
        root: cli
            .dir
            .unwrap_or_else(|| PathBuf::from(&file_config.migrate.root)),
        dry_run: cli.dry_run,
        naming: StylesheetNaming {
            import_ident: file_config.migrate.style_import,
            ext: file_config.migrate.style_ext,
        },
        exclude_segment: file_config.migrate.exclude,
    };

    if options.dry_run {
        tracing::info!("Dry run: nothing will be written");
    }

    let summary = migrate(&options)?;

    tracing::info!(
        "Scanned {} files: {} transformed, {} left for manual rewrite",
        summary.files_scanned,
        summary.files_transformed,
        summary.files_manual
    );
    tracing::info!(
        "Definitions: {} transformed, {} skipped; {} class tokens treated as global",
        summary.definitions_transformed,
        summary.definitions_skipped,
        summary.global_classes
    );

    Ok(())
}
