//! varsync — synchronize scoped key/value variables with a remote variable
//! store.
//!
//! # Usage
//!
//! ```text
//! varsync --parse  [--config <path>]
//! varsync --export [--config <path>]
//! varsync --import [--config <path>] [--dry-run] [--yes]
//! ```
//!
//! Exactly one mode flag per invocation; everything else comes from the
//! settings file (default `varsync.json` in the working directory).

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use varsync_core::settings::{Settings, SETTINGS_FILE};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "varsync",
    version,
    about = "Synchronize scoped key/value variables with a remote variable store",
    long_about = None,
)]
#[command(group(ArgGroup::new("mode").required(true).multiple(false)))]
struct Cli {
    /// Convert the legacy XML config into the JSON desired-record format.
    #[arg(short = 'p', long, group = "mode")]
    parse: bool,

    /// Write the store's current variables to the export file.
    #[arg(short = 'e', long, group = "mode")]
    export: bool,

    /// Reconcile desired variables against the store and commit.
    #[arg(short = 'i', long, group = "mode")]
    import: bool,

    /// Path to the settings file.
    #[arg(short = 'c', long, value_name = "PATH", default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Show what the import would change without committing.
    #[arg(long, requires = "import")]
    dry_run: bool,

    /// Skip the confirmation prompt before committing an import.
    #[arg(short = 'y', long, requires = "import")]
    yes: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = Settings::load_at(&cli.config)
        .with_context(|| format!("cannot load settings from '{}'", cli.config.display()))?;

    if cli.parse {
        commands::parse::run(&settings)
    } else if cli.export {
        commands::export::run(&settings)
    } else {
        commands::import::run(&settings, cli.dry_run, cli.yes)
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
