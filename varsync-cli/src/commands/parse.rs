//! `varsync --parse` — legacy XML config to JSON desired records.

use anyhow::{Context, Result};

use varsync_core::settings::Settings;

pub fn run(settings: &Settings) -> Result<()> {
    let legacy = settings
        .legacy_config_path
        .as_deref()
        .context("settings need 'legacyConfigPath' for --parse")?;

    let specs = varsync_source::legacy::convert(legacy, &settings.variables_file_path)
        .with_context(|| format!("failed to convert '{}'", legacy.display()))?;

    println!(
        "✓ Parsed {} variable(s) from '{}'",
        specs.len(),
        legacy.display()
    );
    println!("  Wrote: {}", settings.variables_file_path.display());
    Ok(())
}
