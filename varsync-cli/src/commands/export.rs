//! `varsync --export` — write the store's variables to the export file.

use anyhow::{Context, Result};

use varsync_client::StoreSession;
use varsync_core::settings::Settings;
use varsync_core::types::ScopeDimension;

pub fn run(settings: &Settings) -> Result<()> {
    let export_path = settings
        .export_path
        .as_deref()
        .context("settings need 'exportPath' for --export")?;

    let session = StoreSession::connect(settings).context("cannot connect to the variable store")?;

    let exported = varsync_engine::project(
        session.variables(),
        ScopeDimension::Environment,
        session.scopes(),
    )
    .context("export projection failed")?;

    varsync_engine::write_export(export_path, &exported)
        .with_context(|| format!("cannot write export to '{}'", export_path.display()))?;

    println!(
        "✓ Exported {} variable(s) from '{}' to {}",
        exported.len(),
        session.project().name,
        export_path.display()
    );
    Ok(())
}
