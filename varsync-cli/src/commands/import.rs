//! `varsync --import` — reconcile desired records against the store and
//! commit.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use tabled::{settings::Style, Table, Tabled};

use varsync_client::StoreSession;
use varsync_core::settings::Settings;
use varsync_core::types::ScopeDimension;
use varsync_engine::{reconcile, ReconcileAction, ReconcileReport};

pub fn run(settings: &Settings, dry_run: bool, yes: bool) -> Result<()> {
    // Source is read before any remote contact: a format error must abort
    // with the store untouched.
    let desired = varsync_source::load(
        settings.variables_file_format,
        &settings.variables_file_path,
    )
    .with_context(|| {
        format!(
            "cannot read desired records from '{}'",
            settings.variables_file_path.display()
        )
    })?;

    if desired.is_empty() {
        println!(
            "No desired records in '{}' — nothing to do.",
            settings.variables_file_path.display()
        );
        return Ok(());
    }

    let mut session =
        StoreSession::connect(settings).context("cannot connect to the variable store")?;
    let target = session
        .resolve_environment(&settings.environment)
        .with_context(|| {
            format!(
                "environment '{}' is not known to project '{}'",
                settings.environment, settings.project_name
            )
        })?;

    if !dry_run && !yes {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Import {} variable(s) into '{}' ({})?",
                desired.len(),
                settings.project_name,
                settings.environment
            ))
            .default(false)
            .interact()
            .context("confirmation prompt failed; use --yes for non-interactive runs")?;
        if !proceed {
            println!("Aborted — nothing committed.");
            return Ok(());
        }
    }

    let report = reconcile(
        session.variables_mut(),
        &target,
        &desired,
        ScopeDimension::Environment,
    );
    print_report(&settings.environment, &report, dry_run);

    if dry_run {
        println!("[dry-run] no changes committed.");
        return Ok(());
    }
    if report.is_noop() {
        println!("Store already matches the desired state — nothing to commit.");
        return Ok(());
    }

    session
        .commit()
        .context("commit failed — the store was not modified")?;
    println!(
        "✓ Committed {} change(s) to '{}'",
        report.changed(),
        settings.project_name
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "variable")]
    variable: String,
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn print_report(environment: &str, report: &ReconcileReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for warning in &report.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    let rows: Vec<ActionRow> = report
        .outcomes
        .iter()
        .filter(|o| o.action != ReconcileAction::Unchanged)
        .map(|o| ActionRow {
            variable: o.name.clone(),
            action: action_label(&o.action).to_string(),
            detail: action_detail(&o.action),
        })
        .collect();

    if rows.is_empty() {
        println!("{prefix}✓ '{environment}' — nothing to do");
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "{prefix}✓ '{environment}' reconciled ({} changed, {} unchanged, {} skipped)",
        report.changed(),
        report.unchanged(),
        report.skipped()
    );
}

fn action_label(action: &ReconcileAction) -> &'static str {
    match action {
        ReconcileAction::Created => "create",
        ReconcileAction::ReusedScope => "reuse scope",
        ReconcileAction::SensitiveOverwritten => "overwrite",
        ReconcileAction::FlagsUpdated => "update flags",
        ReconcileAction::Unchanged => "unchanged",
        ReconcileAction::MergedOntoDonor => "merge",
        ReconcileAction::ValueUpdated => "update value",
        ReconcileAction::Split => "split",
        ReconcileAction::SkippedLocked => "skip",
        ReconcileAction::Invalid { .. } => "skip",
    }
}

fn action_detail(action: &ReconcileAction) -> String {
    match action {
        ReconcileAction::ReusedScope | ReconcileAction::MergedOntoDonor => {
            "equal value elsewhere; scope widened".to_string()
        }
        ReconcileAction::SensitiveOverwritten => "sensitive value is opaque".to_string(),
        ReconcileAction::Split => "record was shared across scopes".to_string(),
        ReconcileAction::SkippedLocked => "not editable".to_string(),
        ReconcileAction::Invalid { reason } => reason.clone(),
        _ => String::new(),
    }
}
