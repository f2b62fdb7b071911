//! Variable reconciliation engine.
//!
//! [`reconcile`] walks an ordered list of desired records against one
//! in-memory [`VariableSet`] and applies the minimal mutations needed to make
//! the target scope reflect the desired state, without disturbing entries for
//! other scopes. Pure in-memory: no I/O happens here — callers commit the
//! mutated set afterwards.
//!
//! ## Decision order per desired record
//!
//! 1. matched + sensitive → unconditional overwrite (stored value is opaque)
//! 2. matched + equal value → refresh flags only
//! 3. matched + differing value + editable donor elsewhere → widen donor,
//!    drop the match
//! 4. matched + differing value + editable + sole scope → in-place value write
//! 5. matched + differing value + editable + shared scope → split
//! 6. matched + not editable → untouched
//! 7. unmatched + editable donor elsewhere → widen donor
//! 8. unmatched → append a new record

use varsync_core::types::{ScopeDimension, ScopeId, Variable, VariableSet, VariableSpec};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What the reconciler did for one desired record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No match, no donor — a fresh record was appended.
    Created,
    /// No match; an equal-value record elsewhere had the target scope added.
    ReusedScope,
    /// Matched record is sensitive — value and editability rewritten
    /// unconditionally.
    SensitiveOverwritten,
    /// Values already equal; sensitivity/editability flags were brought in
    /// line.
    FlagsUpdated,
    /// Values and flags already equal — nothing to do.
    Unchanged,
    /// An equal-value donor gained the target scope and the matched record
    /// was removed.
    MergedOntoDonor,
    /// Matched record served only the target scope — value rewritten in
    /// place.
    ValueUpdated,
    /// Target scope carved out of a shared record into a fresh one.
    Split,
    /// Matched record is not editable — change silently ignored.
    SkippedLocked,
    /// Malformed desired record, skipped without aborting the batch.
    Invalid { reason: String },
}

impl ReconcileAction {
    /// Whether this action mutated the collection.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            ReconcileAction::Unchanged
                | ReconcileAction::SkippedLocked
                | ReconcileAction::Invalid { .. }
        )
    }
}

/// Outcome for a single desired record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub name: String,
    pub action: ReconcileAction,
}

/// Summary of one reconciliation batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcomes: Vec<ReconcileOutcome>,
    pub warnings: Vec<String>,
}

impl ReconcileReport {
    /// Number of records whose processing mutated the collection.
    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.action.is_mutation()).count()
    }

    /// Number of records that were already in the desired state.
    pub fn unchanged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == ReconcileAction::Unchanged)
            .count()
    }

    /// Number of records skipped (locked or invalid).
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.action,
                    ReconcileAction::SkippedLocked | ReconcileAction::Invalid { .. }
                )
            })
            .count()
    }

    /// `true` when the batch produced no mutation at all.
    pub fn is_noop(&self) -> bool {
        self.changed() == 0
    }
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

/// Reconcile `desired` against `set` for one target scope id of `dimension`.
///
/// Records are processed in input order; a malformed record (blank name) is
/// reported and skipped without stopping the batch.
pub fn reconcile(
    set: &mut VariableSet,
    target: &ScopeId,
    desired: &[VariableSpec],
    dimension: ScopeDimension,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for spec in desired {
        if spec.name.trim().is_empty() {
            tracing::warn!("skipping desired record with empty name");
            report
                .warnings
                .push("desired record with empty name skipped".to_string());
            report.outcomes.push(ReconcileOutcome {
                name: spec.name.clone(),
                action: ReconcileAction::Invalid {
                    reason: "empty name".to_string(),
                },
            });
            continue;
        }

        let action = reconcile_one(set, target, spec, dimension, &mut report.warnings);
        tracing::debug!("'{}' on {target}: {action:?}", spec.name);
        report.outcomes.push(ReconcileOutcome {
            name: spec.name.clone(),
            action,
        });
    }

    report
}

fn reconcile_one(
    set: &mut VariableSet,
    target: &ScopeId,
    spec: &VariableSpec,
    dimension: ScopeDimension,
    warnings: &mut Vec<String>,
) -> ReconcileAction {
    // Existing record already serving the target scope.
    let matches: Vec<usize> = set
        .variables
        .iter()
        .enumerate()
        .filter(|(_, v)| v.name == spec.name && v.scope.contains(dimension, target))
        .map(|(i, _)| i)
        .collect();
    if matches.len() > 1 {
        let warning = format!(
            "'{}' has {} records scoped to {target}; using the first",
            spec.name,
            matches.len()
        );
        tracing::warn!("{warning}");
        warnings.push(warning);
    }
    let matched = matches.first().copied();

    // Same name and value on a different scope of the same dimension.
    // Sensitive records never qualify: their stored value is unreadable.
    let donor = set.variables.iter().position(|v| {
        v.name == spec.name
            && !v.is_sensitive
            && v.scope.has_dimension(dimension)
            && !v.scope.contains(dimension, target)
            && v.value.as_deref() == Some(spec.value.as_str())
    });

    match matched {
        Some(index) => {
            if set.variables[index].is_sensitive {
                // The store never returns a sensitive value, so equality is
                // unobservable — always assume drift.
                let var = &mut set.variables[index];
                var.value = Some(spec.value.clone());
                var.is_editable = spec.is_editable;
                return ReconcileAction::SensitiveOverwritten;
            }

            if set.variables[index].value.as_deref() == Some(spec.value.as_str()) {
                let var = &mut set.variables[index];
                let flags_differ =
                    var.is_editable != spec.is_editable || var.is_sensitive != spec.is_sensitive;
                var.is_editable = spec.is_editable;
                var.is_sensitive = spec.is_sensitive;
                return if flags_differ {
                    ReconcileAction::FlagsUpdated
                } else {
                    ReconcileAction::Unchanged
                };
            }

            // Value differs. Prefer consolidating onto an editable donor:
            // the donor takes over the target scope and the matched record
            // goes away.
            if let Some(donor_index) = donor.filter(|&i| set.variables[i].is_editable) {
                set.variables[donor_index]
                    .scope
                    .insert(dimension, target.clone());
                set.variables.remove(index);
                return ReconcileAction::MergedOntoDonor;
            }

            if !set.variables[index].is_editable {
                return ReconcileAction::SkippedLocked;
            }

            if set.variables[index].scope.count(dimension) == 1 {
                // Sole consumer of this record — safe to rewrite in place.
                set.variables[index].value = Some(spec.value.clone());
                return ReconcileAction::ValueUpdated;
            }

            // Shared record: carve the target scope out and give it a fresh
            // record carrying the desired payload.
            set.variables[index].scope.remove(dimension, target);
            set.variables
                .push(Variable::from_spec(spec, dimension, target.clone()));
            ReconcileAction::Split
        }
        None => {
            if let Some(donor_index) = donor.filter(|&i| set.variables[i].is_editable) {
                set.variables[donor_index]
                    .scope
                    .insert(dimension, target.clone());
                ReconcileAction::ReusedScope
            } else {
                set.variables
                    .push(Variable::from_spec(spec, dimension, target.clone()));
                ReconcileAction::Created
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
