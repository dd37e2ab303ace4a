//! Comparison pipeline orchestration.
//!
//! Runs the straight-through pipeline: validate request → index old archive
//! → index new archive → diff → assemble result. Single-threaded within one
//! comparison; callers may run independent comparisons in parallel.

use crate::diff::{ComparisonResult, DiffEngine};
use crate::error::{ErrorContext, Result};
use crate::model::{ClassIndexBuilder, ComparisonRequest};
use chrono::Utc;

/// Run a comparison, propagating terminal errors.
///
/// Per-class parse failures and per-entry read errors are downgraded to
/// warnings on the result (status `PARTIAL`); request validation failures,
/// unreadable archives, and internal invariant violations are returned as
/// errors.
pub fn compare(request: &ComparisonRequest) -> Result<ComparisonResult> {
    let start_time = Utc::now();
    tracing::info!(
        request_id = %request.request_id,
        old = %request.old_archive.name,
        new = %request.new_archive.name,
        "starting archive comparison"
    );

    request.validate()?;

    let builder = ClassIndexBuilder::new(request.options.clone());
    let old = builder
        .build(&request.old_archive)
        .context("old archive")?;
    let new = builder
        .build(&request.new_archive)
        .context("new archive")?;

    let engine = DiffEngine::new(request.options.clone());
    let changes = engine.diff(&old.index, &new.index);

    let mut warnings = old.warnings;
    warnings.extend(new.warnings);

    let end_time = Utc::now();
    let result = ComparisonResult::completed(
        request.request_id.clone(),
        old.display_name,
        new.display_name,
        changes,
        start_time,
        end_time,
        old.index.len(),
        new.index.len(),
        warnings,
    );

    // Aggregates are derived in one place, but a mismatch here would poison
    // every consumer downstream, so it is checked before handoff.
    result
        .comparison_summary
        .verify_against(&result.changes)
        .context("assembling comparison result")?;

    tracing::info!(
        request_id = %request.request_id,
        changes = result.comparison_summary.total_changes,
        breaking = result.comparison_summary.breaking_changes,
        duration_ms = result.duration_ms,
        "archive comparison completed"
    );

    Ok(result)
}

/// Run a comparison, converting terminal errors into a `FAILED` result with
/// a single diagnostic string.
pub fn run_comparison(request: &ComparisonRequest) -> ComparisonResult {
    let start_time = Utc::now();
    match compare(request) {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(
                request_id = %request.request_id,
                error = %error,
                "archive comparison failed"
            );
            ComparisonResult::failed(
                request.request_id.clone(),
                request.old_archive.name.clone(),
                request.new_archive.name.clone(),
                start_time,
                Utc::now(),
                error.diagnostic(),
            )
        }
    }
}
