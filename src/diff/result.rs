//! Comparison result structures and summary aggregates.

use super::record::{ChangeKind, ChangeRecord, CompatibilityImpact};
use crate::error::{JarDiffError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The analysis family this result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisType {
    JarComparison,
}

/// Terminal execution status of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    /// Completed with no warnings.
    Success,
    /// Completed, but some classes were skipped or degraded.
    Partial,
    /// Did not complete; see the diagnostic.
    Failed,
}

/// Summary aggregates over the change list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_changes: usize,
    pub breaking_changes: usize,
    pub class_changes: usize,
    pub method_changes: usize,
    pub field_changes: usize,
    pub changes_by_type: BTreeMap<ChangeKind, usize>,
    pub changes_by_impact: BTreeMap<CompatibilityImpact, usize>,
}

impl ComparisonSummary {
    /// Compute aggregates from a change list.
    #[must_use]
    pub fn from_changes(changes: &[ChangeRecord]) -> Self {
        let mut summary = Self {
            total_changes: changes.len(),
            ..Self::default()
        };

        for change in changes {
            if change.is_breaking_change() {
                summary.breaking_changes += 1;
            }
            if change.is_class_level_change() {
                summary.class_changes += 1;
            }
            if change.is_method_level_change() {
                summary.method_changes += 1;
            }
            if change.is_field_level_change() {
                summary.field_changes += 1;
            }
            *summary.changes_by_type.entry(change.kind).or_insert(0) += 1;
            *summary
                .changes_by_impact
                .entry(change.compatibility_impact)
                .or_insert(0) += 1;
        }

        summary
    }

    /// Check this summary against a change list; a mismatch is an internal
    /// invariant violation and must never be suppressed.
    pub fn verify_against(&self, changes: &[ChangeRecord]) -> Result<()> {
        let recomputed = Self::from_changes(changes);
        if self.total_changes != recomputed.total_changes
            || self.breaking_changes != recomputed.breaking_changes
            || self.class_changes != recomputed.class_changes
            || self.method_changes != recomputed.method_changes
            || self.field_changes != recomputed.field_changes
            || self.changes_by_type != recomputed.changes_by_type
            || self.changes_by_impact != recomputed.changes_by_impact
        {
            return Err(JarDiffError::internal(format!(
                "comparison summary does not match the change list \
                 (summary: {} total, recomputed: {} total)",
                self.total_changes, recomputed.total_changes
            )));
        }
        Ok(())
    }
}

/// Complete result of one archive comparison.
///
/// Created once at the end of a comparison and read-only afterwards. The
/// serialized form is the wire contract consumed by the hosting surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ComparisonResult {
    /// Opaque identifier of the originating request.
    pub request_id: String,
    pub analysis_type: AnalysisType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: i64,
    pub status: AnalysisStatus,
    pub old_jar_name: String,
    pub new_jar_name: String,
    pub old_jar_class_count: usize,
    pub new_jar_class_count: usize,
    /// Ordered change records.
    pub changes: Vec<ChangeRecord>,
    pub comparison_summary: ComparisonSummary,
    pub warnings: Vec<String>,
    /// Single diagnostic; present only when `status` is `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ComparisonResult {
    /// Assemble a completed comparison. Status is `SUCCESS` with no
    /// warnings, `PARTIAL` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn completed(
        request_id: impl Into<String>,
        old_jar_name: impl Into<String>,
        new_jar_name: impl Into<String>,
        changes: Vec<ChangeRecord>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        old_jar_class_count: usize,
        new_jar_class_count: usize,
        warnings: Vec<String>,
    ) -> Self {
        let status = if warnings.is_empty() {
            AnalysisStatus::Success
        } else {
            AnalysisStatus::Partial
        };
        let comparison_summary = ComparisonSummary::from_changes(&changes);

        Self {
            request_id: request_id.into(),
            analysis_type: AnalysisType::JarComparison,
            start_time,
            end_time,
            duration_ms: (end_time - start_time).num_milliseconds(),
            status,
            old_jar_name: old_jar_name.into(),
            new_jar_name: new_jar_name.into(),
            old_jar_class_count,
            new_jar_class_count,
            changes,
            comparison_summary,
            warnings,
            error_message: None,
        }
    }

    /// Assemble a failed comparison: no change list, a single diagnostic.
    pub fn failed(
        request_id: impl Into<String>,
        old_jar_name: impl Into<String>,
        new_jar_name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            analysis_type: AnalysisType::JarComparison,
            start_time,
            end_time,
            duration_ms: (end_time - start_time).num_milliseconds(),
            status: AnalysisStatus::Failed,
            old_jar_name: old_jar_name.into(),
            new_jar_name: new_jar_name.into(),
            old_jar_class_count: 0,
            new_jar_class_count: 0,
            changes: Vec::new(),
            comparison_summary: ComparisonSummary::default(),
            warnings: Vec::new(),
            error_message: Some(error_message.into()),
        }
    }

    /// Whether the comparison produced usable output.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        matches!(self.status, AnalysisStatus::Success | AnalysisStatus::Partial)
    }

    /// Whether any breaking change was found.
    #[must_use]
    pub fn has_breaking_changes(&self) -> bool {
        self.comparison_summary.breaking_changes > 0
    }

    /// Changes of one kind.
    pub fn changes_of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(move |c| c.kind == kind)
    }

    /// Changes with one impact label.
    pub fn changes_with_impact(
        &self,
        impact: CompatibilityImpact,
    ) -> impl Iterator<Item = &ChangeRecord> {
        self.changes
            .iter()
            .filter(move |c| c.compatibility_impact == impact)
    }

    /// Changes touching one class.
    pub fn changes_for_class<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a ChangeRecord> {
        self.changes.iter().filter(move |c| c.class_name == class_name)
    }

    /// Number of distinct classes touched by at least one change.
    #[must_use]
    pub fn classes_touched(&self) -> usize {
        let mut names: Vec<&str> = self.changes.iter().map(|c| c.class_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Compared {} with {}: {} total changes ({} breaking, {} class-level, {} method-level, {} field-level)",
            self.old_jar_name,
            self.new_jar_name,
            self.comparison_summary.total_changes,
            self.comparison_summary.breaking_changes,
            self.comparison_summary.class_changes,
            self.comparison_summary.method_changes,
            self.comparison_summary.field_changes
        )
    }
}
