//! **A structural diff engine for compiled Java archives.**
//!
//! `jardiff` compares two JAR (ZIP-format) archives and produces a
//! structured report of every observable difference in their class surface:
//! classes added or removed, methods added or removed, access-modifier
//! changes, field additions, removals and type changes, and annotation
//! presence changes. Each reported difference carries a binary-compatibility
//! impact label so a consumer can judge upgrade risk.
//!
//! The engine reads class files directly — constant pool, class header,
//! member tables, and a small set of attributes — without ever interpreting
//! method bodies, and is deterministic: for fixed inputs and options the
//! emitted change list is byte-identical across runs.
//!
//! ## Core Concepts & Modules
//!
//! - **[`archive`]**: walks the class-file entries of a ZIP-format archive.
//! - **[`classfile`]**: parses one class-file payload into a structural
//!   summary.
//! - **[`model`]**: the [`ClassSummary`] data model, the per-archive
//!   [`ClassIndex`], and the [`ComparisonRequest`] with its policy flags.
//! - **[`diff`]**: the [`DiffEngine`] pairing entities across the two
//!   indices, the change-record types, and the compatibility classifier.
//! - **[`pipeline`]**: the one-call orchestration from request to
//!   [`ComparisonResult`].
//! - **[`reports`]**: JSON rendering of results in the wire shape.
//!
//! ## Getting Started: Comparing Two Archives
//!
//! ```no_run
//! use jardiff::{ArchiveInput, ComparisonRequest, run_comparison};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ComparisonRequest::new(
//!         "upgrade-check-1",
//!         ArchiveInput::from_path("lib-1.0.jar")?,
//!         ArchiveInput::from_path("lib-2.0.jar")?,
//!     );
//!
//!     let result = run_comparison(&request);
//!     println!(
//!         "{} changes, {} breaking",
//!         result.comparison_summary.total_changes,
//!         result.comparison_summary.breaking_changes
//!     );
//!
//!     for change in &result.changes {
//!         println!("  [{:?}] {}", change.compatibility_impact, change.description);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Tuning the Comparison
//!
//! The five policy flags control analysis depth; defaults exclude private
//! members and include package-private classes.
//!
//! ```no_run
//! use jardiff::{ArchiveInput, ComparisonOptions, ComparisonRequest, compare};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ComparisonOptions::new()
//!         .include_private_members(true)
//!         .analyze_annotations(false);
//!
//!     let request = ComparisonRequest::new(
//!         "deep-check",
//!         ArchiveInput::from_path("old.jar")?,
//!         ArchiveInput::from_path("new.jar")?,
//!     )
//!     .with_options(options);
//!
//!     let result = compare(&request)?;
//!     if result.has_breaking_changes() {
//!         eprintln!("{}", result.summary_line());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Variable names like `old`/`new` are pervasive and clear in context
    clippy::similar_names,
    // # Errors sections are aspirational for the internal parser surface
    clippy::missing_errors_doc,
    // The options struct legitimately carries five policy booleans
    clippy::struct_excessive_bools
)]

pub mod archive;
pub mod classfile;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use diff::{
    AnalysisStatus, AnalysisType, ChangeKind, ChangeRecord, CompatibilityClassifier,
    CompatibilityImpact, ComparisonResult, ComparisonSummary, DiffEngine,
};
pub use error::{ErrorContext, JarDiffError, Result};
pub use model::{
    ArchiveInput, ClassIndex, ClassIndexBuilder, ClassSummary, ComparisonOptions,
    ComparisonRequest, FieldSummary, MethodSummary,
};
pub use pipeline::{compare, run_comparison};
pub use reports::JsonReporter;
