//! Class index: the per-archive mapping from class name to summary.

use super::request::{ArchiveInput, ComparisonOptions};
use super::summary::ClassSummary;
use crate::archive::ClassEntryWalker;
use crate::classfile::read_class_summary;
use crate::error::Result;
use indexmap::IndexMap;

/// Mapping from canonical class name to its structural summary.
///
/// Keys are unique; duplicate names resolve first-wins. Iteration follows
/// insertion order, but the diff never relies on it at the class level (it
/// sorts the union of names).
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    classes: IndexMap<String, ClassSummary>,
}

impl ClassIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a summary under its class name.
    ///
    /// Returns `false` when a summary with the same name was already present;
    /// the existing entry is kept (first wins).
    pub fn insert(&mut self, summary: ClassSummary) -> bool {
        if self.classes.contains_key(&summary.name) {
            return false;
        }
        self.classes.insert(summary.name.clone(), summary);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassSummary> {
        self.classes.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

/// A built index plus everything the walk produced alongside it.
#[derive(Debug, Clone)]
pub struct IndexedArchive {
    /// Display name of the archive the index came from.
    pub display_name: String,
    /// The class index.
    pub index: ClassIndex,
    /// Warnings from the walk and from per-class parse failures.
    pub warnings: Vec<String>,
}

/// Composes the archive walker and the class-summary reader over one
/// archive, applying the visibility policy.
pub struct ClassIndexBuilder {
    options: ComparisonOptions,
}

impl ClassIndexBuilder {
    #[must_use]
    pub fn new(options: ComparisonOptions) -> Self {
        Self { options }
    }

    /// Build the index for one archive input.
    ///
    /// Terminal failures (unreadable central directory, no class entries)
    /// propagate; per-class parse failures become warnings and the build
    /// continues.
    pub fn build(&self, input: &ArchiveInput) -> Result<IndexedArchive> {
        let mut walker = ClassEntryWalker::open(&input.data, &input.name)?;
        let mut index = ClassIndex::new();
        let mut warnings = Vec::new();

        while let Some(entry) = walker.next_entry() {
            match read_class_summary(&entry.data, &self.options) {
                Ok(Some(summary)) => {
                    let name = summary.name.clone();
                    if !index.insert(summary) {
                        let message = format!(
                            "Duplicate class {name} in entry {}; keeping the first occurrence",
                            entry.name
                        );
                        tracing::warn!(archive = %input.name, "{message}");
                        warnings.push(message);
                    }
                }
                Ok(None) => {
                    // Filtered out by visibility policy; not a warning.
                }
                Err(kind) => {
                    let message = format!("Failed to analyze class {}: {kind}", entry.name);
                    tracing::warn!(archive = %input.name, "{message}");
                    warnings.push(message);
                }
            }
        }

        let mut all_warnings = walker.into_warnings();
        all_warnings.append(&mut warnings);

        tracing::info!(
            archive = %input.name,
            classes = index.len(),
            warnings = all_warnings.len(),
            "class index built"
        );

        Ok(IndexedArchive {
            display_name: input.name.clone(),
            index,
            warnings: all_warnings,
        })
    }
}
