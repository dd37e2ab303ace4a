//! Comparison request, archive inputs, and policy options.

use crate::error::{JarDiffError, RequestErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Policy flags controlling analysis depth and scope.
///
/// Defaults match the original service: private members excluded,
/// package-private classes included, field and annotation analysis on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonOptions {
    /// Include private methods and fields in the comparison.
    pub include_private_members: bool,
    /// Include package-private classes in the index.
    pub include_package_classes: bool,
    /// Analyze field-level changes at all.
    pub analyze_field_changes: bool,
    /// Attach and compare annotation type names.
    pub analyze_annotations: bool,
    /// Carried for wire compatibility; classification is always performed.
    pub detect_binary_compatibility: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            include_private_members: false,
            include_package_classes: true,
            analyze_field_changes: true,
            analyze_annotations: true,
            detect_binary_compatibility: true,
        }
    }
}

impl ComparisonOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include_private_members(mut self, include: bool) -> Self {
        self.include_private_members = include;
        self
    }

    #[must_use]
    pub fn include_package_classes(mut self, include: bool) -> Self {
        self.include_package_classes = include;
        self
    }

    #[must_use]
    pub fn analyze_field_changes(mut self, analyze: bool) -> Self {
        self.analyze_field_changes = analyze;
        self
    }

    #[must_use]
    pub fn analyze_annotations(mut self, analyze: bool) -> Self {
        self.analyze_annotations = analyze;
        self
    }

    #[must_use]
    pub fn detect_binary_compatibility(mut self, detect: bool) -> Self {
        self.detect_binary_compatibility = detect;
        self
    }
}

/// One archive input: a display name plus the full archive payload.
///
/// Payloads are read into memory up front so the walker never holds a file
/// handle past the single pass.
#[derive(Debug, Clone)]
pub struct ArchiveInput {
    /// Display name used in the result (file name for path-backed inputs).
    pub name: String,
    /// Raw archive bytes.
    pub data: Vec<u8>,
    /// Originating path, when the input came from the filesystem.
    pub source_path: Option<PathBuf>,
}

impl ArchiveInput {
    /// Create an input from in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            source_path: None,
        }
    }

    /// Read an input from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| JarDiffError::io(path, e))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            name,
            data,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// Whether the display name carries a recognized archive extension.
    fn has_archive_extension(&self) -> bool {
        let lower = self.name.to_lowercase();
        lower.ends_with(".jar")
            || lower.ends_with(".war")
            || lower.ends_with(".ear")
            || lower.ends_with(".zip")
    }
}

/// A validated request to compare two archives.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    /// Opaque identifier of the originating request.
    pub request_id: String,
    /// Baseline archive (lower version).
    pub old_archive: ArchiveInput,
    /// Target archive (higher version).
    pub new_archive: ArchiveInput,
    /// Policy flags.
    pub options: ComparisonOptions,
}

impl ComparisonRequest {
    pub fn new(
        request_id: impl Into<String>,
        old_archive: ArchiveInput,
        new_archive: ArchiveInput,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            old_archive,
            new_archive,
            options: ComparisonOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ComparisonOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the request before any comparison work starts.
    ///
    /// Checks: non-empty request id, non-empty payloads, archive-extension
    /// precondition for path-backed inputs, and distinct resources.
    pub fn validate(&self) -> Result<()> {
        tracing::debug!(request_id = %self.request_id, "validating comparison request");

        if self.request_id.trim().is_empty() {
            return Err(JarDiffError::invalid_request(
                "request id",
                RequestErrorKind::EmptyRequestId,
            ));
        }

        for (label, input) in [("old archive", &self.old_archive), ("new archive", &self.new_archive)]
        {
            if input.data.is_empty() {
                return Err(JarDiffError::invalid_request(
                    label,
                    RequestErrorKind::EmptyInput(input.name.clone()),
                ));
            }
            // The extension precondition only applies where a real file name
            // exists; in-memory inputs may carry any display name.
            if input.source_path.is_some() && !input.has_archive_extension() {
                return Err(JarDiffError::invalid_request(
                    label,
                    RequestErrorKind::NotAnArchive {
                        name: input.name.clone(),
                    },
                ));
            }
        }

        if let (Some(old_path), Some(new_path)) = (
            self.old_archive.source_path.as_deref(),
            self.new_archive.source_path.as_deref(),
        ) {
            if old_path == new_path {
                return Err(JarDiffError::invalid_request(
                    "archives",
                    RequestErrorKind::SameResource(old_path.display().to_string()),
                ));
            }
        }

        Ok(())
    }
}
