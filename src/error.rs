//! Unified error types for jardiff.
//!
//! The error hierarchy mirrors the failure taxonomy of the comparison
//! pipeline: request validation, archive-level failures, class-file-level
//! failures, I/O, and internal invariant violations. Archive and class-file
//! errors carry a specific kind enum as their source so callers can react to
//! the precise failure without string matching.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jardiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JarDiffError {
    /// The comparison request failed validation; no comparison was started.
    #[error("Invalid comparison request: {context}")]
    InvalidRequest {
        context: String,
        #[source]
        source: RequestErrorKind,
    },

    /// The archive container itself is unusable.
    #[error("Failed to read archive: {context}")]
    Archive {
        context: String,
        #[source]
        source: ArchiveErrorKind,
    },

    /// A specific class-file payload is unparsable.
    ///
    /// The pipeline downgrades these to warnings per class; this variant
    /// only escapes when a caller parses a single payload directly.
    #[error("Failed to parse class file: {context}")]
    ClassFile {
        context: String,
        #[source]
        source: ClassFileErrorKind,
    },

    /// I/O failure on an underlying byte source.
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Report generation failure.
    #[error("Report generation failed: {0}")]
    Report(String),

    /// A programming-error guard tripped (e.g. aggregate mismatch).
    /// Never downgraded to a warning.
    #[error("Internal invariant violation: {0}")]
    Internal(String),
}

/// Specific request validation failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RequestErrorKind {
    #[error("Old and new archives are the same resource: {0}")]
    SameResource(String),

    #[error("Not an archive file: {name} (expected .jar, .war, .ear or .zip)")]
    NotAnArchive { name: String },

    #[error("Request id is empty")]
    EmptyRequestId,

    #[error("Archive input is empty: {0}")]
    EmptyInput(String),
}

/// Specific archive-container failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchiveErrorKind {
    #[error("Central directory could not be read: {0}")]
    MalformedArchive(String),

    #[error("Archive contains no class-file entries")]
    NoClassFiles,
}

/// Specific class-file parse failures.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassFileErrorKind {
    #[error("Bad magic: expected 0xCAFEBABE, found {found:#010x}")]
    BadMagic { found: u32 },

    #[error("Truncated class file: needed {needed} more byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Invalid constant pool index {index} (pool size {pool_size})")]
    BadConstantIndex { index: u16, pool_size: u16 },

    #[error("Constant pool entry {index} is not a {expected}")]
    WrongConstantKind { index: u16, expected: &'static str },

    #[error("Unknown constant pool tag {tag} at entry {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    #[error("Invalid UTF-8 in constant pool entry {index}")]
    BadUtf8 { index: u16 },

    #[error("Malformed type descriptor: {descriptor}")]
    BadDescriptor { descriptor: String },

    #[error("Unknown annotation element tag {tag:#04x}")]
    BadAnnotationTag { tag: u8 },
}

/// Convenient Result type for jardiff operations.
pub type Result<T> = std::result::Result<T, JarDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl JarDiffError {
    /// Create a request validation error with context.
    pub fn invalid_request(context: impl Into<String>, source: RequestErrorKind) -> Self {
        Self::InvalidRequest {
            context: context.into(),
            source,
        }
    }

    /// Create an archive error with context.
    pub fn archive(context: impl Into<String>, source: ArchiveErrorKind) -> Self {
        Self::Archive {
            context: context.into(),
            source,
        }
    }

    /// Create a class-file error with context.
    pub fn class_file(context: impl Into<String>, source: ClassFileErrorKind) -> Self {
        Self::ClassFile {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create an internal invariant violation.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error is terminal for a whole comparison (as opposed to
    /// a per-class failure the pipeline downgrades to a warning).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::ClassFile { .. })
    }

    /// Render this error with its full cause chain as one diagnostic line.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        use std::error::Error;
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<std::io::Error> for JarDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for JarDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Report(format!("JSON serialization failed: {err}"))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain front-to-back, tracing the path through the
/// pipeline: `"comparing archives: old archive: entry Foo.class: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on the error path).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<JarDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: JarDiffError, new_ctx: &str) -> JarDiffError {
    match err {
        JarDiffError::InvalidRequest {
            context: existing,
            source,
        } => JarDiffError::InvalidRequest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Archive {
            context: existing,
            source,
        } => JarDiffError::Archive {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::ClassFile {
            context: existing,
            source,
        } => JarDiffError::ClassFile {
            context: chain_context(new_ctx, &existing),
            source,
        },
        JarDiffError::Io {
            path,
            message,
            source,
        } => JarDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        JarDiffError::Report(msg) => JarDiffError::Report(chain_context(new_ctx, &msg)),
        JarDiffError::Internal(msg) => JarDiffError::Internal(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings, skipping an empty existing context.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
