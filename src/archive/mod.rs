//! Archive walking.
//!
//! Lazily iterates the compiled-class entries of a ZIP-format archive. Only
//! entries whose name ends in `.class` and whose payload starts with the
//! class-file magic are surfaced; everything else is skipped, with a warning
//! where the skip indicates a damaged entry. Entry names are carried as
//! opaque strings and never used as filesystem paths.

use crate::classfile::CLASS_FILE_MAGIC;
use crate::error::{ArchiveErrorKind, JarDiffError, Result};
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

/// Name suffix of compiled-class entries.
pub const CLASS_SUFFIX: &str = ".class";

/// One surfaced archive entry: its name and full payload.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// Outcome of reading one entry by index.
enum EntryOutcome {
    /// Not a class-file entry; skipped without comment.
    NotOfInterest,
    /// Skipped with a warning.
    Degraded(String),
    /// A surfaced class-file entry.
    Surfaced(ClassEntry),
}

/// Single-pass walker over the class-file entries of one archive.
///
/// Opening validates the central directory and the presence of at least one
/// class entry; iteration is lazy after that. Per-entry failures are
/// downgraded to warnings and the entry is skipped.
#[derive(Debug)]
pub struct ClassEntryWalker<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    display_name: String,
    next_index: usize,
    warnings: Vec<String>,
}

impl<'a> ClassEntryWalker<'a> {
    /// Open an archive held in memory.
    ///
    /// Fails with `MalformedArchive` when the central directory cannot be
    /// read, and with `NoClassFiles` when no entry name carries the
    /// compiled-class suffix.
    pub fn open(data: &'a [u8], display_name: &str) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            JarDiffError::archive(
                display_name.to_string(),
                ArchiveErrorKind::MalformedArchive(e.to_string()),
            )
        })?;

        let has_class_entries = archive
            .file_names()
            .any(|name| !name.ends_with('/') && name.ends_with(CLASS_SUFFIX));
        if !has_class_entries {
            return Err(JarDiffError::archive(
                display_name.to_string(),
                ArchiveErrorKind::NoClassFiles,
            ));
        }

        Ok(Self {
            archive,
            display_name: display_name.to_string(),
            next_index: 0,
            warnings: Vec::new(),
        })
    }

    /// Yield the next class-file entry, or `None` when the walk is done.
    ///
    /// Skipped entries (directories, non-class names, zero-length payloads,
    /// bad magic, per-entry read errors) never terminate the walk.
    pub fn next_entry(&mut self) -> Option<ClassEntry> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;

            match read_entry(&mut self.archive, index) {
                EntryOutcome::NotOfInterest => {}
                EntryOutcome::Degraded(message) => self.warn(message),
                EntryOutcome::Surfaced(entry) => return Some(entry),
            }
        }
        None
    }

    /// Warnings accumulated so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the walker, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    fn warn(&mut self, message: String) {
        tracing::warn!(archive = %self.display_name, "{message}");
        self.warnings.push(message);
    }
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize) -> EntryOutcome {
    let mut file = match archive.by_index(index) {
        Ok(file) => file,
        Err(e) => {
            return EntryOutcome::Degraded(format!("Failed to read archive entry #{index}: {e}"))
        }
    };

    let name = file.name().to_string();
    if file.is_dir() || !name.ends_with(CLASS_SUFFIX) {
        return EntryOutcome::NotOfInterest;
    }

    if file.size() == 0 {
        return EntryOutcome::Degraded(format!("Skipped empty entry {name}"));
    }

    let mut data = Vec::with_capacity(file.size() as usize);
    if let Err(e) = file.read_to_end(&mut data) {
        return EntryOutcome::Degraded(format!("Failed to read entry {name}: {e}"));
    }

    if !starts_with_class_magic(&data) {
        return EntryOutcome::Degraded(format!("Skipped entry {name}: payload is not a class file"));
    }

    EntryOutcome::Surfaced(ClassEntry { name, data })
}

fn starts_with_class_magic(data: &[u8]) -> bool {
    data.len() >= 4 && u32::from_be_bytes([data[0], data[1], data[2], data[3]]) == CLASS_FILE_MAGIC
}
