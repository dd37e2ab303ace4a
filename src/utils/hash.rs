//! Content hashing utilities.

use xxhash_rust::xxh3::{xxh3_64, Xxh3};

/// Compute a content hash for arbitrary bytes.
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Incremental hasher for building a content hash out of several fields
/// without concatenating them into one buffer.
///
/// Fields are written length-delimited so that adjacent fields cannot run
/// together and hash equal for different inputs.
#[derive(Default)]
pub struct HashWriter {
    inner: Xxh3,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_u16(&mut self, v: u16) {
        self.inner.update(&v.to_le_bytes());
    }

    pub fn finish(&self) -> u64 {
        self.inner.digest()
    }
}
