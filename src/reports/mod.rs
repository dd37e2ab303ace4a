//! Report generation.

mod json;

pub use json::JsonReporter;
