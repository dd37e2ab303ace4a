//! Core data model: class summaries, the per-archive class index, and the
//! comparison request.

mod index;
mod request;
mod summary;

pub use index::{ClassIndex, ClassIndexBuilder, IndexedArchive};
pub use request::{ArchiveInput, ComparisonOptions, ComparisonRequest};
pub use summary::{ClassSummary, ConstantValue, FieldSummary, MethodSummary};
