//! Class-file parsing.
//!
//! A single linear parser over the class-file byte layout, reading just
//! enough structure to build a [`ClassSummary`](crate::model::ClassSummary):
//! constant pool, class header, member tables, and the handful of attributes
//! the comparison cares about. Method bodies are never parsed.

mod bytes;
mod constant_pool;
pub mod descriptor;
pub mod flags;
mod reader;

pub use bytes::ByteReader;
pub use constant_pool::{Constant, ConstantPool};
pub use flags::{
    dominant_visibility, Visibility, ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_PRIVATE,
    ACC_PROTECTED, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC,
};
pub use reader::{read_class_summary, CLASS_FILE_MAGIC};
