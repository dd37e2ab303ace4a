//! Structural summaries of a single compiled class.
//!
//! A [`ClassSummary`] captures everything the diff can observe about one
//! class: name, superclass, interfaces, access flags, member tables, and
//! annotation type names. Method bodies are never represented. Summaries are
//! immutable once built and outlive the raw class-file payload they came
//! from.

use crate::classfile::flags::dominant_visibility;
use crate::utils::HashWriter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural summary of one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Fully-qualified, dot-separated class name.
    pub name: String,
    /// Raw access-flag bitmask.
    pub access: u16,
    /// Dot-separated superclass name; absent only for the root type.
    pub super_name: Option<String>,
    /// Dot-separated names of implemented interfaces, in declaration order.
    pub interfaces: Vec<String>,
    /// Methods in class-file declaration order. No two share (name, descriptor).
    pub methods: Vec<MethodSummary>,
    /// Fields in class-file declaration order. No two share a name.
    pub fields: Vec<FieldSummary>,
    /// Class-level annotation type names (dot-separated).
    pub annotations: Vec<String>,
    /// Hash over every diff-observable attribute; equal hashes let the diff
    /// skip the member comparison for this class.
    #[serde(skip)]
    pub content_hash: u64,
}

impl ClassSummary {
    /// The formatted superclass-extension string used as the class-level
    /// signature in change records.
    #[must_use]
    pub fn class_signature(&self) -> String {
        match &self.super_name {
            Some(super_name) => format!("{} extends {}", self.name, super_name),
            None => self.name.clone(),
        }
    }

    /// Find a method by its (name, descriptor) identity key.
    #[must_use]
    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&MethodSummary> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Find a field by name (the format does not permit field overloading).
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Recompute the content hash from the current attribute values.
    ///
    /// Called once at the end of summarization; the hash must cover at least
    /// everything the diff compares, so a hash match is a safe skip.
    pub fn compute_content_hash(&mut self) {
        let mut w = HashWriter::new();
        w.write_str(&self.name);
        w.write_u16(self.access);
        w.write_str(self.super_name.as_deref().unwrap_or(""));
        for interface in &self.interfaces {
            w.write_str(interface);
        }
        for method in &self.methods {
            w.write_str(&method.name);
            w.write_str(&method.descriptor);
            w.write_u16(method.access);
            for exception in &method.exceptions {
                w.write_str(exception);
            }
            for annotation in &method.annotations {
                w.write_str(annotation);
            }
        }
        for field in &self.fields {
            w.write_str(&field.name);
            w.write_str(&field.descriptor);
            w.write_u16(field.access);
            if let Some(value) = &field.constant_value {
                w.write_str(&value.to_string());
            }
            for annotation in &field.annotations {
                w.write_str(annotation);
            }
        }
        for annotation in &self.annotations {
            w.write_str(annotation);
        }
        self.content_hash = w.finish();
    }
}

/// Structural summary of one method. Identity key within its class:
/// (name, descriptor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSummary {
    pub name: String,
    /// Parameter+return type descriptor, verbatim from the class file.
    pub descriptor: String,
    pub access: u16,
    /// Declared thrown exception class names (dot-separated).
    pub exceptions: Vec<String>,
    /// Annotation type names (dot-separated).
    pub annotations: Vec<String>,
}

impl MethodSummary {
    /// Rendered signature: `<visibility> <name><descriptor>`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{} {}{}",
            dominant_visibility(self.access),
            self.name,
            self.descriptor
        )
    }
}

/// Structural summary of one field. Identity key within its class: name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSummary {
    pub name: String,
    /// Type descriptor, verbatim from the class file.
    pub descriptor: String,
    pub access: u16,
    /// Constant initializer, when the field carries a ConstantValue attribute.
    pub constant_value: Option<ConstantValue>,
    /// Annotation type names (dot-separated).
    pub annotations: Vec<String>,
}

impl FieldSummary {
    /// Rendered signature: `<visibility> <descriptor> <name>`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{} {} {}",
            dominant_visibility(self.access),
            self.descriptor,
            self.name
        )
    }
}

/// A field's constant initializer value.
///
/// Captured for completeness of the summary; constant values do not
/// participate in diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}
