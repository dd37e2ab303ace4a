//! Typed change records.

use serde::{Deserialize, Serialize};

/// The closed set of detectable change kinds.
///
/// Several variants are reserved: the matching algorithm keys methods on
/// (name, descriptor), so the signature/return/parameter kinds cannot be
/// produced by it, `CLASS_MODIFIED` has no class-attribute comparison behind
/// it, and `ANNOTATION_MODIFIED` would require annotation-value parsing.
/// They stay in the enum so serialized consumers round-trip.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    // Class-level changes
    ClassAdded,
    ClassRemoved,
    ClassModified,

    // Method-level changes
    MethodAdded,
    MethodRemoved,
    MethodSignatureChanged,
    MethodReturnTypeChanged,
    MethodParameterChanged,
    MethodAccessChanged,

    // Field-level changes
    FieldAdded,
    FieldRemoved,
    FieldTypeChanged,
    FieldAccessChanged,

    // Annotation changes
    AnnotationAdded,
    AnnotationRemoved,
    AnnotationModified,
}

impl ChangeKind {
    /// Whether this kind belongs to the method-level family.
    #[must_use]
    pub fn is_method_level(self) -> bool {
        matches!(
            self,
            Self::MethodAdded
                | Self::MethodRemoved
                | Self::MethodSignatureChanged
                | Self::MethodReturnTypeChanged
                | Self::MethodParameterChanged
                | Self::MethodAccessChanged
        )
    }

    /// Whether this kind belongs to the field-level family.
    #[must_use]
    pub fn is_field_level(self) -> bool {
        matches!(
            self,
            Self::FieldAdded | Self::FieldRemoved | Self::FieldTypeChanged | Self::FieldAccessChanged
        )
    }
}

/// Impact of one change on binary compatibility, in ascending severity.
///
/// `Medium` and `High` are never assigned by the classifier but remain
/// accepted in serialized form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityImpact {
    None,
    Low,
    Medium,
    High,
    Breaking,
}

impl CompatibilityImpact {
    /// Whether callers of the old archive may be broken by a change with
    /// this impact.
    #[must_use]
    pub fn is_breaking(self) -> bool {
        matches!(self, Self::High | Self::Breaking)
    }
}

/// One typed entry in the comparison output describing a single difference.
///
/// For additions the old-side signature is absent and the new-side present;
/// for removals the reverse; for modifications both are present and differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// Change kind.
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Fully-qualified name of the containing class.
    pub class_name: String,
    /// Method or field name; absent for class-level changes.
    pub member_name: Option<String>,
    /// Rendered old-side signature; absent for additions.
    pub old_signature: Option<String>,
    /// Rendered new-side signature; absent for removals.
    pub new_signature: Option<String>,
    /// Human-readable change description.
    pub description: String,
    /// Classifier verdict.
    pub compatibility_impact: CompatibilityImpact,
    /// Reasons backing the verdict.
    pub reasons: Vec<String>,
}

impl ChangeRecord {
    /// Whether this is a class-level change (no member name).
    #[must_use]
    pub fn is_class_level_change(&self) -> bool {
        self.member_name.as_deref().map_or(true, str::is_empty)
    }

    /// Whether this is a method-level change.
    #[must_use]
    pub fn is_method_level_change(&self) -> bool {
        self.kind.is_method_level()
    }

    /// Whether this is a field-level change.
    #[must_use]
    pub fn is_field_level_change(&self) -> bool {
        self.kind.is_field_level()
    }

    /// Whether this change is potentially breaking.
    #[must_use]
    pub fn is_breaking_change(&self) -> bool {
        self.compatibility_impact.is_breaking()
    }
}
