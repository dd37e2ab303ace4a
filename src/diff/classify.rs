//! Compatibility classification.
//!
//! A fixed rule table over the change kind and, for access changes, the
//! visibility transition. Narrowing visibility breaks callers; widening is
//! safe; a modifier toggle at equal visibility is a low-impact change.

use super::record::{ChangeKind, CompatibilityImpact};
use crate::classfile::Visibility;

/// Assigns an impact label and reasons to each change.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityClassifier;

impl CompatibilityClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Impact and reasons for kinds whose verdict does not depend on a
    /// transition.
    ///
    /// Access-change kinds go through [`Self::classify_access_change`]
    /// instead; asking for them here is a programming error and yields the
    /// conservative `Breaking`.
    #[must_use]
    pub fn classify_fixed(&self, kind: ChangeKind) -> (CompatibilityImpact, Vec<String>) {
        match kind {
            ChangeKind::ClassRemoved => (
                CompatibilityImpact::Breaking,
                vec!["Class no longer exists in the new version".to_string()],
            ),
            ChangeKind::ClassAdded => {
                (CompatibilityImpact::None, vec!["New class added".to_string()])
            }
            ChangeKind::MethodRemoved => (
                CompatibilityImpact::Breaking,
                vec![
                    "Method no longer exists".to_string(),
                    "Calling code will fail at runtime".to_string(),
                ],
            ),
            ChangeKind::MethodAdded => (
                CompatibilityImpact::None,
                vec!["New method available".to_string()],
            ),
            ChangeKind::FieldRemoved => (
                CompatibilityImpact::Breaking,
                vec!["Field no longer exists".to_string()],
            ),
            ChangeKind::FieldAdded => (
                CompatibilityImpact::None,
                vec!["New field available".to_string()],
            ),
            ChangeKind::FieldTypeChanged => (
                CompatibilityImpact::Breaking,
                vec!["Field type change breaks binary compatibility".to_string()],
            ),
            ChangeKind::AnnotationAdded | ChangeKind::AnnotationRemoved => (
                CompatibilityImpact::Low,
                vec!["Annotation set changed".to_string()],
            ),
            _ => (
                CompatibilityImpact::Breaking,
                vec!["Unclassified change kind".to_string()],
            ),
        }
    }

    /// Impact and reasons for a method or field access-flag change.
    #[must_use]
    pub fn classify_access_change(
        &self,
        old_access: u16,
        new_access: u16,
    ) -> (CompatibilityImpact, Vec<String>) {
        let old_visibility = Visibility::from_flags(old_access);
        let new_visibility = Visibility::from_flags(new_access);

        if new_visibility < old_visibility {
            (
                CompatibilityImpact::Breaking,
                vec!["Reduced visibility may break callers".to_string()],
            )
        } else if new_visibility > old_visibility {
            (
                CompatibilityImpact::None,
                vec!["Widened visibility".to_string()],
            )
        } else {
            (
                CompatibilityImpact::Low,
                vec!["Non-visibility flag change".to_string()],
            )
        }
    }
}
