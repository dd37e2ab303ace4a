//! Annotation presence computer.
//!
//! Compares annotation type names at class, method, and field scope.
//! Annotation values are not parsed, so only presence and absence are
//! observable; `ANNOTATION_MODIFIED` is never produced.

use super::MemberChangeComputer;
use crate::diff::classify::CompatibilityClassifier;
use crate::diff::record::{ChangeKind, ChangeRecord};
use crate::model::ClassSummary;
use std::collections::BTreeSet;

/// Where an annotation set lives.
enum Scope<'a> {
    Class,
    Method(&'a str),
    Field(&'a str),
}

impl Scope<'_> {
    fn member_name(&self) -> Option<String> {
        match self {
            Scope::Class => None,
            Scope::Method(name) | Scope::Field(name) => Some((*name).to_string()),
        }
    }

    fn describe(&self, class_name: &str) -> String {
        match self {
            Scope::Class => format!("class {class_name}"),
            Scope::Method(name) => format!("method {name} in class {class_name}"),
            Scope::Field(name) => format!("field {name} in class {class_name}"),
        }
    }
}

/// Diffs annotation type-name sets by symmetric difference.
pub struct AnnotationChangeComputer {
    classifier: CompatibilityClassifier,
}

impl AnnotationChangeComputer {
    #[must_use]
    pub fn new(classifier: CompatibilityClassifier) -> Self {
        Self { classifier }
    }

    /// Emit add/remove records for one annotation set, names in
    /// lexicographic order.
    fn diff_set(
        &self,
        class_name: &str,
        scope: &Scope<'_>,
        old_annotations: &[String],
        new_annotations: &[String],
        out: &mut Vec<ChangeRecord>,
    ) {
        let old_set: BTreeSet<&str> = old_annotations.iter().map(String::as_str).collect();
        let new_set: BTreeSet<&str> = new_annotations.iter().map(String::as_str).collect();
        if old_set == new_set {
            return;
        }

        for annotation in old_set.union(&new_set) {
            let in_old = old_set.contains(annotation);
            let in_new = new_set.contains(annotation);
            let (kind, old_signature, new_signature, verb) = match (in_old, in_new) {
                (true, false) => (
                    ChangeKind::AnnotationRemoved,
                    Some((*annotation).to_string()),
                    None,
                    "removed from",
                ),
                (false, true) => (
                    ChangeKind::AnnotationAdded,
                    None,
                    Some((*annotation).to_string()),
                    "added to",
                ),
                _ => continue,
            };

            let (impact, reasons) = self.classifier.classify_fixed(kind);
            out.push(ChangeRecord {
                kind,
                class_name: class_name.to_string(),
                member_name: scope.member_name(),
                old_signature,
                new_signature,
                description: format!(
                    "Annotation {annotation} was {verb} {}",
                    scope.describe(class_name)
                ),
                compatibility_impact: impact,
                reasons,
            });
        }
    }
}

impl Default for AnnotationChangeComputer {
    fn default() -> Self {
        Self::new(CompatibilityClassifier::new())
    }
}

impl MemberChangeComputer for AnnotationChangeComputer {
    fn compute(&self, old: &ClassSummary, new: &ClassSummary, out: &mut Vec<ChangeRecord>) {
        let class_name = &old.name;

        self.diff_set(class_name, &Scope::Class, &old.annotations, &new.annotations, out);

        // Methods present in both versions, old declaration order
        for old_method in &old.methods {
            if let Some(new_method) = new.find_method(&old_method.name, &old_method.descriptor) {
                self.diff_set(
                    class_name,
                    &Scope::Method(&old_method.name),
                    &old_method.annotations,
                    &new_method.annotations,
                    out,
                );
            }
        }

        // Fields present in both versions, old declaration order
        for old_field in &old.fields {
            if let Some(new_field) = new.find_field(&old_field.name) {
                self.diff_set(
                    class_name,
                    &Scope::Field(&old_field.name),
                    &old_field.annotations,
                    &new_field.annotations,
                    out,
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "AnnotationChangeComputer"
    }
}
