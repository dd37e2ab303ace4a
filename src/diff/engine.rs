//! Diff engine: pairs classes across the two indices and emits the ordered
//! change-record list.

use super::changes::{
    AnnotationChangeComputer, FieldChangeComputer, MemberChangeComputer, MethodChangeComputer,
};
use super::classify::CompatibilityClassifier;
use super::record::{ChangeKind, ChangeRecord};
use crate::model::{ClassIndex, ClassSummary, ComparisonOptions};
use std::collections::BTreeSet;

/// Compares two class indices and produces typed change records.
///
/// The engine is pure: both indices are borrowed read-only, the record list
/// is owned by the engine until returned, and no state survives a call.
/// Class names are traversed in ascending sorted order of the union of both
/// key sets, which makes the output deterministic for fixed inputs.
pub struct DiffEngine {
    options: ComparisonOptions,
    classifier: CompatibilityClassifier,
    methods: MethodChangeComputer,
    fields: FieldChangeComputer,
    annotations: AnnotationChangeComputer,
}

impl DiffEngine {
    #[must_use]
    pub fn new(options: ComparisonOptions) -> Self {
        let classifier = CompatibilityClassifier::new();
        Self {
            options,
            classifier,
            methods: MethodChangeComputer::new(classifier),
            fields: FieldChangeComputer::new(classifier),
            annotations: AnnotationChangeComputer::new(classifier),
        }
    }

    /// Produce the ordered change-record list for two indices.
    pub fn diff(&self, old: &ClassIndex, new: &ClassIndex) -> Vec<ChangeRecord> {
        let mut records = Vec::new();

        let union: BTreeSet<&str> = old.names().chain(new.names()).collect();
        for name in union {
            match (old.get(name), new.get(name)) {
                (Some(old_class), None) => records.push(self.class_removed(old_class)),
                (None, Some(new_class)) => records.push(self.class_added(new_class)),
                (Some(old_class), Some(new_class)) => {
                    // Equal content hashes mean nothing observable changed
                    if old_class.content_hash != new_class.content_hash
                        || old_class.content_hash == 0
                    {
                        self.diff_class(old_class, new_class, &mut records);
                    }
                }
                (None, None) => unreachable!("name came from the union of both indices"),
            }
        }

        records
    }

    fn diff_class(&self, old: &ClassSummary, new: &ClassSummary, out: &mut Vec<ChangeRecord>) {
        self.methods.compute(old, new, out);
        if self.options.analyze_field_changes {
            self.fields.compute(old, new, out);
        }
        if self.options.analyze_annotations {
            self.annotations.compute(old, new, out);
        }
    }

    fn class_removed(&self, class: &ClassSummary) -> ChangeRecord {
        let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::ClassRemoved);
        ChangeRecord {
            kind: ChangeKind::ClassRemoved,
            class_name: class.name.clone(),
            member_name: None,
            old_signature: Some(class.class_signature()),
            new_signature: None,
            description: format!("Class {} was removed", class.name),
            compatibility_impact: impact,
            reasons,
        }
    }

    fn class_added(&self, class: &ClassSummary) -> ChangeRecord {
        let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::ClassAdded);
        ChangeRecord {
            kind: ChangeKind::ClassAdded,
            class_name: class.name.clone(),
            member_name: None,
            old_signature: None,
            new_signature: Some(class.class_signature()),
            description: format!("Class {} was added", class.name),
            compatibility_impact: impact,
            reasons,
        }
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(ComparisonOptions::default())
    }
}
