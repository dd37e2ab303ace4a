//! Field change computer.

use super::MemberChangeComputer;
use crate::classfile::flags::dominant_visibility;
use crate::diff::classify::CompatibilityClassifier;
use crate::diff::record::{ChangeKind, ChangeRecord};
use crate::model::{ClassSummary, FieldSummary};
use std::collections::HashMap;

/// Diffs fields by name (the format does not permit field overloading).
///
/// A surviving field can produce both a type change and an access change;
/// the two are reported independently.
pub struct FieldChangeComputer {
    classifier: CompatibilityClassifier,
}

impl FieldChangeComputer {
    #[must_use]
    pub fn new(classifier: CompatibilityClassifier) -> Self {
        Self { classifier }
    }
}

impl Default for FieldChangeComputer {
    fn default() -> Self {
        Self::new(CompatibilityClassifier::new())
    }
}

impl MemberChangeComputer for FieldChangeComputer {
    fn compute(&self, old: &ClassSummary, new: &ClassSummary, out: &mut Vec<ChangeRecord>) {
        let class_name = &old.name;

        let new_by_name: HashMap<&str, &FieldSummary> =
            new.fields.iter().map(|f| (f.name.as_str(), f)).collect();

        // Old-order pass: removals, type changes, access changes
        for old_field in &old.fields {
            let Some(new_field) = new_by_name.get(old_field.name.as_str()) else {
                let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::FieldRemoved);
                out.push(ChangeRecord {
                    kind: ChangeKind::FieldRemoved,
                    class_name: class_name.clone(),
                    member_name: Some(old_field.name.clone()),
                    old_signature: Some(old_field.signature()),
                    new_signature: None,
                    description: format!(
                        "Field {} was removed from class {class_name}",
                        old_field.name
                    ),
                    compatibility_impact: impact,
                    reasons,
                });
                continue;
            };

            if new_field.descriptor != old_field.descriptor {
                let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::FieldTypeChanged);
                out.push(ChangeRecord {
                    kind: ChangeKind::FieldTypeChanged,
                    class_name: class_name.clone(),
                    member_name: Some(old_field.name.clone()),
                    old_signature: Some(old_field.signature()),
                    new_signature: Some(new_field.signature()),
                    description: format!("Field {} type changed", old_field.name),
                    compatibility_impact: impact,
                    reasons,
                });
            }

            if new_field.access != old_field.access {
                let old_access = dominant_visibility(old_field.access);
                let new_access = dominant_visibility(new_field.access);
                let (impact, reasons) = self
                    .classifier
                    .classify_access_change(old_field.access, new_field.access);
                out.push(ChangeRecord {
                    kind: ChangeKind::FieldAccessChanged,
                    class_name: class_name.clone(),
                    member_name: Some(old_field.name.clone()),
                    old_signature: Some(old_access.to_string()),
                    new_signature: Some(new_access.to_string()),
                    description: format!(
                        "Field {} access changed from {old_access} to {new_access}",
                        old_field.name
                    ),
                    compatibility_impact: impact,
                    reasons,
                });
            }
        }

        // New-order pass: additions
        for new_field in &new.fields {
            if old.find_field(&new_field.name).is_none() {
                let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::FieldAdded);
                out.push(ChangeRecord {
                    kind: ChangeKind::FieldAdded,
                    class_name: class_name.clone(),
                    member_name: Some(new_field.name.clone()),
                    old_signature: None,
                    new_signature: Some(new_field.signature()),
                    description: format!(
                        "Field {} was added to class {class_name}",
                        new_field.name
                    ),
                    compatibility_impact: impact,
                    reasons,
                });
            }
        }
    }

    fn name(&self) -> &'static str {
        "FieldChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::flags::{ACC_PRIVATE, ACC_PUBLIC};
    use crate::diff::record::CompatibilityImpact;

    fn class_with_fields(fields: Vec<FieldSummary>) -> ClassSummary {
        let mut class = ClassSummary {
            name: "pkg.A".to_string(),
            access: ACC_PUBLIC,
            super_name: Some("java.lang.Object".to_string()),
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields,
            annotations: Vec::new(),
            content_hash: 0,
        };
        class.compute_content_hash();
        class
    }

    fn field(name: &str, descriptor: &str, access: u16) -> FieldSummary {
        FieldSummary {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access,
            constant_value: None,
            annotations: Vec::new(),
        }
    }

    fn compute(old: &ClassSummary, new: &ClassSummary) -> Vec<ChangeRecord> {
        let mut out = Vec::new();
        FieldChangeComputer::default().compute(old, new, &mut out);
        out
    }

    #[test]
    fn test_field_change_computer_default() {
        let computer = FieldChangeComputer::default();
        assert_eq!(computer.name(), "FieldChangeComputer");
    }

    #[test]
    fn test_type_change_renders_full_signatures() {
        let old = class_with_fields(vec![field("count", "I", ACC_PUBLIC)]);
        let new = class_with_fields(vec![field("count", "J", ACC_PUBLIC)]);

        let records = compute(&old, &new);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.kind, ChangeKind::FieldTypeChanged);
        assert_eq!(r.old_signature.as_deref(), Some("public I count"));
        assert_eq!(r.new_signature.as_deref(), Some("public J count"));
        assert_eq!(r.compatibility_impact, CompatibilityImpact::Breaking);
    }

    #[test]
    fn test_type_and_access_change_both_reported() {
        let old = class_with_fields(vec![field("count", "I", ACC_PUBLIC)]);
        let new = class_with_fields(vec![field("count", "J", ACC_PRIVATE)]);

        let records = compute(&old, &new);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ChangeKind::FieldTypeChanged);
        assert_eq!(records[1].kind, ChangeKind::FieldAccessChanged);
        assert_eq!(records[1].compatibility_impact, CompatibilityImpact::Breaking);
    }

    #[test]
    fn test_removed_and_added() {
        let old = class_with_fields(vec![field("a", "I", ACC_PUBLIC)]);
        let new = class_with_fields(vec![field("b", "I", ACC_PUBLIC)]);

        let records = compute(&old, &new);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, ChangeKind::FieldRemoved);
        assert_eq!(records[0].member_name.as_deref(), Some("a"));
        assert_eq!(records[1].kind, ChangeKind::FieldAdded);
        assert_eq!(records[1].member_name.as_deref(), Some("b"));
    }

    #[test]
    fn test_unchanged_field_emits_nothing() {
        let old = class_with_fields(vec![field("count", "I", ACC_PUBLIC)]);
        let new = class_with_fields(vec![field("count", "I", ACC_PUBLIC)]);
        assert!(compute(&old, &new).is_empty());
    }
}
