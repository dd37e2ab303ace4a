//! Method change computer.

use super::MemberChangeComputer;
use crate::classfile::flags::dominant_visibility;
use crate::diff::classify::CompatibilityClassifier;
use crate::diff::record::{ChangeKind, ChangeRecord};
use crate::model::{ClassSummary, MethodSummary};
use std::collections::HashMap;

/// Diffs methods by their (name, descriptor) identity key.
///
/// A method whose descriptor changed therefore appears as a removal plus an
/// addition; only access-flag changes are reported as modifications.
pub struct MethodChangeComputer {
    classifier: CompatibilityClassifier,
}

impl MethodChangeComputer {
    #[must_use]
    pub fn new(classifier: CompatibilityClassifier) -> Self {
        Self { classifier }
    }
}

impl Default for MethodChangeComputer {
    fn default() -> Self {
        Self::new(CompatibilityClassifier::new())
    }
}

impl MemberChangeComputer for MethodChangeComputer {
    fn compute(&self, old: &ClassSummary, new: &ClassSummary, out: &mut Vec<ChangeRecord>) {
        let class_name = &old.name;

        let new_by_key: HashMap<(&str, &str), &MethodSummary> = new
            .methods
            .iter()
            .map(|m| ((m.name.as_str(), m.descriptor.as_str()), m))
            .collect();

        // Old-order pass: removals and access changes
        for old_method in &old.methods {
            match new_by_key.get(&(old_method.name.as_str(), old_method.descriptor.as_str())) {
                None => {
                    let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::MethodRemoved);
                    out.push(ChangeRecord {
                        kind: ChangeKind::MethodRemoved,
                        class_name: class_name.clone(),
                        member_name: Some(old_method.name.clone()),
                        old_signature: Some(old_method.signature()),
                        new_signature: None,
                        description: format!(
                            "Method {} was removed from class {class_name}",
                            old_method.name
                        ),
                        compatibility_impact: impact,
                        reasons,
                    });
                }
                Some(new_method) if new_method.access != old_method.access => {
                    let old_access = dominant_visibility(old_method.access);
                    let new_access = dominant_visibility(new_method.access);
                    let (impact, reasons) = self
                        .classifier
                        .classify_access_change(old_method.access, new_method.access);
                    out.push(ChangeRecord {
                        kind: ChangeKind::MethodAccessChanged,
                        class_name: class_name.clone(),
                        member_name: Some(old_method.name.clone()),
                        old_signature: Some(old_access.to_string()),
                        new_signature: Some(new_access.to_string()),
                        description: format!(
                            "Method {} access changed from {old_access} to {new_access}",
                            old_method.name
                        ),
                        compatibility_impact: impact,
                        reasons,
                    });
                }
                Some(_) => {}
            }
        }

        // New-order pass: additions
        for new_method in &new.methods {
            if old
                .find_method(&new_method.name, &new_method.descriptor)
                .is_none()
            {
                let (impact, reasons) = self.classifier.classify_fixed(ChangeKind::MethodAdded);
                out.push(ChangeRecord {
                    kind: ChangeKind::MethodAdded,
                    class_name: class_name.clone(),
                    member_name: Some(new_method.name.clone()),
                    old_signature: None,
                    new_signature: Some(new_method.signature()),
                    description: format!(
                        "Method {} was added to class {class_name}",
                        new_method.name
                    ),
                    compatibility_impact: impact,
                    reasons,
                });
            }
        }
    }

    fn name(&self) -> &'static str {
        "MethodChangeComputer"
    }
}
