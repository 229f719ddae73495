//! Annotation compatibility checker
//!
//! Only the explicitly denied annotations make an Ingress incompatible.
//! Unknown keys are ignored rather than flagged, so an annotation gatemig has
//! never heard of never blocks a migration.

use serde::Serialize;

use gatemig_core::SourceResource;
use gatemig_core::annotations::{AnnotationClass, classify};

/// Classification of every annotation on one Ingress, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompatibilityReport {
    pub supported: Vec<String>,
    pub denied: Vec<String>,
    pub ignored: Vec<String>,
}

impl CompatibilityReport {
    /// Compatible iff no denied annotation is present
    pub fn is_compatible(&self) -> bool {
        self.denied.is_empty()
    }

    /// Annotations that block the migration
    pub fn offending(&self) -> &[String] {
        &self.denied
    }
}

/// Check an Ingress's annotations
pub fn check(resource: &SourceResource) -> CompatibilityReport {
    check_keys(resource.annotation_keys())
}

/// Classify a set of annotation keys
pub fn check_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();

    for key in keys {
        match classify(key) {
            AnnotationClass::Supported(_) => report.supported.push(key.to_string()),
            AnnotationClass::Denied => report.denied.push(key.to_string()),
            AnnotationClass::Ignored => report.ignored.push(key.to_string()),
        }
    }

    report
}
