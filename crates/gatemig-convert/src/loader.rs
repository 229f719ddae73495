//! Ingress document loader
//!
//! Accepts a single document, a `---` separated stream, or a `List` wrapper
//! as produced by `kubectl get ingress -o yaml`. Anything that is not an
//! Ingress is skipped without being reported.

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use gatemig_core::SourceResource;
use gatemig_core::ingress::INGRESS_KIND;

use crate::error::{ConvertError, Result};

/// Wrapper kinds whose `items` are loaded
const LIST_KINDS: &[&str] = &["List", "IngressList"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Ingress,
    List,
    Other,
}

fn document_kind(document: &SourceResource) -> DocumentKind {
    match document.kind() {
        Some(INGRESS_KIND) => DocumentKind::Ingress,
        Some(kind) if LIST_KINDS.contains(&kind) => DocumentKind::List,
        _ => DocumentKind::Other,
    }
}

/// Load every Ingress from YAML text
///
/// Merge keys (`<<: *anchor`) are resolved before anything else looks at the
/// document. Fails only when the text is not valid YAML or a merge key does
/// not point at a mapping.
pub fn load_str(content: &str) -> Result<Vec<SourceResource>> {
    let mut resources = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let mut value = Value::deserialize(document)?;
        value.apply_merge()?;
        collect(SourceResource::from(value), &mut resources);
    }

    tracing::debug!(count = resources.len(), "loaded ingresses");
    Ok(resources)
}

/// Load every Ingress from a YAML file
pub fn load_file(path: &Path) -> Result<Vec<SourceResource>> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&content)
}

fn collect(document: SourceResource, resources: &mut Vec<SourceResource>) {
    match document_kind(&document) {
        DocumentKind::Ingress => resources.push(document),
        DocumentKind::List => {
            let items = document
                .raw()
                .get("items")
                .and_then(Value::as_sequence)
                .map(|items| items.as_slice())
                .unwrap_or(&[]);

            resources.extend(
                items
                    .iter()
                    .cloned()
                    .map(SourceResource::from)
                    .filter(|item| document_kind(item) == DocumentKind::Ingress),
            );
        }
        DocumentKind::Other => {
            let kind = document.kind().unwrap_or("<none>");
            tracing::debug!(kind, "skipping document");
        }
    }
}
