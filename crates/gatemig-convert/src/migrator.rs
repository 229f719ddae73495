//! Batch driver
//!
//! Runs every loaded Ingress through compatibility check and translation,
//! in input order, and hands each outcome to the [`Collector`]. A failing
//! resource never stops the batch.

use std::path::Path;

use gatemig_core::{SourceResource, TranslationContext};

use crate::collector::{Collector, MigrationResult};
use crate::compat;
use crate::error::{FailureReason, Result};
use crate::loader;
use crate::translator::{Translation, Translator};

/// Migrate Ingresses against one gateway
#[derive(Debug, Clone)]
pub struct Migrator {
    context: TranslationContext,
}

impl Migrator {
    pub fn new(context: TranslationContext) -> Self {
        Self { context }
    }

    /// Gateway binding every route is attached to
    pub fn context(&self) -> &TranslationContext {
        &self.context
    }

    /// Check and translate one Ingress
    pub fn migrate_resource(
        &self,
        resource: &SourceResource,
    ) -> std::result::Result<Translation, FailureReason> {
        let report = compat::check(resource);
        if !report.is_compatible() {
            return Err(FailureReason::UnsupportedAnnotations(report.denied));
        }

        Translator::new(&self.context).translate(resource)
    }

    /// Migrate a loaded batch
    pub fn migrate(&self, resources: Vec<SourceResource>) -> MigrationResult {
        let mut collector = Collector::new();

        for resource in resources {
            let span = tracing::debug_span!(
                "ingress",
                name = resource.name(),
                namespace = resource.namespace()
            );
            let _enter = span.enter();
            tracing::debug!("migrating");

            match self.migrate_resource(&resource) {
                Ok(translation) => {
                    if translation.is_empty() {
                        tracing::info!("ingress migrated without producing any route");
                    }
                    collector.record_success(translation);
                }
                Err(reason) => {
                    tracing::info!(%reason, "ingress not migrated");
                    collector.record_failure(resource, reason);
                }
            }
        }

        collector.finish()
    }

    /// Load and migrate YAML text
    pub fn migrate_str(&self, content: &str) -> Result<MigrationResult> {
        Ok(self.migrate(loader::load_str(content)?))
    }

    /// Load and migrate a YAML file
    pub fn migrate_file(&self, path: &Path) -> Result<MigrationResult> {
        Ok(self.migrate(loader::load_file(path)?))
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Quick migrate function
pub fn migrate(input: &Path, context: TranslationContext) -> Result<MigrationResult> {
    Migrator::new(context).migrate_file(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::fs;
    use tempfile::TempDir;

    const MIXED_BATCH: &str = r#"
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: compatible
  annotations:
    nginx.ingress.kubernetes.io/rewrite-target: /
spec:
  rules:
  - host: app.example.com
    http:
      paths:
      - path: /
        pathType: Prefix
        backend:
          service:
            name: app
            port:
              number: 80
---
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: incompatible
  annotations:
    nginx.ingress.kubernetes.io/auth-type: basic
    nginx.ingress.kubernetes.io/auth-secret: basic-auth
spec:
  rules:
  - host: secure.example.com
    http:
      paths:
      - path: /
        backend:
          service:
            name: secure
            port:
              number: 80
"#;

    fn migrator() -> Migrator {
        Migrator::new(TranslationContext::new("istio-gateway"))
    }

    #[test]
    fn test_mixed_batch() {
        let result = migrator().migrate_str(MIXED_BATCH).unwrap();

        assert_eq!(result.http_routes().len(), 1);
        assert_eq!(result.http_routes()[0].name(), "compatible-app-example-com");
        assert!(result.tls_routes().is_empty());
        assert_eq!(result.failures().len(), 1);

        let failure = &result.failures()[0];
        assert_eq!(failure.name(), "incompatible");
        assert_eq!(
            failure.reason,
            FailureReason::UnsupportedAnnotations(vec![
                "nginx.ingress.kubernetes.io/auth-type".to_string(),
                "nginx.ingress.kubernetes.io/auth-secret".to_string(),
            ])
        );

        // A failed resource contributes no routes
        assert!(
            result
                .http_routes()
                .iter()
                .all(|r| !r.name().starts_with("incompatible"))
        );

        let summary = result.summary();
        assert_eq!(summary.resources, 2);
        assert_eq!(summary.migrated, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_no_rules_is_a_failure() {
        let result = migrator()
            .migrate_str("kind: Ingress\nmetadata:\n  name: empty-ingress\nspec: {}\n")
            .unwrap();

        assert!(result.http_routes().is_empty());
        assert!(result.tls_routes().is_empty());
        assert_eq!(result.failures().len(), 1);
        assert_eq!(result.failures()[0].reason, FailureReason::NoRules);
        assert_eq!(
            result.failures()[0].reason.to_string(),
            "No rules defined in the Ingress"
        );
    }

    #[test]
    fn test_denied_annotations_checked_before_rules() {
        let result = migrator()
            .migrate_str(
                "kind: Ingress\nmetadata:\n  name: x\n  annotations:\n    nginx.ingress.kubernetes.io/limit-rps: \"5\"\nspec: {}\n",
            )
            .unwrap();

        assert!(matches!(
            result.failures()[0].reason,
            FailureReason::UnsupportedAnnotations(_)
        ));
    }

    #[test]
    fn test_malformed_resource_does_not_stop_batch() {
        let content = format!(
            "kind: Ingress\nmetadata:\n  name: broken\nspec:\n  rules: 42\n---\n{}",
            MIXED_BATCH
        );
        let result = migrator().migrate_str(&content).unwrap();

        assert_eq!(result.summary().resources, 3);
        assert_eq!(result.failures().len(), 2);
        assert_eq!(result.failures()[0].name(), "broken");
        assert!(matches!(
            result.failures()[0].reason,
            FailureReason::Malformed(_)
        ));
        assert_eq!(result.http_routes().len(), 1);
    }

    #[test]
    fn test_all_failed_is_not_an_error() {
        let result = migrator()
            .migrate_str("kind: Ingress\nmetadata:\n  name: a\n---\nkind: Ingress\nmetadata:\n  name: b\n")
            .unwrap();

        assert_eq!(result.summary().migrated, 0);
        assert_eq!(result.summary().failed, 2);
    }

    #[test]
    fn test_rules_without_paths_migrate_to_nothing() {
        let yaml = "kind: Ingress\nmetadata:\n  name: hosts-only\nspec:\n  rules:\n  - host: a.example.com\n";
        let resource = SourceResource::new(serde_yaml::from_str(yaml).unwrap());

        let translation = migrator().migrate_resource(&resource).unwrap();
        assert!(translation.is_empty());

        let result = migrator().migrate(vec![resource]);
        assert_eq!(result.summary().migrated, 1);
        assert_eq!(result.summary().failed, 0);
        assert!(result.http_routes().is_empty());
    }

    #[test]
    fn test_merged_denied_annotation_blocks_migration() {
        let content = r#"
kind: Ingress
metadata:
  name: merged-auth
  annotations:
    <<:
      nginx.ingress.kubernetes.io/auth-type: basic
spec:
  rules:
  - host: auth.example.com
    http:
      paths:
      - path: /
        backend:
          service:
            name: auth
"#;
        let result = migrator().migrate_str(content).unwrap();

        assert_eq!(result.failures().len(), 1);
        assert_eq!(
            result.failures()[0].reason,
            FailureReason::UnsupportedAnnotations(vec![
                "nginx.ingress.kubernetes.io/auth-type".to_string()
            ])
        );
    }

    #[test]
    fn test_context_is_kept() {
        let context = TranslationContext::new("edge").with_namespace("gateways");
        let migrator = Migrator::new(context.clone());
        assert_eq!(migrator.context(), &context);
    }

    #[test]
    fn test_parse_failure_is_fatal() {
        let err = migrator().migrate_str("kind: [unclosed\n").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }

    #[test]
    fn test_migrate_file() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("ingresses.yaml");
        fs::write(&input, MIXED_BATCH).unwrap();

        let result = migrate(&input, TranslationContext::new("gw")).unwrap();
        assert_eq!(result.summary().resources, 2);
        assert_eq!(result.http_routes()[0].spec.parent_refs[0].name, "gw");
    }
}
