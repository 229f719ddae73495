//! Batch result accumulation
//!
//! The [`Collector`] is owned by the driver loop and appended to once per
//! resource. [`Collector::finish`] seals it into a read-only
//! [`MigrationResult`].

use serde::Serialize;

use gatemig_core::{HttpRoute, SourceResource, TlsRoute};

use crate::error::FailureReason;
use crate::translator::Translation;

/// An Ingress that was not migrated, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub resource: SourceResource,
    pub reason: FailureReason,
}

impl FailureRecord {
    pub fn new(resource: SourceResource, reason: FailureReason) -> Self {
        Self { resource, reason }
    }

    pub fn name(&self) -> &str {
        self.resource.name()
    }
}

/// Ordered accumulator for one batch
#[derive(Debug, Default)]
pub struct Collector {
    resources: usize,
    migrated: usize,
    http_routes: Vec<HttpRoute>,
    tls_routes: Vec<TlsRoute>,
    failures: Vec<FailureRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the routes of a migrated resource
    pub fn record_success(&mut self, translation: Translation) {
        self.resources += 1;
        self.migrated += 1;
        self.http_routes.extend(translation.http_routes);
        self.tls_routes.extend(translation.tls_routes);
    }

    pub fn record_failure(&mut self, resource: SourceResource, reason: FailureReason) {
        self.resources += 1;
        self.failures.push(FailureRecord::new(resource, reason));
    }

    pub fn finish(self) -> MigrationResult {
        let summary = MigrationSummary {
            resources: self.resources,
            migrated: self.migrated,
            http_routes: self.http_routes.len(),
            tls_routes: self.tls_routes.len(),
            failed: self.failures.len(),
        };

        MigrationResult {
            http_routes: self.http_routes,
            tls_routes: self.tls_routes,
            failures: self.failures,
            summary,
        }
    }
}

/// The three finished output batches
#[derive(Debug, Clone)]
pub struct MigrationResult {
    http_routes: Vec<HttpRoute>,
    tls_routes: Vec<TlsRoute>,
    failures: Vec<FailureRecord>,
    summary: MigrationSummary,
}

impl MigrationResult {
    /// HTTP routes in processing order
    pub fn http_routes(&self) -> &[HttpRoute] {
        &self.http_routes
    }

    /// TLS routes in processing order
    pub fn tls_routes(&self) -> &[TlsRoute] {
        &self.tls_routes
    }

    /// Failed resources in processing order
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    pub fn summary(&self) -> &MigrationSummary {
        &self.summary
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    /// Ingresses loaded
    pub resources: usize,
    /// Ingresses that produced no failure record
    pub migrated: usize,
    pub http_routes: usize,
    pub tls_routes: usize,
    pub failed: usize,
}

impl MigrationSummary {
    pub fn message(&self) -> String {
        format!(
            "Processed {} ingresses: {} HTTPRoutes, {} TLSRoutes, {} failed",
            self.resources, self.http_routes, self.tls_routes, self.failed
        )
    }
}
