//! Ingress to HTTPRoute/TLSRoute translation
//!
//! | Ingress                               | Gateway API                             |
//! |---------------------------------------|-----------------------------------------|
//! | one `spec.rules[]` entry              | one `HTTPRoute` (dropped if no paths)   |
//! | `host`                                | `hostnames: [host]`                     |
//! | `pathType: Exact`                     | `type: Exact`                           |
//! | `pathType: Prefix` / other / absent   | `type: PathPrefix`                      |
//! | `rewrite-target` annotation           | `URLRewrite` / `ReplacePrefixMatch`     |
//! | one `spec.tls[]` entry + passthrough  | one `TLSRoute` (dropped if no hosts)    |
//!
//! Translation is a pure function of the Ingress and the
//! [`TranslationContext`]: the same input always yields the same routes.

use gatemig_core::annotations::{get_annotation, is_enabled, istio, nginx};
use gatemig_core::ingress::{HttpIngressPath, IngressRule, IngressTls};
use gatemig_core::{
    BackendRef, HttpPathMatch, HttpRoute, HttpRouteFilter, HttpRouteMatch, HttpRouteRule,
    HttpRouteSpec, Ingress, PathMatchType, PathType, RouteMetadata, SourceResource, TlsRoute,
    TlsRouteRule, TlsRouteSpec, TranslationContext,
};

use crate::error::FailureReason;

/// Routes derived from one Ingress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub http_routes: Vec<HttpRoute>,
    pub tls_routes: Vec<TlsRoute>,
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        self.http_routes.is_empty() && self.tls_routes.is_empty()
    }
}

/// Translates compatible Ingresses against a fixed gateway binding
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    context: &'a TranslationContext,
}

impl<'a> Translator<'a> {
    pub fn new(context: &'a TranslationContext) -> Self {
        Self { context }
    }

    /// Translate one Ingress
    ///
    /// The caller is expected to have run the compatibility check first.
    pub fn translate(&self, resource: &SourceResource) -> Result<Translation, FailureReason> {
        let ingress = resource
            .to_ingress()
            .map_err(|e| FailureReason::Malformed(e.to_string()))?;
        self.translate_ingress(&ingress)
    }

    pub fn translate_ingress(&self, ingress: &Ingress) -> Result<Translation, FailureReason> {
        if ingress.spec.rules.is_empty() {
            return Err(FailureReason::NoRules);
        }

        if ingress.spec.default_backend.is_some() {
            tracing::warn!(
                ingress = ingress.metadata.name(),
                "defaultBackend has no HTTPRoute equivalent and is not migrated"
            );
        }

        let annotations = &ingress.metadata.annotations;
        let rewrite = get_annotation(annotations, nginx::REWRITE_TARGET);

        let http_routes = ingress
            .spec
            .rules
            .iter()
            .filter_map(|rule| self.http_route(ingress, rule, rewrite))
            .collect();

        let tls_routes = if is_enabled(annotations, nginx::SSL_PASSTHROUGH) {
            ingress
                .spec
                .tls
                .iter()
                .filter_map(|tls| self.tls_route(ingress, tls))
                .collect()
        } else {
            if !ingress.spec.tls.is_empty() {
                tracing::debug!(
                    ingress = ingress.metadata.name(),
                    blocks = ingress.spec.tls.len(),
                    "ssl-passthrough not enabled, skipping TLS blocks"
                );
            }
            Vec::new()
        };

        Ok(Translation {
            http_routes,
            tls_routes,
        })
    }

    fn http_route(
        &self,
        ingress: &Ingress,
        rule: &IngressRule,
        rewrite: Option<&str>,
    ) -> Option<HttpRoute> {
        let rules: Vec<HttpRouteRule> = rule
            .paths()
            .iter()
            .map(|path| self.path_rule(ingress, path, rewrite))
            .collect();

        if rules.is_empty() {
            tracing::debug!(
                ingress = ingress.metadata.name(),
                host = rule.host().unwrap_or("*"),
                "rule has no paths, no HTTPRoute generated"
            );
            return None;
        }

        let source_name = ingress.metadata.name();
        let route = HttpRoute::new(
            RouteMetadata {
                name: http_route_name(source_name, rule.host()),
                namespace: ingress.metadata.namespace().to_string(),
                labels: ingress.metadata.labels.clone(),
                annotations: Default::default(),
            },
            HttpRouteSpec {
                parent_refs: vec![self.context.http_parent_ref()],
                hostnames: rule.host().map(str::to_string).into_iter().collect(),
                rules,
            },
        );

        tracing::debug!(route = route.name(), "generated HTTPRoute");
        Some(route)
    }

    fn path_rule(
        &self,
        ingress: &Ingress,
        path: &HttpIngressPath,
        rewrite: Option<&str>,
    ) -> HttpRouteRule {
        let backend_refs = match &path.backend.service {
            Some(service) => {
                if let Some(port_name) = service.named_port() {
                    tracing::warn!(
                        ingress = ingress.metadata.name(),
                        service = %service.name,
                        port = port_name,
                        "named service port has no numeric equivalent, using {}",
                        service.port_number()
                    );
                }
                vec![BackendRef {
                    name: service.name.clone(),
                    port: service.port_number(),
                }]
            }
            None => {
                tracing::warn!(
                    ingress = ingress.metadata.name(),
                    path = path.path(),
                    "path has no service backend, generated rule has no backendRefs"
                );
                Vec::new()
            }
        };

        HttpRouteRule {
            matches: vec![HttpRouteMatch {
                path: HttpPathMatch {
                    match_type: match_type(path.path_type),
                    value: path.path().to_string(),
                },
            }],
            backend_refs,
            filters: rewrite
                .map(HttpRouteFilter::replace_prefix)
                .into_iter()
                .collect(),
        }
    }

    fn tls_route(&self, ingress: &Ingress, tls: &IngressTls) -> Option<TlsRoute> {
        let first_host = tls.hosts.first()?;

        let mut metadata = RouteMetadata {
            name: tls_route_name(ingress.metadata.name(), first_host),
            namespace: ingress.metadata.namespace().to_string(),
            labels: ingress.metadata.labels.clone(),
            annotations: Default::default(),
        };
        if let Some(secret) = &tls.secret_name {
            metadata
                .annotations
                .insert(istio::TLS_SECRET.to_string(), secret.clone());
        }

        let route = TlsRoute::new(
            metadata,
            TlsRouteSpec {
                parent_refs: vec![self.context.tls_parent_ref()],
                hostnames: tls.hosts.clone(),
                rules: vec![TlsRouteRule {
                    backend_refs: vec![self.context.tls_backend_ref()],
                }],
            },
        );

        tracing::debug!(route = route.name(), "generated TLSRoute");
        Some(route)
    }
}

/// Map an Ingress `pathType` to a Gateway API path match type
///
/// Anything but `Exact` becomes a prefix match, including
/// `ImplementationSpecific` and an absent type.
pub fn match_type(path_type: Option<PathType>) -> PathMatchType {
    match path_type {
        Some(PathType::Exact) => PathMatchType::Exact,
        Some(PathType::Prefix | PathType::ImplementationSpecific | PathType::Unknown) | None => {
            PathMatchType::PathPrefix
        }
    }
}

/// Replace every `.` with `-`
pub fn sanitize_host(host: &str) -> String {
    host.replace('.', "-")
}

/// `<source>-<host>`, or `<source>` for host-agnostic rules
pub fn http_route_name(source_name: &str, host: Option<&str>) -> String {
    match host {
        Some(host) => format!("{}-{}", source_name, sanitize_host(host)),
        None => source_name.to_string(),
    }
}

/// `<source>-tls-<first host>`
pub fn tls_route_name(source_name: &str, first_host: &str) -> String {
    format!("{}-tls-{}", source_name, sanitize_host(first_host))
}
