//! Gateway API route resources
//!
//! Only the fields gatemig writes are modeled. Empty optional collections are
//! omitted from the serialized output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// API version of `HTTPRoute`
pub const HTTP_ROUTE_API_VERSION: &str = "gateway.networking.k8s.io/v1";

/// API version of `TLSRoute`
pub const TLS_ROUTE_API_VERSION: &str = "gateway.networking.k8s.io/v1alpha2";

/// Metadata shared by both route kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetadata {
    pub name: String,

    pub namespace: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: IndexMap<String, String>,
}

/// Reference from a route to the gateway listener serving it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Reference to a backend service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRef {
    pub name: String,
    pub port: u16,
}

// =============================================================================
// HTTPRoute
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    pub api_version: String,
    pub kind: String,
    pub metadata: RouteMetadata,
    pub spec: HttpRouteSpec,
}

impl HttpRoute {
    pub const KIND: &'static str = "HTTPRoute";

    pub fn new(metadata: RouteMetadata, spec: HttpRouteSpec) -> Self {
        Self {
            api_version: HTTP_ROUTE_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| CoreError::Serialize {
            kind: Self::KIND.to_string(),
            name: self.metadata.name.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    pub parent_refs: Vec<ParentReference>,

    /// Empty for host-agnostic routes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,

    pub rules: Vec<HttpRouteRule>,
}

/// One match + backends + optional filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    pub matches: Vec<HttpRouteMatch>,

    pub backend_refs: Vec<BackendRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRouteMatch {
    pub path: HttpPathMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpPathMatch {
    #[serde(rename = "type")]
    pub match_type: PathMatchType,
    pub value: String,
}

/// Gateway API path match kinds gatemig produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathMatchType {
    Exact,
    PathPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HttpRouteFilter {
    #[serde(rename = "URLRewrite")]
    UrlRewrite {
        #[serde(rename = "urlRewrite")]
        url_rewrite: HttpUrlRewriteFilter,
    },
}

impl HttpRouteFilter {
    /// Rewrite the matched prefix to `replacement`, verbatim
    pub fn replace_prefix(replacement: impl Into<String>) -> Self {
        Self::UrlRewrite {
            url_rewrite: HttpUrlRewriteFilter {
                path: HttpPathModifier::ReplacePrefixMatch {
                    replace_prefix_match: replacement.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpUrlRewriteFilter {
    pub path: HttpPathModifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HttpPathModifier {
    ReplacePrefixMatch {
        #[serde(rename = "replacePrefixMatch")]
        replace_prefix_match: String,
    },
}

// =============================================================================
// TLSRoute
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsRoute {
    pub api_version: String,
    pub kind: String,
    pub metadata: RouteMetadata,
    pub spec: TlsRouteSpec,
}

impl TlsRoute {
    pub const KIND: &'static str = "TLSRoute";

    pub fn new(metadata: RouteMetadata, spec: TlsRouteSpec) -> Self {
        Self {
            api_version: TLS_ROUTE_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| CoreError::Serialize {
            kind: Self::KIND.to_string(),
            name: self.metadata.name.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsRouteSpec {
    pub parent_refs: Vec<ParentReference>,
    pub hostnames: Vec<String>,
    pub rules: Vec<TlsRouteRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsRouteRule {
    pub backend_refs: Vec<BackendRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: &str) -> RouteMetadata {
        RouteMetadata {
            name: name.to_string(),
            namespace: "default".to_string(),
            labels: IndexMap::new(),
            annotations: IndexMap::new(),
        }
    }

    fn parent() -> ParentReference {
        ParentReference {
            name: "gw".to_string(),
            namespace: Some("istio-system".to_string()),
            section_name: None,
            port: None,
        }
    }

    #[test]
    fn test_http_route_yaml_shape() {
        let route = HttpRoute::new(
            metadata("web-example-com"),
            HttpRouteSpec {
                parent_refs: vec![parent()],
                hostnames: vec!["example.com".to_string()],
                rules: vec![HttpRouteRule {
                    matches: vec![HttpRouteMatch {
                        path: HttpPathMatch {
                            match_type: PathMatchType::PathPrefix,
                            value: "/api".to_string(),
                        },
                    }],
                    backend_refs: vec![BackendRef {
                        name: "api".to_string(),
                        port: 8080,
                    }],
                    filters: vec![HttpRouteFilter::replace_prefix("/v2")],
                }],
            },
        );

        let yaml = route.to_yaml().unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["apiVersion"], "gateway.networking.k8s.io/v1");
        assert_eq!(value["kind"], "HTTPRoute");
        assert_eq!(value["spec"]["parentRefs"][0]["name"], "gw");
        assert_eq!(value["spec"]["hostnames"][0], "example.com");

        let rule = &value["spec"]["rules"][0];
        assert_eq!(rule["matches"][0]["path"]["type"], "PathPrefix");
        assert_eq!(rule["matches"][0]["path"]["value"], "/api");
        assert_eq!(rule["backendRefs"][0]["port"], 8080);
        assert_eq!(rule["filters"][0]["type"], "URLRewrite");
        assert_eq!(
            rule["filters"][0]["urlRewrite"]["path"]["type"],
            "ReplacePrefixMatch"
        );
        assert_eq!(
            rule["filters"][0]["urlRewrite"]["path"]["replacePrefixMatch"],
            "/v2"
        );

        // No labels, no annotations, no sectionName
        assert!(value["metadata"].get("labels").is_none());
        assert!(value["metadata"].get("annotations").is_none());
        assert!(value["spec"]["parentRefs"][0].get("sectionName").is_none());
    }

    #[test]
    fn test_http_route_omits_empty_hostnames_and_filters() {
        let route = HttpRoute::new(
            metadata("web"),
            HttpRouteSpec {
                parent_refs: vec![parent()],
                hostnames: vec![],
                rules: vec![HttpRouteRule {
                    matches: vec![HttpRouteMatch {
                        path: HttpPathMatch {
                            match_type: PathMatchType::Exact,
                            value: "/".to_string(),
                        },
                    }],
                    backend_refs: vec![],
                    filters: vec![],
                }],
            },
        );

        let value: serde_yaml::Value = serde_yaml::from_str(&route.to_yaml().unwrap()).unwrap();
        assert!(value["spec"].get("hostnames").is_none());
        assert!(value["spec"]["rules"][0].get("filters").is_none());
        assert!(value["spec"]["rules"][0]["backendRefs"].as_sequence().unwrap().is_empty());
    }

    #[test]
    fn test_tls_route_yaml_shape() {
        let mut meta = metadata("web-tls-example-com");
        meta.annotations.insert(
            "gateway.istio.io/tls-secret".to_string(),
            "example-tls".to_string(),
        );

        let route = TlsRoute::new(
            meta,
            TlsRouteSpec {
                parent_refs: vec![parent()],
                hostnames: vec!["example.com".to_string()],
                rules: vec![TlsRouteRule {
                    backend_refs: vec![BackendRef {
                        name: "gw".to_string(),
                        port: 443,
                    }],
                }],
            },
        );

        let value: serde_yaml::Value = serde_yaml::from_str(&route.to_yaml().unwrap()).unwrap();
        assert_eq!(value["apiVersion"], "gateway.networking.k8s.io/v1alpha2");
        assert_eq!(value["kind"], "TLSRoute");
        assert_eq!(
            value["metadata"]["annotations"]["gateway.istio.io/tls-secret"],
            "example-tls"
        );
        assert_eq!(value["spec"]["rules"][0]["backendRefs"][0]["port"], 443);
    }

    #[test]
    fn test_filter_deserializes_back() {
        let filter = HttpRouteFilter::replace_prefix("/new-path");
        let yaml = serde_yaml::to_string(&filter).unwrap();
        let back: HttpRouteFilter = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, filter);
    }
}
