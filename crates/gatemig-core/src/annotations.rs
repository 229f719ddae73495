//! Ingress annotation keys and their migration classification
//!
//! Annotations are the only channel an Ingress has for behavior outside its
//! structural schema. Each key is classified as supported (has a Gateway API
//! equivalent), denied (no equivalent, blocks migration) or ignored (unknown
//! to gatemig, passed over silently).

use indexmap::IndexMap;

/// ingress-nginx controller annotations
pub mod nginx {
    pub const REWRITE_TARGET: &str = "nginx.ingress.kubernetes.io/rewrite-target";
    pub const SSL_REDIRECT: &str = "nginx.ingress.kubernetes.io/ssl-redirect";
    pub const FORCE_SSL_REDIRECT: &str = "nginx.ingress.kubernetes.io/force-ssl-redirect";
    pub const SSL_PASSTHROUGH: &str = "nginx.ingress.kubernetes.io/ssl-passthrough";
    pub const BACKEND_PROTOCOL: &str = "nginx.ingress.kubernetes.io/backend-protocol";
    pub const CORS_ALLOW_ORIGIN: &str = "nginx.ingress.kubernetes.io/cors-allow-origin";
    pub const CORS_ALLOW_METHODS: &str = "nginx.ingress.kubernetes.io/cors-allow-methods";
    pub const CORS_ALLOW_HEADERS: &str = "nginx.ingress.kubernetes.io/cors-allow-headers";
    pub const PROXY_BODY_SIZE: &str = "nginx.ingress.kubernetes.io/proxy-body-size";
    pub const PROXY_CONNECT_TIMEOUT: &str = "nginx.ingress.kubernetes.io/proxy-connect-timeout";
    pub const PROXY_SEND_TIMEOUT: &str = "nginx.ingress.kubernetes.io/proxy-send-timeout";
    pub const PROXY_READ_TIMEOUT: &str = "nginx.ingress.kubernetes.io/proxy-read-timeout";

    pub const AUTH_TYPE: &str = "nginx.ingress.kubernetes.io/auth-type";
    pub const AUTH_SECRET: &str = "nginx.ingress.kubernetes.io/auth-secret";
    pub const AUTH_REALM: &str = "nginx.ingress.kubernetes.io/auth-realm";
    pub const CONFIGURATION_SNIPPET: &str = "nginx.ingress.kubernetes.io/configuration-snippet";
    pub const SERVER_SNIPPET: &str = "nginx.ingress.kubernetes.io/server-snippet";
    pub const MODSECURITY_SNIPPET: &str = "nginx.ingress.kubernetes.io/modsecurity-snippet";
    pub const LIMIT_RPS: &str = "nginx.ingress.kubernetes.io/limit-rps";
    pub const LIMIT_RPM: &str = "nginx.ingress.kubernetes.io/limit-rpm";
}

/// Istio annotations written on generated routes
pub mod istio {
    /// Name of the TLS secret the Ingress terminated with
    pub const TLS_SECRET: &str = "gateway.istio.io/tls-secret";
}

/// Annotations with a Gateway API equivalent, paired with the feature they map to
pub const SUPPORTED: &[(&str, &str)] = &[
    (nginx::REWRITE_TARGET, "rewrite"),
    (nginx::SSL_REDIRECT, "ssl-redirect"),
    (nginx::FORCE_SSL_REDIRECT, "force-ssl-redirect"),
    (nginx::SSL_PASSTHROUGH, "ssl-passthrough"),
    (nginx::BACKEND_PROTOCOL, "backend-protocol"),
    (nginx::CORS_ALLOW_ORIGIN, "cors"),
    (nginx::CORS_ALLOW_METHODS, "cors"),
    (nginx::CORS_ALLOW_HEADERS, "cors"),
    (nginx::PROXY_BODY_SIZE, "proxy-body-size"),
    (nginx::PROXY_CONNECT_TIMEOUT, "timeout"),
    (nginx::PROXY_SEND_TIMEOUT, "timeout"),
    (nginx::PROXY_READ_TIMEOUT, "timeout"),
];

/// Annotations with no Gateway API equivalent
pub const DENIED: &[&str] = &[
    nginx::AUTH_TYPE,
    nginx::AUTH_SECRET,
    nginx::AUTH_REALM,
    nginx::CONFIGURATION_SNIPPET,
    nginx::SERVER_SNIPPET,
    nginx::MODSECURITY_SNIPPET,
    nginx::LIMIT_RPS,
    nginx::LIMIT_RPM,
];

/// Classification of a single annotation key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationClass {
    /// Has an equivalent; carries the feature label
    Supported(&'static str),
    /// No equivalent; the resource cannot be migrated
    Denied,
    /// Not known to gatemig; never blocks a migration
    Ignored,
}

impl AnnotationClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Supported(_) => "supported",
            Self::Denied => "denied",
            Self::Ignored => "ignored",
        }
    }
}

/// Classify an annotation key (exact, case-sensitive match)
pub fn classify(key: &str) -> AnnotationClass {
    if DENIED.contains(&key) {
        return AnnotationClass::Denied;
    }
    SUPPORTED
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, feature)| AnnotationClass::Supported(feature))
        .unwrap_or(AnnotationClass::Ignored)
}

/// Get an annotation value
pub fn get_annotation<'a>(annotations: &'a IndexMap<String, String>, key: &str) -> Option<&'a str> {
    annotations.get(key).map(|s| s.as_str())
}

/// Whether an annotation is present and equals `true`, ignoring case
pub fn is_enabled(annotations: &IndexMap<String, String>, key: &str) -> bool {
    get_annotation(annotations, key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
