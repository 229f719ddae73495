//! Translation context
//!
//! Describes the gateway every generated route attaches to. Built once per
//! run and shared read-only by every per-resource translation.

use crate::route::{BackendRef, ParentReference};

/// Namespace of the target gateway when none is configured
pub const DEFAULT_GATEWAY_NAMESPACE: &str = "istio-system";

/// Listener section TLS routes attach to when none is configured
pub const DEFAULT_TLS_SECTION_NAME: &str = "https";

/// Port TLS routes forward to on the gateway
pub const TLS_BACKEND_PORT: u16 = 443;

/// Target gateway binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationContext {
    /// Gateway resource name
    pub gateway_name: String,

    /// Gateway resource namespace
    pub gateway_namespace: String,

    /// Listener port, when routes should pin one
    pub port: Option<u16>,

    /// Listener section for HTTP routes
    pub section_name: Option<String>,

    /// Listener section for TLS routes; replaces `section_name` on TLS parents
    pub tls_section_name: String,
}

impl TranslationContext {
    pub fn new(gateway_name: impl Into<String>) -> Self {
        Self {
            gateway_name: gateway_name.into(),
            gateway_namespace: DEFAULT_GATEWAY_NAMESPACE.to_string(),
            port: None,
            section_name: None,
            tls_section_name: DEFAULT_TLS_SECTION_NAME.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.gateway_namespace = namespace.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_section_name(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = Some(section_name.into());
        self
    }

    pub fn with_tls_section_name(mut self, section_name: impl Into<String>) -> Self {
        self.tls_section_name = section_name.into();
        self
    }

    /// Parent reference for HTTP routes
    pub fn http_parent_ref(&self) -> ParentReference {
        ParentReference {
            name: self.gateway_name.clone(),
            namespace: Some(self.gateway_namespace.clone()),
            section_name: self.section_name.clone(),
            port: self.port,
        }
    }

    /// Parent reference for TLS routes
    pub fn tls_parent_ref(&self) -> ParentReference {
        ParentReference {
            section_name: Some(self.tls_section_name.clone()),
            ..self.http_parent_ref()
        }
    }

    /// Backend every TLS route forwards to: the gateway itself
    pub fn tls_backend_ref(&self) -> BackendRef {
        BackendRef {
            name: self.gateway_name.clone(),
            port: TLS_BACKEND_PORT,
        }
    }
}
