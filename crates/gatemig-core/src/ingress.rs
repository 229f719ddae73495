//! Ingress source model
//!
//! A [`SourceResource`] keeps the document exactly as it was read, so a
//! resource that cannot be migrated is reported back verbatim. The typed
//! [`Ingress`] view is decoded on demand and is lenient: every
//! optional field has a stated default and an explicit YAML `null` is treated
//! like an absent field.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::{CoreError, Result};

/// Kind discriminator of the resources gatemig migrates
pub const INGRESS_KIND: &str = "Ingress";

/// Name used when `metadata.name` is absent
pub const DEFAULT_NAME: &str = "unnamed";

/// Namespace used when `metadata.namespace` is absent
pub const DEFAULT_NAMESPACE: &str = "default";

/// Path used when an HTTP path omits `path`
pub const DEFAULT_PATH: &str = "/";

/// Port used when a service backend omits `port.number`
pub const DEFAULT_BACKEND_PORT: u16 = 80;

/// One Ingress document, unmodified
#[derive(Debug, Clone, PartialEq)]
pub struct SourceResource {
    raw: Value,
}

impl SourceResource {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The document as it was read
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Value of the top-level `kind` field
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("kind").and_then(Value::as_str)
    }

    /// `metadata.name`, or [`DEFAULT_NAME`]
    pub fn name(&self) -> &str {
        self.metadata_str("name").unwrap_or(DEFAULT_NAME)
    }

    /// `metadata.namespace`, or [`DEFAULT_NAMESPACE`]
    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace").unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Annotation keys in document order
    ///
    /// Read straight from the raw document so classification works even when
    /// the rest of the resource is malformed. Non-string keys are skipped.
    pub fn annotation_keys(&self) -> Vec<&str> {
        match self.raw.get("metadata").and_then(|m| m.get("annotations")) {
            Some(Value::Mapping(mapping)) => mapping.keys().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Decode the typed view
    pub fn to_ingress(&self) -> Result<Ingress> {
        Ok(serde_yaml::from_value(self.raw.clone())?)
    }

    /// Render the document as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.raw).map_err(|source| CoreError::Serialize {
            kind: INGRESS_KIND.to_string(),
            name: self.name().to_string(),
            source,
        })
    }

    fn metadata_str(&self, field: &str) -> Option<&str> {
        self.raw
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
    }
}

impl From<Value> for SourceResource {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

/// Typed view of an `networking.k8s.io/v1` Ingress
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingress {
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: ObjectMeta,

    #[serde(default, deserialize_with = "nullable")]
    pub spec: IngressSpec,
}

/// The subset of object metadata carried over to routes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default, deserialize_with = "string_map")]
    pub labels: IndexMap<String, String>,

    #[serde(default, deserialize_with = "string_map")]
    pub annotations: IndexMap<String, String>,
}

impl ObjectMeta {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub rules: Vec<IngressRule>,

    #[serde(default, deserialize_with = "nullable")]
    pub tls: Vec<IngressTls>,

    /// Catch-all backend; has no per-host route equivalent
    #[serde(default)]
    pub default_backend: Option<IngressBackend>,
}

/// A host rule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub http: Option<HttpIngressRuleValue>,
}

impl IngressRule {
    /// The declared host, treating an empty string as absent
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    pub fn paths(&self) -> &[HttpIngressPath] {
        self.http.as_ref().map(|h| h.paths.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressRuleValue {
    #[serde(default, deserialize_with = "nullable")]
    pub paths: Vec<HttpIngressPath>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub path_type: Option<PathType>,

    #[serde(default, deserialize_with = "nullable")]
    pub backend: IngressBackend,
}

impl HttpIngressPath {
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_PATH)
    }
}

/// Ingress `pathType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PathType {
    Exact,
    Prefix,
    ImplementationSpecific,
    /// Any value Kubernetes does not define
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    #[serde(default)]
    pub service: Option<ServiceBackend>,

    /// Object reference backend (e.g. a storage bucket); never translated
    #[serde(default)]
    pub resource: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackend {
    pub name: String,

    #[serde(default)]
    pub port: Option<ServiceBackendPort>,
}

impl ServiceBackend {
    /// Numeric port, or [`DEFAULT_BACKEND_PORT`]
    pub fn port_number(&self) -> u16 {
        self.port
            .as_ref()
            .and_then(|p| p.number)
            .unwrap_or(DEFAULT_BACKEND_PORT)
    }

    /// Port referenced by name only
    pub fn named_port(&self) -> Option<&str> {
        self.port
            .as_ref()
            .filter(|p| p.number.is_none())
            .and_then(|p| p.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackendPort {
    #[serde(default)]
    pub number: Option<u16>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A TLS termination block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    #[serde(default, deserialize_with = "nullable")]
    pub hosts: Vec<String>,

    #[serde(default)]
    pub secret_name: Option<String>,
}

/// Treat an explicit `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string map, coercing scalar values to their string form
///
/// `ssl-passthrough: true` without quotes is a YAML boolean but a string to
/// Kubernetes.
fn string_map<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;

    let mut map = IndexMap::new();
    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            _ => {
                return Err(D::Error::custom(format!(
                    "value of '{}' must be a string",
                    key
                )));
            }
        };
        map.insert(key, value);
    }
    Ok(map)
}
