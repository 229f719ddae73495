//! Gatemig Core - Core types for migrating Ingress resources to the Gateway API
//!
//! This crate provides the foundational types used throughout gatemig:
//! - `SourceResource`: a verbatim Ingress document plus its lenient typed view
//! - `HttpRoute` / `TlsRoute`: the Gateway API resources produced by a migration
//! - `TranslationContext`: the gateway every generated route binds to
//! - `annotations`: extension keys and their compatibility classification

pub mod annotations;
pub mod context;
pub mod error;
pub mod ingress;
pub mod route;

pub use annotations::{AnnotationClass, classify};
pub use context::TranslationContext;
pub use error::{CoreError, Result};
pub use ingress::{
    Ingress, IngressBackend, IngressRule, IngressSpec, IngressTls, ObjectMeta, PathType,
    ServiceBackend, SourceResource,
};
pub use route::{
    BackendRef, HttpPathMatch, HttpRoute, HttpRouteFilter, HttpRouteMatch, HttpRouteRule,
    HttpRouteSpec, ParentReference, PathMatchType, RouteMetadata, TlsRoute, TlsRouteRule,
    TlsRouteSpec,
};
