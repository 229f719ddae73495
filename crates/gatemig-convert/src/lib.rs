//! Gatemig Convert - Ingress to Gateway API migration engine
//!
//! This crate turns `networking.k8s.io/v1` Ingress resources into Gateway API
//! `HTTPRoute` and `TLSRoute` resources bound to one existing gateway.
//!
//! # Pipeline
//!
//! | Stage         | Module        | Failure mode                          |
//! |---------------|---------------|---------------------------------------|
//! | Load          | [`loader`]    | fatal on invalid YAML                 |
//! | Check         | [`compat`]    | per Ingress: denied annotations       |
//! | Translate     | [`translator`]| per Ingress: no rules, malformed spec |
//! | Collect       | [`collector`] | none                                  |
//! | Write         | [`report`]    | fatal on I/O errors                   |
//!
//! A per-Ingress failure is recorded with its reason and the batch moves on;
//! only an unparsable input or an unwritable output aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gatemig_convert::{migrate, write_outputs, OutputPaths};
//! use gatemig_core::TranslationContext;
//!
//! let context = TranslationContext::new("istio-gateway").with_namespace("istio-system");
//! let result = migrate(Path::new("./ingresses.yaml"), context).unwrap();
//!
//! println!("{}", result.summary().message());
//! for failure in result.failures() {
//!     println!("{}: {}", failure.name(), failure.reason);
//! }
//!
//! write_outputs(&result, &OutputPaths::default(), false).unwrap();
//! ```

pub mod collector;
pub mod compat;
pub mod error;
pub mod loader;
pub mod migrator;
pub mod report;
pub mod translator;

// Re-exports
pub use collector::{Collector, FailureRecord, MigrationResult, MigrationSummary};
pub use compat::{CompatibilityReport, check};
pub use error::{ConvertError, FailureReason, Result};
pub use loader::{load_file, load_str};
pub use migrator::{Migrator, migrate};
pub use report::{OutputPaths, WrittenOutputs, write_outputs};
pub use translator::{Translation, Translator};
