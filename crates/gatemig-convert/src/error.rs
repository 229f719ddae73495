//! Error types for the migration engine
//!
//! Two tiers: [`ConvertError`] aborts the whole run, [`FailureReason`] only
//! ever marks a single Ingress as not migrated.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal migration error
#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(gatemig::convert::read))]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is not valid YAML: {0}")]
    #[diagnostic(
        code(gatemig::convert::parse),
        help("Nothing was written. Fix the YAML syntax and run the migration again.")
    )]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to write {}", .path.display())]
    #[diagnostic(code(gatemig::convert::write))]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(gatemig::convert::serialize))]
    Serialize(#[from] gatemig_core::CoreError),
}

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Why a single Ingress was not migrated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// Denied annotations, in document order
    #[error("Unsupported annotations: {}", .0.join(", "))]
    UnsupportedAnnotations(Vec<String>),

    #[error("No rules defined in the Ingress")]
    NoRules,

    /// The document does not have the shape of an Ingress
    #[error("Migration error: {0}")]
    Malformed(String),
}
