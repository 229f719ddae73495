//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid Ingress: {0}")]
    InvalidIngress(#[from] serde_yaml::Error),

    #[error("Failed to serialize {kind} '{name}': {source}")]
    Serialize {
        kind: String,
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
