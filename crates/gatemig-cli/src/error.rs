//! CLI error types with exit code handling
//!
//! Every command returns [`Result`]; `main` renders the error with miette and
//! exits with [`CliError::exit_code`].

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use gatemig_convert::ConvertError;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Missing or invalid option after config resolution
    #[error("{message}")]
    #[diagnostic(code(gatemig::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config file not found: {}", .path.display())]
    #[diagnostic(
        code(gatemig::cli::config),
        help("Pass an existing file to --config or unset GATEMIG_CONFIG")
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read config file {}", .path.display())]
    #[diagnostic(code(gatemig::cli::config))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {}", .path.display(), .source)]
    #[diagnostic(code(gatemig::cli::config))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),

    #[error("Failed to encode JSON output")]
    #[diagnostic(code(gatemig::cli::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. }
            | CliError::ConfigNotFound { .. }
            | CliError::ConfigParse { .. } => exit_codes::USAGE_ERROR,
            CliError::ConfigRead { .. } => exit_codes::IO_ERROR,
            CliError::Convert(err) => match err {
                ConvertError::Parse(_) => exit_codes::PARSE_ERROR,
                ConvertError::ReadInput { .. } | ConvertError::WriteOutput { .. } => {
                    exit_codes::IO_ERROR
                }
                ConvertError::Serialize(_) => exit_codes::ERROR,
            },
            CliError::Json(_) => exit_codes::ERROR,
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::usage_with_help("x", "y").exit_code(),
            exit_codes::USAGE_ERROR
        );

        let parse = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        assert_eq!(
            CliError::from(ConvertError::Parse(parse)).exit_code(),
            exit_codes::PARSE_ERROR
        );

        let read = ConvertError::ReadInput {
            path: PathBuf::from("in.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(CliError::from(read).exit_code(), exit_codes::IO_ERROR);

        let missing = CliError::ConfigNotFound {
            path: PathBuf::from("gatemig.yaml"),
        };
        assert_eq!(missing.exit_code(), exit_codes::USAGE_ERROR);
    }
}
