//! Run configuration
//!
//! Values come from, in order of precedence: command-line flags, `GATEMIG_*`
//! environment variables (both handled by clap), the YAML config file, and
//! built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use gatemig_convert::OutputPaths;
use gatemig_core::TranslationContext;

use crate::error::{CliError, Result};

/// Contents of `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GatewayConfig {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub port: Option<u16>,
    pub section_name: Option<String>,
    pub tls_section_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputConfig {
    pub http: Option<PathBuf>,
    pub tls: Option<PathBuf>,
    pub failed: Option<PathBuf>,
}

impl FileConfig {
    /// Load the explicit config file, or the default one if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_yaml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// `<config dir>/gatemig/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gatemig").join("config.yaml"))
    }
}

/// Gateway options given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub port: Option<u16>,
    pub section_name: Option<String>,
    pub tls_section_name: Option<String>,
}

impl GatewayOptions {
    /// Merge with the config file into the translation context
    pub fn resolve(self, file: &GatewayConfig) -> Result<TranslationContext> {
        let name = self
            .name
            .or_else(|| file.name.clone())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                CliError::usage_with_help(
                    "No gateway name given",
                    "Pass --gateway, set GATEMIG_GATEWAY, or add gateway.name to the config file",
                )
            })?;

        let mut context = TranslationContext::new(name);
        if let Some(namespace) = self.namespace.or_else(|| file.namespace.clone()) {
            context = context.with_namespace(namespace);
        }
        if let Some(port) = self.port.or(file.port) {
            context = context.with_port(port);
        }
        if let Some(section) = self.section_name.or_else(|| file.section_name.clone()) {
            context = context.with_section_name(section);
        }
        if let Some(section) = self
            .tls_section_name
            .or_else(|| file.tls_section_name.clone())
        {
            context = context.with_tls_section_name(section);
        }

        Ok(context)
    }
}

/// Output paths given on the command line
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub http: Option<PathBuf>,
    pub tls: Option<PathBuf>,
    pub failed: Option<PathBuf>,
}

impl OutputOptions {
    pub fn resolve(self, file: &OutputConfig) -> OutputPaths {
        let defaults = OutputPaths::default();
        OutputPaths {
            http: self.http.or_else(|| file.http.clone()).unwrap_or(defaults.http),
            tls: self.tls.or_else(|| file.tls.clone()).unwrap_or(defaults.tls),
            failed: self
                .failed
                .or_else(|| file.failed.clone())
                .unwrap_or(defaults.failed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
gateway:
  name: istio-gateway
  namespace: edge
  port: 443
  sectionName: http
  tlsSectionName: tls
output:
  http: out/http.yaml
  tls: out/tls.yaml
  failed: out/failed.yaml
"#;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let config = FileConfig::load(Some(&write_config(&temp, FULL_CONFIG))).unwrap();

        assert_eq!(config.gateway.name.as_deref(), Some("istio-gateway"));
        assert_eq!(config.gateway.port, Some(443));
        assert_eq!(config.gateway.tls_section_name.as_deref(), Some("tls"));
        assert_eq!(config.output.failed, Some(PathBuf::from("out/failed.yaml")));
    }

    #[test]
    fn test_empty_config_file() {
        let temp = TempDir::new().unwrap();
        let config = FileConfig::load(Some(&write_config(&temp, "\n"))).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let err = FileConfig::load(Some(Path::new("/nonexistent/gatemig.yaml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "gateway:\n  port: not-a-port\n");
        let err = FileConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "gateway:\n  nmae: typo\n");
        assert!(FileConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let file: FileConfig = serde_yaml::from_str(FULL_CONFIG).unwrap();
        let options = GatewayOptions {
            name: Some("cli-gateway".to_string()),
            port: Some(8443),
            ..Default::default()
        };

        let context = options.resolve(&file.gateway).unwrap();
        assert_eq!(context.gateway_name, "cli-gateway");
        assert_eq!(context.port, Some(8443));
        assert_eq!(context.gateway_namespace, "edge");
        assert_eq!(context.section_name.as_deref(), Some("http"));
        assert_eq!(context.tls_section_name, "tls");
    }

    #[test]
    fn test_defaults_without_config_file() {
        let options = GatewayOptions {
            name: Some("gw".to_string()),
            ..Default::default()
        };

        let context = options.resolve(&GatewayConfig::default()).unwrap();
        assert_eq!(context, TranslationContext::new("gw"));
        assert_eq!(context.gateway_namespace, "istio-system");
    }

    #[test]
    fn test_gateway_name_is_required() {
        let err = GatewayOptions::default()
            .resolve(&GatewayConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Usage { .. }));
    }

    #[test]
    fn test_output_paths() {
        let file: FileConfig = serde_yaml::from_str(FULL_CONFIG).unwrap();
        let options = OutputOptions {
            http: Some(PathBuf::from("routes.yaml")),
            ..Default::default()
        };

        let paths = options.resolve(&file.output);
        assert_eq!(paths.http, PathBuf::from("routes.yaml"));
        assert_eq!(paths.tls, PathBuf::from("out/tls.yaml"));

        let defaults = OutputOptions::default().resolve(&OutputConfig::default());
        assert_eq!(defaults, OutputPaths::default());
    }
}
