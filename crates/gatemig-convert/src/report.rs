//! Output rendering and writing
//!
//! Route batches are written as plain `---` separated YAML streams. Failed
//! Ingresses are written verbatim, each preceded by a `# Reason:` comment so
//! the file can be fixed by hand and fed back in.

use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use gatemig_core::{HttpRoute, TlsRoute};

use crate::collector::{FailureRecord, MigrationResult};
use crate::error::{ConvertError, Result};

/// Default file for generated HTTPRoutes
pub const DEFAULT_HTTP_OUTPUT: &str = "httproutes.yaml";

/// Default file for generated TLSRoutes
pub const DEFAULT_TLS_OUTPUT: &str = "tlsroutes.yaml";

/// Default file for Ingresses that were not migrated
pub const DEFAULT_FAILED_OUTPUT: &str = "failed-ingresses.yaml";

const DOCUMENT_SEPARATOR: &str = "---\n";
const FAILURES_HEADER: &str = "# Ingresses not migrated\n";

/// Appended to an output file name while its content is staged
const STAGING_SUFFIX: &str = ".gatemig-tmp";

/// Where each output category goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub http: PathBuf,
    pub tls: PathBuf,
    pub failed: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            http: PathBuf::from(DEFAULT_HTTP_OUTPUT),
            tls: PathBuf::from(DEFAULT_TLS_OUTPUT),
            failed: PathBuf::from(DEFAULT_FAILED_OUTPUT),
        }
    }
}

impl OutputPaths {
    /// Place the three default file names under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            http: dir.join(DEFAULT_HTTP_OUTPUT),
            tls: dir.join(DEFAULT_TLS_OUTPUT),
            failed: dir.join(DEFAULT_FAILED_OUTPUT),
        }
    }
}

/// Files written by [`write_outputs`]; `None` for empty categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenOutputs {
    pub http: Option<PathBuf>,
    pub tls: Option<PathBuf>,
    pub failed: Option<PathBuf>,
    /// Files of empty categories left over from an earlier run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stale: Vec<PathBuf>,
    /// Paths are what would have been written
    pub dry_run: bool,
}

pub fn render_http_routes(routes: &[HttpRoute]) -> Result<String> {
    let documents = routes
        .iter()
        .map(HttpRoute::to_yaml)
        .collect::<gatemig_core::Result<Vec<_>>>()?;
    Ok(documents.join(DOCUMENT_SEPARATOR))
}

pub fn render_tls_routes(routes: &[TlsRoute]) -> Result<String> {
    let documents = routes
        .iter()
        .map(TlsRoute::to_yaml)
        .collect::<gatemig_core::Result<Vec<_>>>()?;
    Ok(documents.join(DOCUMENT_SEPARATOR))
}

pub fn render_failures(failures: &[FailureRecord]) -> Result<String> {
    let mut output = String::from(FAILURES_HEADER);
    output.push('\n');

    for failure in failures {
        output.push_str(&reason_comment(&failure.reason.to_string()));
        output.push_str(DOCUMENT_SEPARATOR);
        output.push_str(&failure.resource.to_yaml()?);
        output.push('\n');
    }

    Ok(output)
}

/// `# Reason: ...`, with every continuation line commented too
fn reason_comment(reason: &str) -> String {
    let mut lines = reason.lines();
    let mut comment = format!("# Reason: {}\n", lines.next().unwrap_or_default());
    for line in lines {
        comment.push_str("# ");
        comment.push_str(line);
        comment.push('\n');
    }
    comment
}

/// Write every non-empty category
///
/// All categories are rendered and staged next to their targets before any
/// target is replaced, so a failed write leaves the previous outputs alone.
/// Empty categories leave their file untouched; an existing file there is
/// reported in [`WrittenOutputs::stale`]. With `dry_run` nothing is written.
pub fn write_outputs(
    result: &MigrationResult,
    paths: &OutputPaths,
    dry_run: bool,
) -> Result<WrittenOutputs> {
    let mut written = WrittenOutputs {
        dry_run,
        ..Default::default()
    };
    let mut pending: Vec<(&Path, String)> = Vec::new();

    if result.http_routes().is_empty() {
        note_stale(&paths.http, &mut written.stale);
    } else {
        pending.push((&paths.http, render_http_routes(result.http_routes())?));
        written.http = Some(paths.http.clone());
    }

    if result.tls_routes().is_empty() {
        note_stale(&paths.tls, &mut written.stale);
    } else {
        pending.push((&paths.tls, render_tls_routes(result.tls_routes())?));
        written.tls = Some(paths.tls.clone());
    }

    if result.failures().is_empty() {
        note_stale(&paths.failed, &mut written.stale);
    } else {
        pending.push((&paths.failed, render_failures(result.failures())?));
        written.failed = Some(paths.failed.clone());
    }

    if dry_run {
        for (path, content) in &pending {
            tracing::debug!(path = %path.display(), bytes = content.len(), "dry run, not writing");
        }
    } else {
        commit(&pending)?;
    }

    Ok(written)
}

fn note_stale(path: &Path, stale: &mut Vec<PathBuf>) {
    if path.exists() {
        tracing::warn!(
            path = %path.display(),
            "output category is empty, file from a previous run left in place"
        );
        stale.push(path.to_path_buf());
    }
}

/// Stage every file, then move them all into place
fn commit(pending: &[(&Path, String)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(pending.len());

    for (path, content) in pending {
        let staging = staging_path(path);
        if let Err(source) = fs::write(&staging, content) {
            discard(&staged);
            return Err(ConvertError::WriteOutput {
                path: path.to_path_buf(),
                source,
            });
        }
        staged.push((staging, *path));
    }

    for (index, (staging, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(staging, path) {
            discard(&staged[index..]);
            return Err(ConvertError::WriteOutput {
                path: path.to_path_buf(),
                source,
            });
        }
        tracing::debug!(path = %path.display(), "wrote output");
    }

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (staging, _) in staged {
        if let Err(e) = fs::remove_file(staging) {
            tracing::warn!(path = %staging.display(), error = %e, "could not remove staged output");
        }
    }
}
