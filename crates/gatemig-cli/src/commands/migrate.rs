//! Migrate command - translate Ingresses to HTTPRoutes and TLSRoutes
//!
//! Loads the input, migrates every Ingress against the resolved gateway and
//! writes the three output categories.

use serde::Serialize;
use std::path::Path;

use gatemig_convert::{MigrationSummary, Migrator, WrittenOutputs, write_outputs};

use crate::config::{FileConfig, GatewayOptions, OutputOptions};
use crate::display;
use crate::error::Result;

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a Path,
    summary: &'a MigrationSummary,
    outputs: &'a WrittenOutputs,
    failures: Vec<JsonFailure<'a>>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    name: &'a str,
    namespace: &'a str,
    reason: String,
}

pub fn run(
    input: &Path,
    config_path: Option<&Path>,
    gateway: GatewayOptions,
    outputs: OutputOptions,
    dry_run: bool,
    json_output: bool,
) -> Result<()> {
    let config = FileConfig::load(config_path)?;
    let migrator = Migrator::new(gateway.resolve(&config.gateway)?);
    let paths = outputs.resolve(&config.output);

    if !json_output {
        display::print_header(input, migrator.context());
    }

    let result = migrator.migrate_file(input)?;
    let written = write_outputs(&result, &paths, dry_run)?;

    if json_output {
        let report = JsonReport {
            input,
            summary: result.summary(),
            outputs: &written,
            failures: result
                .failures()
                .iter()
                .map(|failure| JsonFailure {
                    name: failure.name(),
                    namespace: failure.resource.namespace(),
                    reason: failure.reason.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::print_outputs(&result, &written);
        display::print_failures(&result);
        display::print_summary(&result);
    }

    Ok(())
}
