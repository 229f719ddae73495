//! Check command - report annotation compatibility without migrating

use serde::Serialize;
use std::path::Path;

use gatemig_convert::{CompatibilityReport, check, load_file};

use crate::display;
use crate::error::Result;

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    namespace: &'a str,
    compatible: bool,
    #[serde(flatten)]
    report: &'a CompatibilityReport,
}

/// Always succeeds once the input is loaded, whatever the findings
pub fn run(input: &Path, json_output: bool) -> Result<()> {
    let resources = load_file(input)?;
    let reports: Vec<_> = resources.iter().map(check).collect();

    if json_output {
        let entries: Vec<_> = resources
            .iter()
            .zip(&reports)
            .map(|(resource, report)| JsonEntry {
                name: resource.name(),
                namespace: resource.namespace(),
                compatible: report.is_compatible(),
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    for (resource, report) in resources.iter().zip(&reports) {
        display::print_compatibility(resource, report);
    }

    let incompatible = reports.iter().filter(|r| !r.is_compatible()).count();
    println!();
    println!(
        "  {} of {} ingresses can be migrated",
        resources.len() - incompatible,
        resources.len()
    );
    println!();

    Ok(())
}
