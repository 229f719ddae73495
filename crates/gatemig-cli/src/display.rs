//! Display formatting for CLI output
//!
//! Styled progress output goes to stdout. Logging goes to stderr through
//! tracing and never passes through here.

use console::style;
use std::path::Path;

use gatemig_convert::{CompatibilityReport, MigrationResult, WrittenOutputs};
use gatemig_core::{AnnotationClass, SourceResource, TranslationContext, classify};

pub fn print_header(input: &Path, context: &TranslationContext) {
    println!();
    println!(
        "  {} {} {}",
        style("Gatemig").bold().cyan(),
        style("─").dim(),
        style("Ingress → Gateway API").dim()
    );
    println!();
    println!(
        "  {} {} {}",
        style("Source: ").dim(),
        style(input.display()).cyan(),
        style("(Ingress)").dim()
    );
    println!(
        "  {} {}/{}",
        style("Gateway:").dim(),
        style(&context.gateway_namespace).green(),
        style(&context.gateway_name).green()
    );
    println!();
}

pub fn print_outputs(result: &MigrationResult, written: &WrittenOutputs) {
    let title = if written.dry_run {
        "Would Write"
    } else {
        "Written Files"
    };
    println!("  {}", style(title).bold());
    println!("  {}", style("─".repeat(title.len())).dim());

    print_category(written.http.as_deref(), result.http_routes().len(), "HTTPRoutes");
    print_category(written.tls.as_deref(), result.tls_routes().len(), "TLSRoutes");
    print_category(
        written.failed.as_deref(),
        result.failures().len(),
        "failed Ingresses",
    );
    for path in &written.stale {
        println!(
            "  {} {} {}",
            style("⚠").yellow().bold(),
            path.display(),
            style("(left from a previous run)").yellow()
        );
    }
    println!();
}

fn print_category(path: Option<&Path>, count: usize, label: &str) {
    match path {
        Some(path) => println!(
            "  {} {} {}",
            style("✓").green().bold(),
            path.display(),
            style(format!("({} {})", count, label)).dim()
        ),
        None => println!("  {} {}", style("○").dim(), style(format!("no {}", label)).dim()),
    }
}

pub fn print_failures(result: &MigrationResult) {
    if result.failures().is_empty() {
        return;
    }

    println!("  {}", style("Not Migrated").bold().yellow());
    println!("  {}", style("────────────").dim());
    for failure in result.failures() {
        println!(
            "  {} {} {}",
            style("✗").red(),
            style(failure.name()).bold(),
            style(format!("─ {}", failure.reason)).dim()
        );
    }
    println!();
}

pub fn print_summary(result: &MigrationResult) {
    let summary = result.summary();
    let icon = if summary.failed == 0 {
        style("✓").green().bold()
    } else {
        style("⚠").yellow().bold()
    };
    println!("  {} {}", icon, summary.message());
    println!();
}

/// One Ingress's annotation classification
pub fn print_compatibility(resource: &SourceResource, report: &CompatibilityReport) {
    let (icon, verdict) = if report.is_compatible() {
        (style("✓").green().bold(), style("compatible").green())
    } else {
        (style("✗").red().bold(), style("incompatible").red())
    };

    println!(
        "  {} {}/{} {}",
        icon,
        style(resource.namespace()).dim(),
        style(resource.name()).bold(),
        verdict
    );

    let keys = report
        .denied
        .iter()
        .chain(&report.supported)
        .chain(&report.ignored);
    for key in keys {
        let class = classify(key);
        let label = format!("{:<9}", class.label());
        let label = match class {
            AnnotationClass::Denied => style(label).red(),
            AnnotationClass::Supported(_) => style(label).green(),
            AnnotationClass::Ignored => style(label).dim(),
        };
        match class {
            AnnotationClass::Supported(feature) => {
                println!("      {} {} {}", label, key, style(format!("({})", feature)).dim())
            }
            _ => println!("      {} {}", label, key),
        }
    }
}
