//! Gatemig CLI - Migrate Kubernetes Ingress resources to the Gateway API

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
mod config;
mod display;
mod error;
mod exit_codes;

use config::{GatewayOptions, OutputOptions};

#[derive(Parser)]
#[command(name = "gatemig")]
#[command(author = "Gatemig Contributors")]
#[command(version)]
#[command(about = "Migrate Kubernetes Ingress resources to Gateway API routes", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate Ingresses into HTTPRoutes and TLSRoutes
    Migrate {
        /// Input file with Ingress resources
        #[arg(short, long)]
        input: PathBuf,

        /// Name of the target Gateway
        #[arg(short, long, env = "GATEMIG_GATEWAY")]
        gateway: Option<String>,

        /// Namespace of the target Gateway [default: istio-system]
        #[arg(long, env = "GATEMIG_GATEWAY_NAMESPACE")]
        gateway_namespace: Option<String>,

        /// Gateway listener port to bind routes to
        #[arg(long, env = "GATEMIG_GATEWAY_PORT")]
        gateway_port: Option<u16>,

        /// Gateway listener section for HTTPRoutes
        #[arg(long, env = "GATEMIG_SECTION_NAME")]
        section_name: Option<String>,

        /// Gateway listener section for TLSRoutes [default: https]
        #[arg(long, env = "GATEMIG_TLS_SECTION_NAME")]
        tls_section_name: Option<String>,

        /// HTTPRoute output file [default: httproutes.yaml]
        #[arg(short = 'o', long = "output")]
        http_output: Option<PathBuf>,

        /// TLSRoute output file [default: tlsroutes.yaml]
        #[arg(short = 't', long = "tls-output")]
        tls_output: Option<PathBuf>,

        /// Output file for Ingresses that could not be migrated [default: failed-ingresses.yaml]
        #[arg(short = 'f', long = "failed-output")]
        failed_output: Option<PathBuf>,

        /// Config file [default: <config dir>/gatemig/config.yaml]
        #[arg(long, env = "GATEMIG_CONFIG")]
        config: Option<PathBuf>,

        /// Show what would be written without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report which Ingress annotations block a migration
    Check {
        /// Input file with Ingress resources
        #[arg(short, long)]
        input: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays clean for --json
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    let outcome = match cli.command {
        Commands::Migrate {
            input,
            gateway,
            gateway_namespace,
            gateway_port,
            section_name,
            tls_section_name,
            http_output,
            tls_output,
            failed_output,
            config,
            dry_run,
            json,
        } => commands::migrate::run(
            &input,
            config.as_deref(),
            GatewayOptions {
                name: gateway,
                namespace: gateway_namespace,
                port: gateway_port,
                section_name,
                tls_section_name,
            },
            OutputOptions {
                http: http_output,
                tls: tls_output,
                failed: failed_output,
            },
            dry_run,
            json,
        ),

        Commands::Check { input, json } => commands::check::run(&input, json),
    };

    match outcome {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code as u8)
        }
    }
}
