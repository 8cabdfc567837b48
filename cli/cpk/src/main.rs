//! cpk CLI — inspect, convert, and verify CPK dependency manifests.

mod commands;
mod config;

use std::process;

use clap::{Parser, Subcommand};

use config::CpkConfig;

#[derive(Parser)]
#[command(name = "cpk", version, about = "CPK dependency-manifest tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a manifest and print its entries
    Inspect {
        /// Input manifest file (.xml or .json)
        #[arg(long)]
        input: String,
        /// Manifest form (xml, json; default: by file extension)
        #[arg(long)]
        format: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
    },
    /// Convert a manifest between the XML and JSON forms
    Convert {
        /// Input manifest file (.xml or .json)
        #[arg(long)]
        input: String,
        /// Output manifest file (.xml or .json)
        #[arg(long)]
        output: String,
    },
    /// Verify a manifest against a local artifact store
    Verify {
        /// Manifest file (.xml or .json)
        #[arg(long)]
        manifest: String,
        /// Artifact store root (default: [store] root in cpk.toml)
        #[arg(long)]
        store: Option<String>,
        /// Declaring artifact as name@version, the anchor for
        /// same-signer checks
        #[arg(long)]
        declaring: Option<String>,
        /// Signer digest algorithm (default: SHA-256, or [verify]
        /// algorithm in cpk.toml)
        #[arg(long)]
        algorithm: Option<String>,
        /// Report format (human, json)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = CpkConfig::find_and_load(&cwd)?.map(|(config, _)| config);

    match cli.command {
        Commands::Inspect {
            input,
            format,
            export,
        } => commands::inspect::run(&input, format.as_deref(), export.as_deref()),

        Commands::Convert { input, output } => commands::convert::run(&input, &output),

        Commands::Verify {
            manifest,
            store,
            declaring,
            algorithm,
            report,
        } => commands::verify::run(
            config.as_ref(),
            &manifest,
            store.as_deref(),
            declaring.as_deref(),
            algorithm.as_deref(),
            report.as_deref(),
        ),
    }
}
