//! Codegraph Splice CLI
//!
//! Merges a platform source tree over a common one and validates the result.
//!
//! # Usage
//!
//! ```bash
//! # Splice and write the output tree
//! cargo run --bin codegraph-splice -- run --common src/common --platform src/fabric --output build/fabric
//!
//! # Validate only, configuration from a file
//! cargo run --bin codegraph-splice -- check --config splice.yaml
//! ```
//!
//! Exit status: 0 on success or skip, 1 on validation failure, 2 on any other error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use codegraph_splice::{
    ColorChoice, DiagnosticRenderer, PipelineOutcome, SpliceConfig, SpliceError, SplicePipeline,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codegraph-splice")]
#[command(about = "Codegraph Splice - merge and validate platform source trees against a common tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Splice, validate and write the output tree
    Run(BuildArgs),

    /// Splice and validate without writing anything
    Check(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// YAML configuration file
    #[arg(short, long, conflicts_with_all = ["common", "platform", "output"])]
    config: Option<PathBuf>,

    /// Common (platform-neutral) source root
    #[arg(long, required_unless_present = "config")]
    common: Option<PathBuf>,

    /// Platform source root
    #[arg(long, required_unless_present = "config")]
    platform: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, required_unless_present = "config")]
    output: Option<PathBuf>,

    /// Do not emit common files the platform leaves untouched
    #[arg(long)]
    no_common: bool,

    /// Disable ANSI colors in diagnostics
    #[arg(long)]
    no_color: bool,

    /// Print the outcome or the validation report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl BuildArgs {
    fn to_config(&self) -> Result<SpliceConfig, SpliceError> {
        let mut config = match &self.config {
            Some(path) => SpliceConfig::from_yaml(path)?,
            None => SpliceConfig::new(
                self.common.clone().unwrap_or_default(),
                self.platform.clone().unwrap_or_default(),
                self.output.clone().unwrap_or_default(),
            ),
        };
        if self.no_common {
            config.emit_common = false;
        }
        if self.no_color {
            config.color = ColorChoice::Never;
        }
        Ok(config)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (args, write) = match &cli.command {
        Commands::Run(args) => (args, true),
        Commands::Check(args) => (args, false),
    };
    init_logging(&args.log_level);

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };
    let color = config.color.enabled();
    colored::control::set_override(color);

    let pipeline = SplicePipeline::new(config);
    let result = if write { pipeline.run() } else { pipeline.check() };

    if args.json {
        let json = match &result {
            Ok(outcome) => Some(serde_json::to_string_pretty(outcome)),
            Err(SpliceError::ValidationFailure(report)) => Some(serde_json::to_string_pretty(report)),
            Err(_) => None,
        };
        match json {
            Some(Ok(json)) => println!("{}", json),
            Some(Err(e)) => error!("Failed to serialize outcome: {}", e),
            None => {}
        }
    }

    match result {
        Ok(PipelineOutcome::Skipped) => {
            eprintln!("Nothing to splice");
            ExitCode::SUCCESS
        }
        Ok(PipelineOutcome::Completed(stats)) => {
            eprintln!(
                "Spliced {} platform files: {} types processed, {} members cloned, {} bodies inherited, {} files written",
                stats.platform_files,
                stats.process.types_processed,
                stats.process.members_cloned,
                stats.process.bodies_inherited,
                stats.files_written
            );
            ExitCode::SUCCESS
        }
        Err(SpliceError::ValidationFailure(report)) => {
            eprint!("{}", DiagnosticRenderer::new(color).render(&report));
            eprintln!("Validation failed: {}", report);
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
