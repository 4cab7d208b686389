//! iqa-eval CLI - Image quality assessment tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use iqa_eval::SessionConfig;

mod commands;

/// Image quality assessment tool.
#[derive(Parser)]
#[command(name = "iqa-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug-level logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (IQA_* environment variables take precedence)
    #[arg(long, global = true, env = "IQA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess the quality of a single image
    Assess {
        /// Test image path
        image: PathBuf,

        /// Reference image (required for full-reference metrics)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Metrics to compute (defaults depend on reference presence)
        #[arg(short, long)]
        metrics: Vec<String>,

        /// Write the JSON response to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print performance timings to stderr afterwards
        #[arg(long)]
        timings: bool,
    },

    /// Assess a batch of images
    Batch {
        /// Test image paths
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Reference images, one per test image
        #[arg(short, long)]
        references: Vec<PathBuf>,

        /// Metrics to compute (defaults depend on reference presence)
        #[arg(short, long)]
        metrics: Vec<String>,

        /// Write a timestamped JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a flat CSV summary
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Overall deadline in seconds; images that cannot start in time
        /// report a per-image timeout
        #[arg(long)]
        deadline_secs: Option<u64>,

        /// Print performance timings to stderr afterwards
        #[arg(long)]
        timings: bool,
    },

    /// Inspect the metric catalog
    Metrics {
        #[command(subcommand)]
        action: MetricsAction,
    },
}

#[derive(Subcommand)]
enum MetricsAction {
    /// List available metrics and the default selections
    List,

    /// Show interpretation metadata for a metric, optionally for a score
    Interpret {
        /// Metric name
        name: String,

        /// Score value to interpret
        #[arg(short, long)]
        score: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Assess {
            image,
            reference,
            metrics,
            output,
            timings,
        } => commands::assess::run(config, image, reference, metrics, output, timings),
        Commands::Batch {
            images,
            references,
            metrics,
            output,
            csv,
            deadline_secs,
            timings,
        } => commands::batch::run(
            config,
            images,
            references,
            metrics,
            output,
            csv,
            deadline_secs,
            timings,
        ),
        Commands::Metrics { action } => match action {
            MetricsAction::List => commands::metrics::list(),
            MetricsAction::Interpret { name, score } => commands::metrics::interpret(&name, score),
        },
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    let config = match path {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    Ok(config.apply_env())
}
