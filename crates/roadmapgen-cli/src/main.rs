//! roadmapgen CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "roadmapgen",
    version,
    about = "Turn submission-history exports into day-by-day study roadmaps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate roadmap artifacts from the configured input directories
    Generate {
        /// Only regenerate this track (default: all tracks)
        #[arg(long)]
        track: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the pipeline and print the result without writing artifacts
        #[arg(long)]
        dry_run: bool,
    },

    /// Check the configuration and how each input document is recognised
    Validate {
        /// Only check this track (default: all tracks)
        #[arg(long)]
        track: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print an existing roadmap artifact
    Show {
        /// Artifact JSON file
        #[arg(long)]
        artifact: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Only show this month (display label, e.g. "Month 2")
        #[arg(long)]
        month: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build a flat problem catalog from every track's artifact
    Catalog {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the catalog here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create a starter roadmapgen.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roadmapgen=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            track,
            config,
            dry_run,
        } => commands::generate::execute(track, config, dry_run).await,
        Commands::Validate { track, config } => commands::validate::execute(track, config),
        Commands::Show {
            artifact,
            format,
            month,
            output,
        } => commands::show::execute(artifact, format, month, output),
        Commands::Catalog { config, output } => commands::catalog::execute(config, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
