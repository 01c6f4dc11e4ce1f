//! ES Profile Insight CLI
//!
//! Renders Elasticsearch query profiles as time-proportional trees
//! and asks an AI advisor for optimization advice.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::warn;
use std::path::PathBuf;

use es_profile_insight::advisor::TextGenerator;
use es_profile_insight::commands::{
    build_client, display_version, execute_analyze, execute_explore, execute_html,
    execute_render, execute_summary, execute_validate, AnalyzeArgs,
};
use es_profile_insight::render::TextOptions;

/// ES Profile Insight - performance analysis for Elasticsearch queries & aggs
#[derive(Parser, Debug)]
#[command(name = "es-profile")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the profile tree
    Render {
        /// Profile response JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Expand every node instead of the first two levels
        #[arg(long)]
        expand_all: bool,
    },

    /// Write a standalone HTML report
    Html {
        /// Profile response JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Output path for the report
        #[arg(short, long, default_value = "profile.html")]
        output: PathBuf,

        /// Report title
        #[arg(long)]
        title: Option<String>,
    },

    /// Validate a profile response
    Validate {
        /// Profile response JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
    },

    /// Print or write the simplified payload sent to the advisor
    Summary {
        /// Profile response JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        /// Output path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ask the AI advisor for optimization advice
    Analyze {
        /// Profile response JSON ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        file: PathBuf,

        #[command(flatten)]
        advisor: AdvisorArgs,
    },

    /// Interactive explorer (load, toggle nodes, analyze)
    Explore {
        /// Profile to load on start
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        advisor: AdvisorArgs,
    },

    /// Display version information
    Version,
}

/// Advisory endpoint options
#[derive(clap::Args, Debug)]
struct AdvisorArgs {
    /// API key for the advisory endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the advisory endpoint
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let options = TextOptions::new().with_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Render { file, expand_all } => {
            execute_render(&file, expand_all, &options)?;
        }

        Commands::Html {
            file,
            output,
            title,
        } => {
            execute_html(&file, &output, title)?;
        }

        Commands::Validate { file } => {
            execute_validate(&file)?;
        }

        Commands::Summary { file, output } => {
            execute_summary(&file, output.as_deref())?;
        }

        Commands::Analyze { file, advisor } => {
            execute_analyze(AnalyzeArgs {
                input: file,
                api_key: advisor.api_key,
                model: advisor.model,
                endpoint: advisor.endpoint,
                color: !cli.no_color,
            })?;
        }

        Commands::Explore { file, advisor } => {
            let generator: Option<Box<dyn TextGenerator>> =
                match build_client(advisor.api_key, advisor.model, advisor.endpoint) {
                    Ok(client) => Some(Box::new(client)),
                    Err(e) => {
                        warn!("AI advisor disabled: {}", e);
                        None
                    }
                };
            execute_explore(file, generator, options)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
