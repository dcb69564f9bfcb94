use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use simbench::config::BenchConfig;

#[derive(Parser)]
#[command(
    name = "simbench",
    about = "Day-by-day batch benchmark runner for an external route simulator",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulator once per day and summarize the results (default)
    Run(RunArgs),

    /// List the dates a run would cover, without invoking anything
    Dates {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print statistics for result tables written by a previous run
    Summarize {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the result tables
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the result tables
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Simulator executable (overrides the config file)
    #[arg(long)]
    program: Option<String>,

    /// JSON summary for machine parsing
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let mut config = BenchConfig::resolve(args.config.as_deref())?;
            if let Some(dir) = args.output_dir {
                config.output.directory = dir;
            }
            if let Some(program) = args.program {
                config.simulator.program = program;
            }
            tracing::info!(program = %config.simulator.program, "Starting benchmark batch");
            simbench::run(&config, args.json)?;
        }
        Commands::Dates { config } => {
            let config = BenchConfig::resolve(config.as_deref())?;
            let range = config.date_range();
            let mut count = 0usize;
            for date in &range {
                println!("{}", date);
                count += 1;
            }
            println!("{} dates across {:?}", count, range.years());
        }
        Commands::Summarize { config, output_dir } => {
            let config = BenchConfig::resolve(config.as_deref())?;
            simbench::summarize(&config, output_dir.as_deref())?;
        }
    }

    Ok(())
}
