use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};

use banquet_seating::cli::{self, SummaryFormat};
use banquet_seating::config::SeatingConfig;
use banquet_seating::logging::{LoggingConfig, init_logging};

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(about = "Assign banquet tables to booking groups and backfill vacancies from a reserve list")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Also write daily log files to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Write file logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the seating table from the group booking files
    Assign {
        /// Folder with grp<id>-<name>.csv files
        #[arg(short, long)]
        groups_dir: Option<PathBuf>,

        /// Reserve guest list
        #[arg(short, long)]
        reserve: Option<PathBuf>,

        /// Seating table to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave vacancies unfilled
        #[arg(long)]
        no_reserve: bool,
    },

    /// Per-table tallies of a seating table
    Summary {
        /// Seating table to read (defaults to the configured output file)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: SummaryFormat,
    },

    /// Write the effective configuration as TOML
    Config {
        #[arg(short, long, default_value = "seating.toml")]
        output: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SeatingConfig> {
    let mut config = match path {
        Some(path) => SeatingConfig::load_from_file(path)?,
        None => SeatingConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging_config = LoggingConfig {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
        enable_json_format: cli.log_json,
    };
    let _guard = init_logging(&logging_config)?;

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Assign {
            groups_dir,
            reserve,
            output,
            no_reserve,
        } => {
            if let Some(dir) = groups_dir {
                config.paths.groups_dir = dir;
            }
            if let Some(file) = reserve {
                config.paths.reserve_file = file;
            }
            if let Some(file) = output {
                config.paths.output_file = file;
            }
            cli::assign_command(config, !no_reserve)
        }
        Commands::Summary { input, format } => {
            let input = input.unwrap_or_else(|| config.paths.output_file.clone());
            cli::summary_command(&config, &input, format)
        }
        Commands::Config { output } => cli::config_command(&config, output),
    }
}
