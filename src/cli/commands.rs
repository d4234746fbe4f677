use clap::{Parser, Subcommand};
use std::path::PathBuf;
use upi_resolver::{config::DEFAULT_CONFIG_PATH, export::ExportFormat};

#[derive(Parser)]
#[command(name = "upi-resolver")]
#[command(about = "Batch resolver from mobile numbers to UPI account details")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI dashboard
    Tui {
        /// Numbers file to load on startup (one number per line)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Resolve a numbers file to completion and export the results
    Run {
        /// Numbers file (one number per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to export.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Artifacts to write
        #[arg(short, long, value_enum, default_value = "all")]
        format: ExportFormat,
    },

    /// Validate a numbers file without resolving anything
    Check {
        /// Numbers file to inspect
        file: PathBuf,
    },

    /// Resolve a single number and print the record
    Resolve {
        /// 10-digit mobile number
        number: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample numbers file
    Sample {
        #[arg(short, long, default_value = "sample_numbers.txt")]
        path: PathBuf,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
