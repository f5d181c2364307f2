use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;

pub mod commands;

#[derive(Parser)]
#[command(
    name = "heartrisk",
    about = "Multi-condition heart disease risk assessment",
    version = "0.1.0"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess heart condition risks from a partial set of health parameters
    Predict {
        /// Feature vector as inline JSON, e.g. '{"age": 61, "bmi": 29.5}'
        #[arg(short, long)]
        input: Option<String>,

        /// Read the feature vector from a JSON file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Train the per-condition models and report held-out accuracy
    Train,

    /// List the feature schema with canonical defaults
    Schema,

    /// List the tracked heart conditions
    Conditions,

    /// Show detailed information about one condition
    Info {
        /// Condition identifier, e.g. coronary_artery_disease
        #[arg(short, long)]
        condition: String,
    },
}

/// Execute CLI command against the loaded configuration
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Predict { input, file } => {
            info!("Running risk assessment");
            commands::predict(config, input, file)?;
        }
        Commands::Train => {
            info!("Training condition models");
            commands::train(config)?;
        }
        Commands::Schema => {
            commands::schema()?;
        }
        Commands::Conditions => {
            commands::conditions()?;
        }
        Commands::Info { condition } => {
            commands::info(&condition)?;
        }
    }
    Ok(())
}
