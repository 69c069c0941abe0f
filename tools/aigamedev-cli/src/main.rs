//! aigamedev - command-line front end for the AI game dev library
//!
//! # Commands
//!
//! - `aigamedev create [WORDS...]` - Generate a game project description
//! - `aigamedev engines` - List supported engines
//! - `aigamedev presets` - List built-in configuration presets
//!
//! # Usage
//!
//! ```bash
//! # Default description ("Simple 2D platformer game"), auto engine
//! aigamedev create
//!
//! # Pick an engine and emit the result as JSON
//! aigamedev create a fast paced space shooter --engine bevy --json
//!
//! # Start from a preset
//! aigamedev create castle siege --preset advanced_rts
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

mod create;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use aigamedev_core::settings::{self, Settings};

/// aigamedev - generate game project skeletons from a description
#[derive(Parser)]
#[command(name = "aigamedev")]
#[command(about = "Generate game project skeletons from a description")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a game from a description
    Create(create::CreateArgs),

    /// List supported engines
    Engines,

    /// List built-in configuration presets
    Presets,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Ok(settings::load_from(path)?),
        None => Ok(settings::load()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => {
            let settings = load_settings(cli.config.as_ref())?;
            create::execute(args, settings)
        }
        Commands::Engines => {
            info::engines();
            Ok(())
        }
        Commands::Presets => {
            info::presets();
            Ok(())
        }
    }
}
