//! FFI binding generator CLI

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ffi-gen")]
#[command(about = "Generate C and C++ headers from exported functions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write include/ai_game_dev.h and include/ai_game_dev.hpp
    Generate,

    /// Check that the headers are in sync with the source
    Check,

    /// Compile the headers with the system C++ compiler ($CXX or c++)
    Verify,

    /// Print the parsed function model as JSON
    Model,

    /// Generate, check and verify
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = ffi_gen::find_workspace_root()?;

    match cli.command {
        Commands::Generate => {
            println!("Generating FFI headers...");
            ffi_gen::generate(&root)?;
            println!("✓ Done!");
        }
        Commands::Check => {
            println!("Checking FFI headers are in sync...");
            if !ffi_gen::check(&root)? {
                anyhow::bail!("Headers are out of sync. Run 'ffi-gen generate' to regenerate.");
            }
            println!("\n✓ All headers are in sync!");
        }
        Commands::Verify => {
            println!("Verifying FFI headers compile...");
            ffi_gen::verify(&root)?;
        }
        Commands::Model => {
            let model = ffi_gen::load_model(&root)?;
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
        Commands::All => {
            println!("Generating FFI headers...");
            ffi_gen::generate(&root)?;
            println!("✓ Done!\n");

            println!("Checking FFI headers are in sync...");
            if !ffi_gen::check(&root)? {
                anyhow::bail!("Headers are out of sync after generation!");
            }
            println!("\n✓ All headers are in sync!\n");

            println!("Verifying FFI headers compile...");
            ffi_gen::verify(&root)?;
        }
    }

    Ok(())
}
