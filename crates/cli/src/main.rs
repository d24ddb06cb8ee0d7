//! Ether Craft CLI - build-time asset tools.
//!
//! # Usage
//!
//! ```bash
//! # Optimize product photos into public/products/optimized-images
//! ec-cli optimize-images
//!
//! # Optimize a different directory
//! ec-cli optimize-images --input assets/photos --output assets/photos/optimized
//! ```
//!
//! # Commands
//!
//! - `optimize-images` - Resize product photos to 800px wide JPEGs

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ec-cli")]
#[command(author, version, about = "Ether Craft CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize product images to 800px wide JPEGs (quality 80)
    OptimizeImages {
        /// Directory holding the source images
        #[arg(short, long, default_value = "public/products")]
        input: PathBuf,

        /// Directory to write optimized images to
        #[arg(short, long, default_value = "public/products/optimized-images")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ec_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error + Send + Sync>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::OptimizeImages { input, output } => {
            // Image codecs are CPU-bound; keep them off the async workers.
            tokio::task::spawn_blocking(move || {
                commands::optimize::optimize_images(&input, &output)
            })
            .await??;
        }
    }
    Ok(())
}
