// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arogya - a multilingual health assistant.
//!
//! This is the binary entry point for the Arogya assistant.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shell;

use clap::{Parser, Subcommand};

/// Arogya - a multilingual health assistant.
#[derive(Parser, Debug)]
#[command(name = "arogya", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Arogya REST service.
    Serve,
    /// Launch an interactive chat session.
    Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match arogya_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            arogya_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        None => {
            println!("arogya: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
