//! Server binary for `task_tracker`.
//!
//! This binary is a thin wrapper that parses flags and delegates to the library.

use clap::Parser;
use std::process::ExitCode;
use task_tracker::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
