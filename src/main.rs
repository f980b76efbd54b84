use anyhow::Context;
use cafe_finder::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // Run the command, racing it against CTRL+C
    let result: anyhow::Result<()> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result.context("cafe-finder did not complete"),
            _ = shutdown_signal() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(cafe_finder::CafeError::interrupted("Interrupted by user").into())
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Resolves on CTRL+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
