//! INTERFUCK CLI
//!
//! Runs INTERFUCK programs from a file or stdin and prints their output.

use interfuck_core::cli;

#[tokio::main]
async fn main() {
    match cli::run_cli().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
