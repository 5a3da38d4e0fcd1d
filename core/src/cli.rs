use std::collections::VecDeque;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader, Lines, Stdin};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::interpreter::{codec, interpret_with_input, InputProvider};
use crate::types::RunResult;

#[derive(Parser)]
#[command(name = "interfuck")]
#[command(about = "INTERFUCK - a polite esoteric language interpreter", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program
    Run {
        /// Program file, or "-" to read it from stdin
        file: String,

        /// Hide notification lines (created/removed/updated/...)
        #[arg(short = 'q', long = "quiet")]
        quiet: bool,

        /// Print the run result as JSON
        #[arg(long)]
        json: bool,

        /// Answers for PLEASE LISTEN :8., used in order before reading stdin
        #[arg(short = 'i', long = "input")]
        input: Vec<String>,
    },

    /// Print the character conversion table
    Chars,
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<i32> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Internal function that handles CLI commands, returning the exit status
async fn run_cli_with_args(cli: Cli) -> Result<i32> {
    let mut builder = Config::builder();
    if let Some(path) = &cli.config {
        builder = builder.config_path(path);
    }
    if let Commands::Run { quiet: true, .. } = &cli.command {
        builder = builder.hide_command_output(true);
    }
    let config = builder.build()?;

    init_logging(&config);

    match cli.command {
        Commands::Run {
            file, json, input, ..
        } => {
            let source = read_program(&file).await?;
            let mut provider = CliInput::new(input);
            let result = interpret_with_input(&source, config.interpreter, &mut provider).await;
            report(&result, json)?;
            Ok(if result.is_success() { 0 } else { 1 })
        }

        Commands::Chars => {
            for value in codec::MIN_CODE..=codec::MAX_CODE {
                println!("{}\t'{}'", value, codec::encode(value));
            }
            Ok(0)
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    // try_init: a global subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn read_program(file: &str) -> Result<String> {
    if file == "-" {
        let mut source = String::new();
        tokio::io::stdin()
            .read_to_string(&mut source)
            .await
            .context("Failed to read program from stdin")?;
        Ok(source)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read program {file}"))
    }
}

fn report(result: &RunResult, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{rendered}");
        return Ok(());
    }

    for line in &result.output {
        println!("{line}");
    }
    if let Some(error) = &result.error {
        eprintln!("Error: {error}");
    }
    Ok(())
}

/* ===================== Input ===================== */

/// `--input` values first, then stdin one line at a time
struct CliInput {
    scripted: VecDeque<String>,
    stdin: Option<Lines<BufReader<Stdin>>>,
}

impl CliInput {
    fn new(scripted: Vec<String>) -> Self {
        Self {
            scripted: scripted.into(),
            stdin: None,
        }
    }
}

impl InputProvider for CliInput {
    async fn provide(&mut self, name: &str) -> String {
        if let Some(answer) = self.scripted.pop_front() {
            return answer;
        }

        eprint!("{name}> ");
        let lines = self
            .stdin
            .get_or_insert_with(|| BufReader::new(tokio::io::stdin()).lines());
        answer_from(name, lines.next_line().await)
    }
}

/// The line read from stdin, or "" when stdin is closed or unreadable
fn answer_from(name: &str, read: std::io::Result<Option<String>>) -> String {
    match read {
        Ok(Some(line)) => line,
        Ok(None) => {
            warn!(datasub = %name, "stdin closed, using empty string");
            String::new()
        }
        Err(err) => {
            warn!(datasub = %name, error = %err, "failed to read input");
            String::new()
        }
    }
}
