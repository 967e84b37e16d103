//! lazyseq CLI
//!
//! Runs queries over a small user-defined sequence to show the library
//! end to end.

mod demo;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use lazyseq_core::ProducerConfig;
use lazyseq_core::config;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::demo::Numbers;

#[derive(Parser)]
#[command(name = "lazyseq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lazy sequence demo - pull values from suspendable producers", long_about = None)]
struct Cli {
    /// Producer configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SequenceArgs {
    /// Comma-separated values of the demo sequence
    #[arg(long, value_delimiter = ',', default_values_t = demo::DEFAULT_VALUES.to_vec())]
    values: Vec<i64>,
}

impl SequenceArgs {
    fn numbers(self) -> Numbers {
        Numbers::new(self.values)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sequence, one element per line
    Print {
        #[command(flatten)]
        seq: SequenceArgs,

        /// Append a value after the last element
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        append: Option<i64>,

        /// Concatenate the (appended) sequence with itself
        #[arg(long)]
        concat: bool,
    },

    /// Print the sum of the sequence
    Sum {
        #[command(flatten)]
        seq: SequenceArgs,
    },

    /// Print whether every element is greater than N
    All {
        #[command(flatten)]
        seq: SequenceArgs,

        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        gt: i64,
    },

    /// Print whether some element is greater than N
    Any {
        #[command(flatten)]
        seq: SequenceArgs,

        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        gt: i64,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lazyseq=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && let Err(e) = load_config(path)
    {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Print {
            seq,
            append,
            concat,
        } => demo::print_lines(&seq.numbers(), append, concat),
        Commands::Sum { seq } => demo::sum(&seq.numbers()).map(|total| vec![total.to_string()]),
        Commands::All { seq, gt } => {
            demo::compare(&seq.numbers(), gt, true).map(|b| vec![b.to_string()])
        }
        Commands::Any { seq, gt } => {
            demo::compare(&seq.numbers(), gt, false).map(|b| vec![b.to_string()])
        }
        Commands::Completions { shell } => {
            run_completions(shell);
            return;
        }
    };

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Load a producer config file and install it for the rest of the process.
fn load_config(path: &Path) -> Result<ProducerConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let producer_config = ProducerConfig::from_toml(&content)?;

    if config::configure(producer_config) {
        info!(stack_size = producer_config.stack_size, "producer config loaded");
    } else {
        warn!(
            "producer config already in effect, ignoring '{}'",
            path.display()
        );
    }
    Ok(producer_config)
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "lazyseq", &mut io::stdout());
}
