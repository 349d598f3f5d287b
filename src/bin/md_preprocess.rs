//! Markdown preprocessor command line
//!
//! # Usage
//!
//! ```bash
//! # Process a file, includes resolve next to it
//! md_preprocess docs/index.md -o build/index.md
//!
//! # Process stdin, includes resolve against the current directory
//! cat index.md | md_preprocess -D version=1.2.0
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::debug;

use md_preprocess::config::{parse_definition, BASE_DIR_ENV};
use md_preprocess::{PreprocessError, Preprocessor, PreprocessorConfig};

#[derive(Parser)]
#[command(name = "md_preprocess")]
#[command(version)]
#[command(about = "Expand include/define directives in a markdown document")]
#[command(long_about = None)]
struct Cli {
    /// Input file (reads stdin if not provided)
    input: Option<PathBuf>,

    /// Output path (writes stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory include paths are resolved against [default: the input's directory]
    ///
    /// Also read from MD_PREPROCESS_BASE_DIR, including a value set in a .env
    /// file in the current directory.
    #[arg(long, env = BASE_DIR_ENV)]
    base_dir: Option<PathBuf>,

    /// Predefine a variable, NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_definition)]
    defines: Vec<(String, String)>,

    /// How errors are reported on stderr
    #[arg(long, default_value = "text", value_enum)]
    error_format: ErrorFormat,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

enum Failure {
    Preprocess(PreprocessError),
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Failure::Other(error)
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            report(&failure, cli.error_format);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let input = read_input(cli.input.as_deref())?;

    let mut config = PreprocessorConfig::from_input_path(cli.input.as_deref());
    if let Some(base_dir) = &cli.base_dir {
        config = config.with_base_dir(base_dir);
    }
    config.predefined.extend(cli.defines.iter().cloned());
    debug!(
        base_dir = %config.base_dir.display(),
        from_option_or_env = cli.base_dir.is_some(),
        "resolved include base directory"
    );

    let output = Preprocessor::new(&config)
        .run(&input)
        .map_err(Failure::Preprocess)?;

    write_output(cli.output.as_deref(), &output.text)?;
    Ok(())
}

fn report(failure: &Failure, format: ErrorFormat) {
    match (failure, format) {
        (Failure::Preprocess(e), ErrorFormat::Json) => match serde_json::to_string(&e.to_diagnostic()) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}: {}", "error".red().bold(), e),
        },
        (Failure::Preprocess(e), ErrorFormat::Text) => {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        (Failure::Other(e), ErrorFormat::Json) => {
            eprintln!("{}", serde_json::json!({ "kind": "io", "message": format!("{:#}", e) }));
        }
        (Failure::Other(e), ErrorFormat::Text) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
        }
    }
}

// =============================================================================
// I/O
// =============================================================================

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Files get the text verbatim; stdout gets a trailing newline if missing
fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush().context("Failed to write stdout")
        }
    }
}
