//! Codegauge CLI - size and complexity metrics for Python source submissions

#![deny(warnings)]

// Global invariants enforced:
// - The analysis itself is pure; all I/O happens here
// - Identical input yields byte-for-byte identical output

use anyhow::{Context, Result};
use clap::Parser;
use codegauge_core::{analyze, render_json, render_text};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codegauge")]
#[command(about = "Report size and complexity metrics for a Python source submission")]
#[command(version = env!("CODEGAUGE_VERSION"))]
struct Cli {
    /// Path to the source file; reads the submission from stdin when omitted
    path: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = read_submission(cli.path.as_deref())?;
    let report = analyze(&source)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)),
    }

    // A syntax error is a rendered report, but still a failed submission
    if report.is_syntax_error() {
        std::process::exit(1);
    }

    Ok(())
}

/// Read the whole submission from a file path, or stdin when no path is given.
fn read_submission(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read submission from stdin")?;
            Ok(buffer)
        }
    }
}
