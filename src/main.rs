use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use file_urls::{FieldSelection, ResolvedFile, ResolverConfig, rewrite_payload};

/// Canonicalize stored file references into /api/files URLs.
#[derive(Debug, Parser)]
#[command(name = "file-urls", version)]
struct Cli {
    /// API origin prepended to /api/files paths (overrides config and environment).
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Directory searched for file_urls.config.json.
    #[arg(long = "config", value_name = "DIR", global = true, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical URL of each reference, one per line.
    Canonicalize {
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// Print a JSON report describing each reference.
    Inspect {
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// Rewrite file fields of a JSON payload read from FILE or stdin.
    Rewrite {
        input: Option<PathBuf>,

        /// JSON file with include/exclude field rules.
        #[arg(long, value_name = "FILE")]
        fields: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    file_urls::logging::init_logging()?;
    let cli = Cli::parse();

    let config = ResolverConfig::discover(&cli.config_dir)
        .with_env_override()
        .with_origin_override(cli.origin);
    let resolver = config.resolver();
    tracing::debug!(origin = %resolver.origin(), "resolver configured");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Canonicalize { references } => {
            let urls = resolver.canonicalize_all(references.iter().map(|r| Some(r.as_str())));
            for url in urls {
                writeln!(out, "{url}")?;
            }
        }
        Command::Inspect { references } => {
            let reports: Vec<ResolvedFile> = references
                .iter()
                .map(|reference| ResolvedFile::new(&resolver, reference))
                .collect();
            serde_json::to_writer_pretty(&mut out, &reports)?;
            writeln!(out)?;
        }
        Command::Rewrite { input, fields } => {
            let selection = match fields {
                Some(path) => FieldSelection::load_from_path(path)?,
                None => config.selection(),
            };
            let mut payload = read_payload(input.as_ref())?;
            let summary = rewrite_payload(&resolver, &selection, &mut payload);
            tracing::info!(
                rewritten = summary.rewritten_fields,
                dropped = summary.dropped_entries,
                "payload rewritten"
            );
            serde_json::to_writer_pretty(&mut out, &payload)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn read_payload(input: Option<&PathBuf>) -> Result<Value> {
    let (text, source) = match input {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (
            io::read_to_string(io::stdin()).context("failed to read payload from stdin")?,
            String::from("stdin"),
        ),
    };

    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON from {source}"))
}
