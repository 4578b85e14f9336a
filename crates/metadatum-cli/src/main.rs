//! `metadatum` CLI: convert token metadata files into Plutus metadatum JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Convert with an explicit selector (stdin → stdout)
//! cat token.metadata.json | metadatum convert --tag 721 --policy <policy_id> --token <asset_name>
//!
//! # Convert a single-token file, deriving the selector, file to file
//! metadatum convert -i token.metadata.json -o token.metadatum.json --version 1
//!
//! # Show the selector a single-token file resolves to
//! metadatum headers -i token.metadata.json
//!
//! # Summarize an existing metadatum file
//! metadatum inspect -i token.metadatum.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metadatum_core::Selector;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "metadatum",
    version,
    about = "Token metadata to Plutus metadatum converter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert metadata JSON into metadatum JSON
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Top-level metadata tag, e.g. 721 (derived from the document if omitted)
        #[arg(long, requires_all = ["policy", "token"])]
        tag: Option<String>,
        /// Policy id under the tag
        #[arg(long, requires_all = ["tag", "token"])]
        policy: Option<String>,
        /// Token name under the policy
        #[arg(long, requires_all = ["tag", "policy"])]
        token: Option<String>,
        /// Metadatum version field
        #[arg(long = "version", default_value_t = 1)]
        datum_version: u64,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the tag, policy id and token name of a single-token document
    Headers {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show node statistics for a metadatum JSON file
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            tag,
            policy,
            token,
            datum_version,
            pretty,
        } => {
            let json = read_input(input.as_deref())?;
            let document: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse metadata JSON")?;

            // clap guarantees the three selector flags are given together or not at all
            let selector = match (tag, policy, token) {
                (Some(tag), Some(policy), Some(token)) => Selector::new(tag, policy, token),
                _ => metadatum_core::locate_single_selector(&document)
                    .context("Failed to derive selector; pass --tag, --policy and --token")?,
            };
            tracing::info!(
                tag = %selector.tag,
                policy = %selector.policy,
                token = %selector.token,
                version = datum_version,
                "converting metadata"
            );

            let datum = metadatum_core::create_metadatum(&document, &selector, datum_version)
                .context("Failed to convert metadata to metadatum")?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&datum)?
            } else {
                serde_json::to_string(&datum)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Headers { input } => {
            let json = read_input(input.as_deref())?;
            let document: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse metadata JSON")?;
            let selector = metadatum_core::locate_single_selector(&document)
                .context("Failed to derive selector")?;
            println!("tag:     {}", selector.tag);
            println!("policy:  {}", selector.policy);
            println!("token:   {}", selector.token);
        }
        Commands::Inspect { input } => {
            let json = read_input(input.as_deref())?;
            let datum = metadatum_core::decode(&json).context("Failed to read metadatum JSON")?;
            let stats = datum.stats();
            println!("Constructors:     {}", stats.constructors);
            println!("Maps:             {}", stats.maps);
            println!("Lists:            {}", stats.lists);
            println!("Bytes:            {}", stats.bytes);
            println!("Ints:             {}", stats.ints);
            println!("Chunked strings:  {}", stats.chunked_strings);
            println!("Max depth:        {}", stats.max_depth);
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            tracing::debug!(path, bytes = content.len(), "wrote metadatum");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
