mod command;
mod config;
mod protocol;
mod session;

use std::io::{self, BufWriter};

use anyhow::Result;
use config::DriverConfig;
use session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries command output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = DriverConfig::load()?;
    info!(
        format = ?config.output.format,
        flush_per_command = config.output.flush_per_command,
        on_invalid = ?config.input.on_invalid,
        "loaded wordtrie config"
    );

    let mut session = Session::new(config);
    let stats = session.run(io::stdin().lock(), BufWriter::new(io::stdout().lock()))?;
    info!(
        inserted = stats.inserted,
        queries = stats.queries,
        listings = stats.listings,
        rejected = stats.rejected,
        words = session.trie().len(),
        nodes = session.trie().node_count(),
        "session finished"
    );
    Ok(())
}
