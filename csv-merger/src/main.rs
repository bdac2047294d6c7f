//! CLI binary for the csv-merger.

use clap::Parser;
use csv_merger::{Merger, MergerConfig};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// CSV Merger - appends rows from a source CSV file into a target CSV file,
/// skipping rows whose key columns already match an existing target row.
#[derive(Parser, Debug)]
#[command(name = "csv-merger")]
#[command(about = "Appends rows from a source CSV into a target CSV, deduplicated by key columns")]
struct Args {
    /// Source CSV file to read rows from
    source: String,

    /// Target CSV file to append rows to (created if missing)
    target: String,

    /// Key column indices (1-based, into the source schema)
    #[arg(required = true, num_args = 1.., value_parser = clap::value_parser!(u64).range(1..))]
    key_columns: Vec<u64>,
}

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(e) = run() {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    info!(
        source_path = %args.source,
        target_path = %args.target,
        key_columns = ?args.key_columns,
        "Starting CSV Merger"
    );

    let key_columns: Vec<usize> = args.key_columns.iter().map(|&c| c as usize).collect();

    let merger = Merger::new(
        &args.source,
        &args.target,
        key_columns,
        MergerConfig::default(),
    )?;

    let summary = merger.merge()?;

    info!(
        appended = summary.appended,
        skipped = summary.skipped,
        "Merge completed successfully"
    );

    Ok(())
}
