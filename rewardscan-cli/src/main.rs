//! RewardScan CLI — incremental validator reward collection.
//!
//! One run resolves the current epoch, fetches every unresolved epoch in
//! `[600, current - 1]` for the given identity, and writes the accumulated
//! history to `<identity>.csv`. Re-runs only fetch epochs not yet resolved.

use anyhow::{Context, Result};
use clap::Parser;
use rewardscan_core::data::{SolanaRpc, StderrProgress, TrilliumProvider};
use rewardscan_core::reconcile::{sync_rewards, SyncOptions, SyncSummary};
use rewardscan_core::store::RewardStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rewardscan",
    about = "Collect a Solana validator's per-epoch reward history into a local store and CSV"
)]
struct Cli {
    /// Validator identity pubkey to collect rewards for.
    identity: String,

    /// Path to the local reward store.
    #[arg(long, default_value = "data.sqlite3")]
    db: PathBuf,

    /// Directory the CSV export is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut store = RewardStore::open(&cli.db)
        .with_context(|| format!("failed to open reward store at {}", cli.db.display()))?;
    let oracle = SolanaRpc::new();
    let provider = TrilliumProvider::new();
    let options = SyncOptions {
        out_dir: cli.out_dir,
        ..SyncOptions::default()
    };

    let summary = sync_rewards(
        &oracle,
        &provider,
        &mut store,
        &cli.identity,
        &options,
        &StderrProgress,
    )?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &SyncSummary) {
    println!();
    println!("=== Sync Result ===");
    println!("Identity:   {}", summary.identity);
    println!(
        "Range:      {} to {}",
        summary.start_epoch, summary.end_epoch
    );
    println!("Skipped:    {} (already resolved)", summary.skipped);
    println!("Fetched:    {}", summary.fetched);
    println!("Missing:    {}", summary.missing);
    println!(
        "Exported:   {} ({} rows)",
        summary.csv_path.display(),
        summary.exported_rows
    );
}
