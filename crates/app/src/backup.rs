//! Whole-collection JSON import and export.
//!
//! Unlike the data file, an import file must parse completely: a malformed
//! import is an error and the current wallets stay as they are.

use std::path::Path;

use engine::{Engine, Wallet, WalletRepository};

use crate::error::Result;

/// Replace every wallet with the ones in `path`, returning how many were read.
pub async fn import_wallets<R: WalletRepository>(engine: &Engine<R>, path: &Path) -> Result<usize> {
    let raw = tokio::fs::read_to_string(path).await?;
    let wallets: Vec<Wallet> = serde_json::from_str(&raw)?;
    let count = engine.replace_wallets(wallets).await?;

    tracing::info!("imported {count} wallet(s) from {}", path.display());
    Ok(count)
}

/// Write every wallet to `path` as pretty JSON, returning how many were written.
pub async fn export_wallets<R: WalletRepository>(engine: &Engine<R>, path: &Path) -> Result<usize> {
    let wallets = engine.wallets().await?;
    let json = serde_json::to_string_pretty(&wallets)?;
    tokio::fs::write(path, json).await?;

    tracing::info!("exported {} wallet(s) to {}", wallets.len(), path.display());
    Ok(wallets.len())
}
