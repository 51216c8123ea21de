//! Boundary to whatever knows the live chain (an RPC client, an indexer).
//!
//! The estimator itself never does I/O; callers fetch snapshots through
//! this trait and pass plain values in.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::info;

use crate::chain::clock::measure_rate;
use crate::chain::snapshot::Snapshot;
use crate::utils::{GovError, Result};

/// Blocks to look back when measuring the recent rate (roughly six weeks).
pub const RECENT_RATE_BLOCKS: u64 = 25_000;

#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Height and time of the current best block.
    async fn best_snapshot(&self) -> Result<Snapshot>;

    /// Height and time of the block at `height` on the best chain.
    async fn snapshot_at(&self, height: u64) -> Result<Snapshot>;
}

/// Provider backed by a fixed set of known blocks.
#[derive(Debug, Clone, Default)]
pub struct StaticChainData {
    blocks: BTreeMap<u64, i64>,
}

impl StaticChainData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, snapshot: Snapshot) -> Self {
        self.insert(snapshot);
        self
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.blocks.insert(snapshot.height, snapshot.ms);
    }
}

#[async_trait]
impl ChainDataProvider for StaticChainData {
    async fn best_snapshot(&self) -> Result<Snapshot> {
        self.blocks
            .iter()
            .next_back()
            .map(|(height, ms)| Snapshot::new(*height, *ms))
            .ok_or_else(|| GovError::Provider("no blocks known".into()))
    }

    async fn snapshot_at(&self, height: u64) -> Result<Snapshot> {
        self.blocks
            .get(&height)
            .map(|ms| Snapshot::new(height, *ms))
            .ok_or_else(|| GovError::Provider(format!("block {height} not known")))
    }
}

/// Fetch the tip and the block `lookback` below it, and measure the rate
/// between them. Returns the tip together with the rate.
pub async fn measure_recent_rate<P>(provider: &P, lookback: u64) -> Result<(Snapshot, f64)>
where
    P: ChainDataProvider + ?Sized,
{
    let best = provider.best_snapshot().await?;
    best.validate()?;
    let root_height = best.height.checked_sub(lookback).filter(|h| *h > 0).ok_or_else(|| {
        GovError::DegenerateInterval(format!(
            "cannot look back {lookback} blocks from height {}",
            best.height
        ))
    })?;
    let root = provider.snapshot_at(root_height).await?;
    let rate = measure_rate(&best, &root)?;
    info!(
        tip = best.height,
        lookback,
        seconds_per_block = rate,
        "measured recent block rate"
    );
    Ok((best, rate))
}
