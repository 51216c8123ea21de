//! Per-network governance constants.
//!
//! Nothing here is global state: a `NetworkParams` value is built once
//! (from `mainnet()` or a config file) and handed to the clock and the
//! estimator, so several networks can be used side by side.

use serde::{Deserialize, Serialize};

use crate::chain::snapshot::Snapshot;
use crate::utils::{GovError, Result};

/// Blocks between superblocks on mainnet (about one month).
pub const SUPERBLOCK_INTERVAL: u64 = 16616;

/// Votes close this many blocks before the superblock.
pub const VOTE_LEAD_BLOCKS: u64 = 1662;

/// A new proposal needs at least this long before the vote deadline.
pub const PROPOSAL_LEAD_MS: i64 = 6 * 24 * 60 * 60 * 1000;

/// Mean block time between monthly superblocks 1 and 61.
pub const DEFAULT_SECONDS_PER_BLOCK: f64 = 157.5816652623977;

/// Monthly superblock 1, 2017-03-05T20:16:05Z.
pub const MONTHLY_SUPERBLOCK_01: Snapshot = Snapshot::new(631408, 1_488_744_965_000);

/// Monthly superblock 61, 2022-02-26T03:53:02Z.
pub const MONTHLY_SUPERBLOCK_61: Snapshot = Snapshot::new(1628368, 1_645_847_582_000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub name: String,
    pub superblock_interval: u64,
    pub vote_lead_blocks: u64,
    pub default_seconds_per_block: f64,
    /// Reference point for long-run rate measurements.
    pub root: Snapshot,
    /// Default snapshot when no live one is available, and the point
    /// heights and times are extrapolated from.
    pub anchor: Snapshot,
}

impl NetworkParams {
    pub fn mainnet() -> Self {
        Self {
            name: "mainnet".to_string(),
            superblock_interval: SUPERBLOCK_INTERVAL,
            vote_lead_blocks: VOTE_LEAD_BLOCKS,
            default_seconds_per_block: DEFAULT_SECONDS_PER_BLOCK,
            root: MONTHLY_SUPERBLOCK_01,
            anchor: MONTHLY_SUPERBLOCK_61,
        }
    }

    /// Sanity checks for params that came from outside the binary.
    pub fn validate(&self) -> Result<()> {
        if self.superblock_interval == 0 {
            return Err(GovError::Config("superblock_interval must be positive".into()));
        }
        if self.vote_lead_blocks >= self.superblock_interval {
            return Err(GovError::Config(format!(
                "vote_lead_blocks ({}) must be below superblock_interval ({})",
                self.vote_lead_blocks, self.superblock_interval
            )));
        }
        if !(self.default_seconds_per_block.is_finite() && self.default_seconds_per_block > 0.0) {
            return Err(GovError::Config(format!(
                "default_seconds_per_block must be positive, got {}",
                self.default_seconds_per_block
            )));
        }
        self.root.validate()?;
        self.anchor.validate()?;
        if self.root.height == self.anchor.height {
            return Err(GovError::Config("root and anchor must be different blocks".into()));
        }
        Ok(())
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
