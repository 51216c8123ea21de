//! Governance cycle windows around superblocks.
//!
//! A cycle ends at a superblock. Voting closes `vote_lead_blocks` before it,
//! and the proposal period that pays out at that superblock runs from
//! roughly three weeks before the vote deadline to a few days after the
//! payment.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::chain::params::NetworkParams;
use crate::chain::snapshot::Snapshot;
use crate::utils::{GovError, Result};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Proposal period opens this long before the vote deadline (hour-floored).
pub const START_BEFORE_VOTE_MS: i64 = 23 * DAY_MS;

/// Proposal period closes this long after the superblock (hour-ceiled).
pub const END_AFTER_SUPERBLOCK_MS: i64 = 4 * DAY_MS;

/// Estimated timing of one governance cycle relative to a snapshot.
/// Deltas are negative for cycles already in the past.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleWindow {
    pub vote_height: u64,
    pub vote_delta: i64,
    pub vote_ms: i64,
    pub vote_iso: String,
    pub vote_delta_ms: f64,
    pub superblock_height: u64,
    pub superblock_delta: i64,
    pub superblock_ms: i64,
    pub superblock_iso: String,
    pub superblock_delta_ms: f64,
    pub start_ms: i64,
    pub start_iso: String,
    pub end_ms: i64,
    pub end_iso: String,
}

/// Cycles classified around "now" (the snapshot time).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSet {
    /// Most recent superblock at or before the snapshot.
    pub last: CycleWindow,
    /// Next cycle, when its vote deadline is too close for a new proposal.
    pub lameduck: Option<CycleWindow>,
    /// Cycles open for new proposals, in height order.
    pub upcoming: Vec<CycleWindow>,
}

impl CycleSet {
    /// Cycle by selection index: 0 is the lame duck, 1.. are upcoming.
    pub fn candidate(&self, index: usize) -> Option<&CycleWindow> {
        match index {
            0 => self.lameduck.as_ref(),
            i => self.upcoming.get(i - 1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CycleEstimator {
    superblock_interval: u64,
    vote_lead_blocks: u64,
}

impl CycleEstimator {
    pub fn new(params: &NetworkParams) -> Self {
        Self {
            superblock_interval: params.superblock_interval,
            vote_lead_blocks: params.vote_lead_blocks,
        }
    }

    /// Superblock `offset` cycles away from the one at or before `height`.
    /// Offset 0 is the current (or exactly matching) superblock, -1 the one
    /// before it, 1 the next.
    pub fn nth_superblock(&self, height: u64, offset: i64) -> Result<u64> {
        let current = (height / self.superblock_interval) as i64;
        let index = current + offset;
        if index < 0 {
            return Err(GovError::IndexOutOfRange {
                index: offset,
                available: current as usize,
            });
        }
        Ok(index as u64 * self.superblock_interval)
    }

    /// Vote, payment and proposal-period estimates for one cycle.
    ///
    /// Timestamps are anchored on whole seconds: the superblock time is the
    /// snapshot second plus the truncated delta, and the vote time is the
    /// superblock second minus the truncated vote lead.
    pub fn estimate_nth_cycle(&self, snapshot: &Snapshot, rate: f64, offset: i64) -> Result<CycleWindow> {
        snapshot.validate()?;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(GovError::DegenerateInterval(format!(
                "seconds per block must be positive, got {rate}"
            )));
        }

        let superblock_height = self.nth_superblock(snapshot.height, offset)?;
        let vote_height = superblock_height
            .checked_sub(self.vote_lead_blocks)
            .ok_or(GovError::IndexOutOfRange { index: offset, available: 0 })?;

        let superblock_delta = superblock_height as i64 - snapshot.height as i64;
        let superblock_delta_ms = superblock_delta as f64 * rate * 1000.0;
        let vote_lead_ms = self.vote_lead_blocks as f64 * rate * 1000.0;

        let superblock_ms = floor_to(snapshot.ms, 1000) + superblock_delta_ms as i64;
        let vote_ms = floor_to(superblock_ms, 1000) + (-vote_lead_ms) as i64;

        let start_ms = floor_to(vote_ms - START_BEFORE_VOTE_MS, HOUR_MS);
        let end_ms = ceil_to(superblock_ms + END_AFTER_SUPERBLOCK_MS, HOUR_MS);

        Ok(CycleWindow {
            vote_height,
            vote_delta: superblock_delta - self.vote_lead_blocks as i64,
            vote_ms,
            vote_iso: to_iso(vote_ms)?,
            vote_delta_ms: superblock_delta_ms - vote_lead_ms,
            superblock_height,
            superblock_delta,
            superblock_ms,
            superblock_iso: to_iso(superblock_ms)?,
            superblock_delta_ms,
            start_ms,
            start_iso: to_iso(start_ms)?,
            end_ms,
            end_iso: to_iso(end_ms)?,
        })
    }

    /// The last cycle, an optional lame-duck cycle, and `count` upcoming
    /// cycles.
    ///
    /// One extra cycle is computed up front so that `count` upcoming cycles
    /// remain whether or not the next one turns out to be a lame duck.
    pub fn estimate_cycles(
        &self,
        count: usize,
        snapshot: &Snapshot,
        rate: f64,
        lead_ms: i64,
    ) -> Result<CycleSet> {
        let mut windows = (0..=count as i64 + 1)
            .map(|offset| self.estimate_nth_cycle(snapshot, rate, offset))
            .collect::<Result<Vec<_>>>()?;

        let last = windows.remove(0);
        let lameduck = if windows[0].vote_delta_ms < lead_ms as f64 {
            Some(windows.remove(0))
        } else {
            windows.pop();
            None
        };

        debug!(
            last = last.superblock_height,
            lameduck = lameduck.as_ref().map(|w| w.superblock_height),
            upcoming = windows.len(),
            "classified governance cycles"
        );

        Ok(CycleSet {
            last,
            lameduck,
            upcoming: windows,
        })
    }
}

impl Default for CycleEstimator {
    fn default() -> Self {
        Self::new(&NetworkParams::mainnet())
    }
}

fn floor_to(ms: i64, unit: i64) -> i64 {
    ms.div_euclid(unit) * unit
}

fn ceil_to(ms: i64, unit: i64) -> i64 {
    let floored = floor_to(ms, unit);
    if floored == ms {
        ms
    } else {
        floored + unit
    }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn to_iso(ms: i64) -> Result<String> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(GovError::InvalidTimestamp(ms))
}
