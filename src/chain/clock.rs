//! Conversion between block height and wall-clock time.
//!
//! All conversions are linear around a single reference snapshot using a
//! measured seconds-per-block rate.

use tracing::debug;

use crate::chain::params::NetworkParams;
use crate::chain::snapshot::Snapshot;
use crate::utils::{GovError, Result};

/// Seconds per block between `reference` and `snapshot`.
///
/// Computed as `(Δms / Δblocks) / 1000`; the division order is part of the
/// contract since the published default rate is pinned to the last bit.
pub fn measure_rate(snapshot: &Snapshot, reference: &Snapshot) -> Result<f64> {
    snapshot.validate()?;
    reference.validate()?;

    let block_delta = snapshot.height as f64 - reference.height as f64;
    if block_delta == 0.0 {
        return Err(GovError::DegenerateInterval(format!(
            "snapshot and reference are both at height {}",
            snapshot.height
        )));
    }
    let time_delta = (snapshot.ms - reference.ms) as f64;
    let ms_per_block = time_delta / block_delta;
    let rate = ms_per_block / 1000.0;

    check_rate(rate)?;
    debug!(
        from = reference.height,
        to = snapshot.height,
        seconds_per_block = rate,
        "measured block rate"
    );
    Ok(rate)
}

/// Height expected at `ms`, extrapolated from `reference`, rounded to the
/// nearest block.
pub fn height_at(ms: i64, rate: f64, reference: &Snapshot) -> Result<u64> {
    check_rate(rate)?;
    let delta_ms = ms
        .checked_sub(reference.ms)
        .ok_or(GovError::InvalidTimestamp(ms))?;
    let blocks = (delta_ms as f64 / 1000.0 / rate).round();
    let height = reference.height as f64 + blocks;
    if height < 0.0 || height >= u64::MAX as f64 {
        return Err(GovError::InvalidTimestamp(ms));
    }
    Ok(height as u64)
}

/// Time (ms) expected at `height`, extrapolated from `reference`.
pub fn time_at(height: u64, rate: f64, reference: &Snapshot) -> Result<i64> {
    check_rate(rate)?;
    let blocks = height as f64 - reference.height as f64;
    let delta_ms = (blocks * rate * 1000.0).round();
    // float-to-int casts saturate, so range-check before converting
    if !(i64::MIN as f64..i64::MAX as f64).contains(&delta_ms) {
        return Err(GovError::InvalidTimestamp(if delta_ms < 0.0 { i64::MIN } else { i64::MAX }));
    }
    let delta_ms = delta_ms as i64;
    reference
        .ms
        .checked_add(delta_ms)
        .ok_or(GovError::InvalidTimestamp(reference.ms.saturating_add(delta_ms)))
}

fn check_rate(rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(GovError::DegenerateInterval(format!(
            "seconds per block must be positive, got {rate}"
        )))
    }
}

/// Height/time conversions bound to one network's reference points.
#[derive(Debug, Clone, Copy)]
pub struct ChainClock {
    root: Snapshot,
    anchor: Snapshot,
    default_rate: f64,
}

impl ChainClock {
    pub fn new(params: &NetworkParams) -> Self {
        Self {
            root: params.root,
            anchor: params.anchor,
            default_rate: params.default_seconds_per_block,
        }
    }

    /// The network's published rate. Never recomputed, so output stays
    /// stable when no live data is supplied.
    pub fn default_seconds_per_block(&self) -> f64 {
        self.default_rate
    }

    /// Long-run rate from the network root up to `snapshot`.
    pub fn seconds_per_block(&self, snapshot: &Snapshot) -> Result<f64> {
        measure_rate(snapshot, &self.root)
    }

    pub fn height_at(&self, ms: i64, rate: f64) -> Result<u64> {
        height_at(ms, rate, &self.anchor)
    }

    pub fn time_at(&self, height: u64, rate: f64) -> Result<i64> {
        time_at(height, rate, &self.anchor)
    }

    /// Snapshot for an instant when the chain tip is unknown.
    pub fn estimate_snapshot(&self, ms: i64) -> Result<Snapshot> {
        let height = self.height_at(ms, self.default_rate)?;
        let snapshot = Snapshot::new(height, ms);
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl Default for ChainClock {
    fn default() -> Self {
        Self::new(&NetworkParams::mainnet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::params::{DEFAULT_SECONDS_PER_BLOCK, MONTHLY_SUPERBLOCK_01, MONTHLY_SUPERBLOCK_61};
    use proptest::prelude::*;

    #[test]
    fn test_default_rate_matches_anchors() {
        let clock = ChainClock::default();
        let measured = clock.seconds_per_block(&MONTHLY_SUPERBLOCK_61).unwrap();
        assert_eq!(measured, DEFAULT_SECONDS_PER_BLOCK);
        assert_eq!(clock.default_seconds_per_block(), DEFAULT_SECONDS_PER_BLOCK);
    }

    #[test]
    fn test_rejects_incomplete_snapshot() {
        let missing_height = Snapshot::new(0, 1_722_549_660_000);
        assert_eq!(
            measure_rate(&missing_height, &MONTHLY_SUPERBLOCK_01),
            Err(GovError::IncompleteSnapshot("height"))
        );
        let missing_time = Snapshot::new(2_114_623, 0);
        assert_eq!(
            measure_rate(&MONTHLY_SUPERBLOCK_61, &missing_time),
            Err(GovError::IncompleteSnapshot("time"))
        );
    }

    #[test]
    fn test_rejects_zero_block_interval() {
        let res = measure_rate(&MONTHLY_SUPERBLOCK_61, &MONTHLY_SUPERBLOCK_61);
        assert!(matches!(res, Err(GovError::DegenerateInterval(_))));
    }

    #[test]
    fn test_rejects_backwards_time() {
        let later = Snapshot::new(MONTHLY_SUPERBLOCK_61.height + 10, MONTHLY_SUPERBLOCK_61.ms - 1000);
        let res = measure_rate(&later, &MONTHLY_SUPERBLOCK_61);
        assert!(matches!(res, Err(GovError::DegenerateInterval(_))));
    }

    #[test]
    fn test_height_rounds_to_nearest() {
        let reference = Snapshot::new(1000, 1_000_000);
        // 2.6 blocks ahead rounds up, 2.4 rounds down
        assert_eq!(height_at(1_000_000 + 2600, 1.0, &reference).unwrap(), 1003);
        assert_eq!(height_at(1_000_000 + 2400, 1.0, &reference).unwrap(), 1002);
        assert_eq!(height_at(1_000_000 - 2600, 1.0, &reference).unwrap(), 997);
    }

    #[test]
    fn test_height_before_genesis() {
        let reference = Snapshot::new(10, 100_000);
        assert_eq!(height_at(0, 1.0, &reference), Err(GovError::InvalidTimestamp(0)));
    }

    #[test]
    fn test_extreme_inputs_are_errors() {
        let clock = ChainClock::default();
        assert!(matches!(
            clock.time_at(u64::MAX / 2, 157.58),
            Err(GovError::InvalidTimestamp(i64::MAX))
        ));
        assert!(matches!(clock.time_at(u64::MAX, 1e-3), Err(GovError::InvalidTimestamp(_))));

        let reference = Snapshot::new(10, 1_000);
        assert_eq!(
            height_at(i64::MIN, 157.58, &reference),
            Err(GovError::InvalidTimestamp(i64::MIN))
        );
        assert_eq!(
            height_at(i64::MAX, 1e-9, &reference),
            Err(GovError::InvalidTimestamp(i64::MAX))
        );

        // in range for the delta, but the sum runs past i64
        let late = Snapshot::new(1, i64::MAX - 1_000);
        assert!(matches!(time_at(1_000, 1.0, &late), Err(GovError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_anchor_round_trip() {
        let clock = ChainClock::default();
        assert_eq!(
            clock.height_at(MONTHLY_SUPERBLOCK_61.ms, DEFAULT_SECONDS_PER_BLOCK).unwrap(),
            MONTHLY_SUPERBLOCK_61.height
        );
        assert_eq!(
            clock.time_at(MONTHLY_SUPERBLOCK_61.height, DEFAULT_SECONDS_PER_BLOCK).unwrap(),
            MONTHLY_SUPERBLOCK_61.ms
        );
    }

    #[test]
    fn test_estimate_snapshot() {
        let clock = ChainClock::default();
        // 2024-08-01T22:01:00Z; the live tip was 2114623, about 500 blocks
        // behind the long-run average
        let snap = clock.estimate_snapshot(1_722_549_660_000).unwrap();
        assert_eq!(snap.height, 2_115_113);
        assert_eq!(snap.ms, 1_722_549_660_000);
    }

    proptest! {
        #[test]
        fn prop_time_height_round_trip(height in 1u64..10_000_000, rate in 1.0f64..1000.0) {
            let clock = ChainClock::default();
            let ms = clock.time_at(height, rate).unwrap();
            let back = clock.height_at(ms, rate).unwrap();
            prop_assert!(back.abs_diff(height) <= 1);
        }
    }
}
