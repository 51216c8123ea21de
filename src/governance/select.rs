use serde::Serialize;

use crate::governance::cycle::{CycleSet, CycleWindow};
use crate::utils::{GovError, Result};

/// First and last cycle of a multi-cycle funding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection<'a> {
    pub start_index: usize,
    pub end_index: usize,
    pub start: &'a CycleWindow,
    pub end: &'a CycleWindow,
}

impl Selection<'_> {
    /// Number of payments the selection spans.
    pub fn cycle_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Pick the inclusive span `start_index..=end_index`, where 0 is the lame
/// duck (when there is one) and 1.. index the upcoming cycles.
pub fn select(set: &CycleSet, start_index: usize, end_index: usize) -> Result<Selection<'_>> {
    if start_index > end_index {
        return Err(GovError::IndexOutOfRange {
            index: start_index as i64,
            available: end_index,
        });
    }
    let end = set.candidate(end_index).ok_or(GovError::IndexOutOfRange {
        index: end_index as i64,
        available: set.upcoming.len(),
    })?;
    let start = set.candidate(start_index).ok_or(GovError::IndexOutOfRange {
        index: start_index as i64,
        available: set.upcoming.len(),
    })?;

    Ok(Selection {
        start_index,
        end_index,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::params::{DEFAULT_SECONDS_PER_BLOCK, PROPOSAL_LEAD_MS};
    use crate::chain::snapshot::Snapshot;
    use crate::governance::cycle::CycleEstimator;

    fn cycles(height: u64, count: usize) -> CycleSet {
        let snap = Snapshot::new(height, 1_722_549_660_000);
        CycleEstimator::default()
            .estimate_cycles(count, &snap, DEFAULT_SECONDS_PER_BLOCK, PROPOSAL_LEAD_MS)
            .unwrap()
    }

    #[test]
    fn test_select_span() {
        let set = cycles(2_114_623, 3);
        let sel = select(&set, 1, 3).unwrap();
        assert_eq!(sel.start.superblock_height, 2_126_848);
        assert_eq!(sel.end.superblock_height, 2_160_080);
        assert_eq!(sel.cycle_count(), 3);
    }

    #[test]
    fn test_select_single() {
        let set = cycles(2_114_623, 3);
        let sel = select(&set, 2, 2).unwrap();
        assert_eq!(sel.start, sel.end);
        assert_eq!(sel.cycle_count(), 1);
    }

    #[test]
    fn test_end_out_of_range() {
        let set = cycles(2_114_623, 3);
        assert_eq!(
            select(&set, 1, 4),
            Err(GovError::IndexOutOfRange { index: 4, available: 3 })
        );
    }

    #[test]
    fn test_inverted_range() {
        let set = cycles(2_114_623, 3);
        assert!(matches!(select(&set, 3, 1), Err(GovError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_lameduck_index() {
        // 100 blocks before the vote deadline of superblock 2126848
        let set = cycles(2_126_848 - 1662 - 100, 2);
        assert!(set.lameduck.is_some());
        let sel = select(&set, 0, 1).unwrap();
        assert_eq!(sel.start.superblock_height, 2_126_848);
        assert_eq!(sel.end.superblock_height, 2_143_464);

        // no lame duck means index 0 is not selectable
        let set = cycles(2_114_623, 2);
        assert!(matches!(select(&set, 0, 1), Err(GovError::IndexOutOfRange { index: 0, .. })));
    }
}
