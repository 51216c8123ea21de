use serde::{Deserialize, Serialize};

use crate::utils::{GovError, Result};

/// A block height paired with its block time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub height: u64,
    /// Milliseconds since epoch.
    pub ms: i64,
}

impl Snapshot {
    pub const fn new(height: u64, ms: i64) -> Self {
        Self { height, ms }
    }

    /// Reject snapshots with an unset field. Zero is how an unknown height
    /// or time arrives from callers, and it must never be used as data.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 {
            return Err(GovError::IncompleteSnapshot("height"));
        }
        if self.ms == 0 {
            return Err(GovError::IncompleteSnapshot("time"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Snapshot::new(1, 1).validate().is_ok());
        assert_eq!(
            Snapshot::new(0, 1).validate(),
            Err(GovError::IncompleteSnapshot("height"))
        );
        assert_eq!(
            Snapshot::new(1, 0).validate(),
            Err(GovError::IncompleteSnapshot("time"))
        );
    }
}
