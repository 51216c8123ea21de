//! Governance cycles: estimation, selection, and proposal drafting.
//!
//! - cycle: superblock/vote windows and last/lame-duck/upcoming classification
//! - select: pick the funding span out of a classified set
//! - proposal: payload JSON and the draft object that gets hashed

pub mod cycle;
pub mod proposal;
pub mod select;

pub use cycle::{CycleEstimator, CycleSet, CycleWindow};
pub use proposal::{draft_gobject, ProposalPayload};
pub use select::{select, Selection};
