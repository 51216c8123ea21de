//! Crate-level tests.
//!
//! - Governance object ids against known node vectors
//! - Cycle estimates and proposal drafting against recorded mainnet values

mod gobject_hash;
