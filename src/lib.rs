//! Dash governance object identity and superblock cycle estimation.
//!
//! - codec: compact-size lengths and the governance object hash preimage
//! - crypto: double SHA-256 ids in raw and display byte order
//! - chain: snapshots, per-network constants, height/time conversion
//! - governance: cycle windows, funding-span selection, proposal drafts
//! - cli: the `dashgov` binary's commands and config

pub mod chain;
pub mod cli;
pub mod codec;
pub mod crypto;
pub mod governance;
pub mod utils;

pub use utils::{GovError, Result};

#[cfg(test)]
mod tests;
