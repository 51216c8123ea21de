use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::chain::params::{NetworkParams, PROPOSAL_LEAD_MS};
use crate::chain::provider::RECENT_RATE_BLOCKS;

/// Settings read from a TOML file. Every key is optional; a `[network]`
/// table, when present, replaces the mainnet parameters entirely.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: String,
    pub proposal_lead_ms: i64,
    pub recent_rate_blocks: u64,
    pub network: NetworkParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            proposal_lead_ms: PROPOSAL_LEAD_MS,
            recent_rate_blocks: RECENT_RATE_BLOCKS,
            network: NetworkParams::mainnet(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(data)?;
        cfg.network.validate()?;
        anyhow::ensure!(cfg.proposal_lead_ms >= 0, "proposal_lead_ms must not be negative");
        anyhow::ensure!(cfg.recent_rate_blocks > 0, "recent_rate_blocks must be positive");
        Ok(cfg)
    }
}
