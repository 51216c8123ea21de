//! `dashgov` command line: estimate cycles, draft proposals, hash objects.

pub mod config;
pub mod render;

use anyhow::{anyhow, bail, ensure, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::chain::{measure_recent_rate, ChainClock, Snapshot, StaticChainData};
use crate::codec::{encode_gobject, layout, GObject};
use crate::crypto::gobject_hash;
use crate::governance::{draft_gobject, select, CycleEstimator, ProposalPayload};
use crate::utils::init_logging;
use config::Config;

/// Governance object hashing and superblock cycle estimates.
#[derive(Parser)]
#[command(name = "dashgov", version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Where "now" is on the chain. Without a height, the height is
/// extrapolated from the time with the network's default rate. With a
/// reference time, the rate is measured over the last `recent_rate_blocks`
/// blocks instead of since the network root.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Current best block height
    #[arg(long)]
    pub height: Option<u64>,

    /// Time of that block (RFC 3339); defaults to now
    #[arg(long)]
    pub time: Option<String>,

    /// Time of the block `recent_rate_blocks` below --height (RFC 3339)
    #[arg(long, requires = "height")]
    pub ref_time: Option<String>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Show the last, lame-duck, and upcoming governance cycles
    Estimate {
        /// Number of upcoming cycles
        cycles: usize,

        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Draft a proposal spanning one or more cycles and compute its id
    Draft {
        /// First cycle to be paid (0 = lame duck, 1 = next open cycle)
        start_period: usize,
        /// Number of consecutive payments
        num_periods: usize,
        /// Amount per payment
        amount: f64,
        url: String,
        name: String,
        payment_address: String,

        /// Drafting time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,

        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Show the hash preimage layout and ids of a governance object
    Hash {
        /// Hex text of the JSON payload
        payload_hex: String,

        /// Object time, seconds since epoch
        #[arg(long)]
        time: i64,

        #[arg(long, default_value_t = 1)]
        revision: i32,

        /// Parent hash, 32 bytes of hex in stored order
        #[arg(long)]
        parent: Option<String>,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(&cfg.log_level);

    match cli.cmd {
        Cmd::Estimate { cycles, snapshot } => {
            let (snap, rate) = resolve_snapshot(&snapshot, &cfg).await?;
            let estimator = CycleEstimator::new(&cfg.network);
            let set = estimator.estimate_cycles(cycles, &snap, rate, cfg.proposal_lead_ms)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                render::print_cycles(&set, rate, true);
            }
            Ok(())
        }
        Cmd::Draft {
            start_period,
            num_periods,
            amount,
            url,
            name,
            payment_address,
            now,
            snapshot,
        } => {
            ensure!(num_periods > 0, "num_periods must be at least 1");
            let end_period = start_period + num_periods - 1;
            let display_count = end_period.max(3);

            let (snap, rate) = resolve_snapshot(&snapshot, &cfg).await?;
            let estimator = CycleEstimator::new(&cfg.network);
            let set = estimator.estimate_cycles(display_count, &snap, rate, cfg.proposal_lead_ms)?;
            let selection = select(&set, start_period, end_period)
                .with_context(|| format!("selecting periods {start_period}..={end_period}"))?;

            let payload = ProposalPayload::from_selection(&selection, name, payment_address, amount, url);
            let now_ms = match now {
                Some(t) => parse_time(&t)?,
                None => Utc::now().timestamp_millis(),
            };
            let gobj = draft_gobject(now_ms, selection.start, &payload)?;
            let preimage = encode_gobject(&gobj);
            let hash = gobject_hash(&gobj);

            if cli.json {
                let out = serde_json::json!({
                    "seconds_per_block": rate,
                    "cycles": &set,
                    "selection": &selection,
                    "payload": &payload,
                    "gobject": &gobj,
                    "preimage": hex::encode(&preimage),
                    "raw_id": hash.raw_id(),
                    "display_id": hash.display_id(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("VOTING PERIODS");
            println!();
            render::print_cycles(&set, rate, false);
            render::print_selection(&selection, amount);
            println!();
            println!("Payload JSON:");
            println!("{}", payload.to_json()?);
            println!();
            println!(
                "gobject prepare 0 {} {} {}",
                gobj.revision, gobj.time, gobj.payload_hex
            );
            println!();
            println!("GObject preimage:");
            println!("{}", hex::encode(&preimage));
            println!();
            println!("GObject id for the collateral memo:");
            println!("{}", hash.raw_id());
            println!("GObject id for 'gobject get <id>':");
            println!("{}", hash.display_id());
            Ok(())
        }
        Cmd::Hash {
            payload_hex,
            time,
            revision,
            parent,
        } => {
            let mut gobj = GObject::new(time, payload_hex).with_revision(revision);
            if let Some(p) = parent {
                gobj = gobj.with_parent(parse_hash(&p)?);
            }
            let preimage = encode_gobject(&gobj);
            let hash = gobject_hash(&gobj);

            if cli.json {
                let out = serde_json::json!({
                    "gobject": &gobj,
                    "preimage": hex::encode(&preimage),
                    "raw_id": hash.raw_id(),
                    "display_id": hash.display_id(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            for (field, range) in layout(&gobj) {
                println!("{:>14} {}", field, hex::encode(&preimage[range]));
            }
            println!();
            println!("raw id:     {}", hash.raw_id());
            println!("display id: {}", hash.display_id());
            Ok(())
        }
    }
}

/// Snapshot and seconds-per-block for the command line arguments.
async fn resolve_snapshot(args: &SnapshotArgs, cfg: &Config) -> Result<(Snapshot, f64)> {
    let clock = ChainClock::new(&cfg.network);
    let ms = match &args.time {
        Some(t) => parse_time(t)?,
        None => Utc::now().timestamp_millis(),
    };

    let Some(height) = args.height else {
        ensure!(args.ref_time.is_none(), "--ref-time requires --height");
        let snap = clock.estimate_snapshot(ms)?;
        return Ok((snap, clock.default_seconds_per_block()));
    };

    let snap = Snapshot::new(height, ms);
    match &args.ref_time {
        Some(ref_time) => {
            let lookback = cfg.recent_rate_blocks;
            let ref_height = height
                .checked_sub(lookback)
                .filter(|h| *h > 0)
                .ok_or_else(|| anyhow!("--height {height} is not above recent_rate_blocks ({lookback})"))?;
            let chain = StaticChainData::new()
                .with_block(snap)
                .with_block(Snapshot::new(ref_height, parse_time(ref_time)?));
            let (best, rate) = measure_recent_rate(&chain, lookback).await?;
            Ok((best, rate))
        }
        None => {
            let rate = clock.seconds_per_block(&snap)?;
            Ok((snap, rate))
        }
    }
}

fn parse_time(s: &str) -> Result<i64> {
    let dt = DateTime::parse_from_rfc3339(s).with_context(|| format!("invalid time '{s}'"))?;
    Ok(dt.with_timezone(&Utc).timestamp_millis())
}

fn parse_hash(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s).with_context(|| format!("invalid hex '{s}'"))?;
    match <[u8; 32]>::try_from(bytes) {
        Ok(h) => Ok(h),
        Err(v) => bail!("parent hash must be 32 bytes, got {}", v.len()),
    }
}
