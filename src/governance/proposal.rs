//! Proposal payload and draft governance object.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::gobject::GObject;
use crate::governance::cycle::CycleWindow;
use crate::governance::select::Selection;
use crate::utils::serde_helpers::amount_as_number;
use crate::utils::{GovError, Result};

/// Governance object type for proposals.
pub const PROPOSAL_TYPE: u32 = 1;

/// Proposal JSON. Fields are declared in lexicographic key order so the
/// serialized text is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalPayload {
    /// Seconds since epoch.
    pub end_epoch: i64,
    pub name: String,
    pub payment_address: String,
    /// Whole or fractional coins per payment.
    #[serde(serialize_with = "amount_as_number")]
    pub payment_amount: f64,
    /// Seconds since epoch.
    pub start_epoch: i64,
    #[serde(rename = "type")]
    pub kind: u32,
    pub url: String,
}

impl ProposalPayload {
    /// Payload covering `selection`: from the start of its first cycle's
    /// proposal period to the end of its last.
    pub fn from_selection(
        selection: &Selection<'_>,
        name: impl Into<String>,
        payment_address: impl Into<String>,
        payment_amount: f64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            end_epoch: selection.end.end_ms.div_euclid(1000),
            name: name.into(),
            payment_address: payment_address.into(),
            payment_amount,
            start_epoch: selection.start.start_ms.div_euclid(1000),
            kind: PROPOSAL_TYPE,
            url: url.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GovError::Encoding(e.to_string()))
    }

    /// Hex of the JSON text, the form the node stores and hashes.
    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_json()?))
    }
}

/// Draft a top-level proposal object. Its time is the start of the
/// proposal period, or `now_ms` if that start is still in the future,
/// since nodes reject objects timed ahead of their clock.
pub fn draft_gobject(now_ms: i64, start: &CycleWindow, payload: &ProposalPayload) -> Result<GObject> {
    let time = now_ms.min(start.start_ms).div_euclid(1000);
    let gobj = GObject::new(time, payload.to_hex()?);
    info!(time, name = %payload.name, "drafted proposal gobject");
    Ok(gobj)
}
