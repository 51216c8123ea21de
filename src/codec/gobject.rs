//! Hash preimage of a governance object.
//!
//! This is the byte layout the node feeds into its hash writer when it
//! computes the collateral hash. It is *not* the full network
//! serialization: the masternode outpoint is always the null outpoint and
//! the signature is always empty.
//!
//! ```text
//! hash_parent          32   verbatim
//! revision              4   i32 LE
//! time                  8   i64 LE
//! len(payload_hex)    1-9   compact size
//! payload_hex           n   UTF-8 of the hex text
//! outpoint hash        32   zeros
//! outpoint index        4   0xffffffff
//! dummy byte            1   0x00
//! dummy index           4   0xffffffff
//! len(signature)        1   0x00
//! ```

use std::ops::Range;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::compact_size;
use crate::utils::serde_helpers::{as_hex, from_hex};

/// Index value of a null outpoint.
pub const NULL_OUTPOINT_INDEX: u32 = 0xffff_ffff;

/// Fixed bytes around the variable payload: 32 + 4 + 8 before it,
/// 32 + 4 + 1 + 4 + 1 after it.
const FIXED_LEN: usize = 32 + 4 + 8 + 32 + 4 + 1 + 4 + 1;

/// Governance object fields that contribute to its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GObject {
    #[serde(serialize_with = "as_hex", deserialize_with = "from_hex")]
    pub hash_parent: [u8; 32],
    pub revision: i32,
    /// Seconds since epoch.
    pub time: i64,
    /// Hex text of the JSON payload. The text itself is hashed, not the
    /// bytes it decodes to.
    pub payload_hex: String,
}

impl GObject {
    /// New top-level object: zero parent, revision 1.
    pub fn new(time: i64, payload_hex: impl Into<String>) -> Self {
        Self {
            hash_parent: [0u8; 32],
            revision: 1,
            time,
            payload_hex: payload_hex.into(),
        }
    }

    pub fn with_parent(mut self, hash_parent: [u8; 32]) -> Self {
        self.hash_parent = hash_parent;
        self
    }

    pub fn with_revision(mut self, revision: i32) -> Self {
        self.revision = revision;
        self
    }

    fn payload_len(&self) -> u64 {
        self.payload_hex.len() as u64
    }
}

/// Exact preimage length for `gobj`.
pub fn encoded_len(gobj: &GObject) -> usize {
    FIXED_LEN + compact_size::encoded_len(gobj.payload_len()) + gobj.payload_hex.len()
}

/// Build the hash preimage. The buffer is sized up front and never grows.
pub fn encode(gobj: &GObject) -> Bytes {
    let len = encoded_len(gobj);
    let mut buf = BytesMut::with_capacity(len);

    buf.put_slice(&gobj.hash_parent);
    buf.put_i32_le(gobj.revision);
    buf.put_i64_le(gobj.time);

    compact_size::encode_into(&mut buf, gobj.payload_len());
    buf.put_slice(gobj.payload_hex.as_bytes());

    // null masternode outpoint
    buf.put_bytes(0, 32);
    buf.put_u32_le(NULL_OUTPOINT_INDEX);

    // legacy dummy values, kept only so the hash matches older nodes
    buf.put_u8(0);
    buf.put_u32_le(NULL_OUTPOINT_INDEX);

    // empty signature
    compact_size::encode_into(&mut buf, 0);

    debug_assert_eq!(buf.len(), len);
    debug!(len, payload_len = gobj.payload_hex.len(), "encoded gobject preimage");
    buf.freeze()
}

/// Named byte ranges of the preimage, in order. Useful when a hash
/// disagrees with a node and the offending field has to be found.
pub fn layout(gobj: &GObject) -> Vec<(&'static str, Range<usize>)> {
    let header = compact_size::encoded_len(gobj.payload_len());
    let fields: [(&'static str, usize); 10] = [
        ("hash_parent", 32),
        ("revision", 4),
        ("time", 8),
        ("payload_len", header),
        ("payload_hex", gobj.payload_hex.len()),
        ("outpoint_hash", 32),
        ("outpoint_index", 4),
        ("dummy_byte", 1),
        ("dummy_index", 4),
        ("signature_len", 1),
    ];

    let mut offset = 0;
    fields
        .into_iter()
        .map(|(name, width)| {
            let range = offset..offset + width;
            offset += width;
            (name, range)
        })
        .collect()
}
