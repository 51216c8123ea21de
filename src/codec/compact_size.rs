//! Bitcoin-style "compact size" length prefix.
//!
//! One tag byte, then 0, 2, 4 or 8 little-endian width bytes:
//!
//! | value               | tag  | width |
//! |---------------------|------|-------|
//! | `0..=252`           | `n`  | 0     |
//! | `253..=0xffff`      | 253  | 2     |
//! | `..=0xffff_ffff`    | 254  | 4     |
//! | larger              | 255  | 8     |

use bytes::{Buf, BufMut};

use crate::utils::{GovError, Result};

/// Largest value stored directly in the tag byte.
pub const MAX_SINGLE_BYTE: u64 = 252;

/// Number of bytes after the tag byte needed to represent `n`.
pub fn size_of(n: u64) -> usize {
    if n <= MAX_SINGLE_BYTE {
        0
    } else if n <= u16::MAX as u64 {
        2
    } else if n <= u32::MAX as u64 {
        4
    } else {
        8
    }
}

/// Total encoded length, tag byte included.
pub fn encoded_len(n: u64) -> usize {
    1 + size_of(n)
}

/// Append the compact-size encoding of `n` to `buf`.
pub fn encode_into<B: BufMut>(buf: &mut B, n: u64) {
    match size_of(n) {
        0 => buf.put_u8(n as u8),
        2 => {
            buf.put_u8(253);
            buf.put_u16_le(n as u16);
        }
        4 => {
            buf.put_u8(254);
            buf.put_u32_le(n as u32);
        }
        _ => {
            buf.put_u8(255);
            buf.put_u64_le(n);
        }
    }
}

/// Encode `n` into a fresh buffer.
pub fn encode(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(n));
    encode_into(&mut out, n);
    out
}

/// Decode one compact size from the front of `buf`, advancing it.
///
/// Non-canonical encodings (a wide tag holding a value that would have fit
/// a narrower one) are accepted, matching the lenient legacy reader.
pub fn decode<B: Buf>(buf: &mut B) -> Result<u64> {
    ensure(buf, 1)?;
    let tag = buf.get_u8();
    let n = match tag {
        253 => {
            ensure(buf, 2)?;
            buf.get_u16_le() as u64
        }
        254 => {
            ensure(buf, 4)?;
            buf.get_u32_le() as u64
        }
        255 => {
            ensure(buf, 8)?;
            buf.get_u64_le()
        }
        small => small as u64,
    };
    Ok(n)
}

fn ensure<B: Buf>(buf: &B, needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(GovError::Truncated {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}
