//! Double SHA-256 over a governance object preimage.
//!
//! The node prints hashes with `GetHex()`, which reverses the digest
//! bytes. Both orders are exposed from the single digest; callers choose
//! the one their consumer expects.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::codec::gobject::{self, GObject};
use crate::utils::Result;

/// A 256-bit digest primitive. `Sha256Primitive` is the only one the
/// network accepts; the trait exists so a failing provider surfaces as an
/// error instead of a different hash.
pub trait HashPrimitive {
    fn digest(&self, data: &[u8]) -> Result<[u8; 32]>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Primitive;

impl HashPrimitive for Sha256Primitive {
    fn digest(&self, data: &[u8]) -> Result<[u8; 32]> {
        Ok(sha256(data))
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest bytes in the order the hash function produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GObjectHash(pub [u8; 32]);

impl GObjectHash {
    /// Id as printed by the node (`gobject get <id>`): reversed bytes.
    pub fn display_id(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Id in digest order, as written into the collateral memo.
    pub fn raw_id(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for GObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_id())
    }
}

impl fmt::Debug for GObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GObjectHash({})", self.display_id())
    }
}

impl Serialize for GObjectHash {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&self.display_id())
    }
}

/// `sha256(sha256(bytes))`.
pub fn double_hash(bytes: &[u8]) -> GObjectHash {
    GObjectHash(sha256(&sha256(bytes)))
}

/// Double hash through an explicit primitive. Any failure is fatal: there
/// is no fallback algorithm.
pub fn double_hash_with<P: HashPrimitive>(primitive: &P, bytes: &[u8]) -> Result<GObjectHash> {
    let first = primitive.digest(bytes)?;
    let second = primitive.digest(&first)?;
    Ok(GObjectHash(second))
}

/// Encode `gobj` and hash its preimage.
pub fn gobject_hash(gobj: &GObject) -> GObjectHash {
    double_hash(&gobject::encode(gobj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GovError;

    struct UnavailablePrimitive(String);

    impl HashPrimitive for UnavailablePrimitive {
        fn digest(&self, _data: &[u8]) -> Result<[u8; 32]> {
            Err(GovError::PrimitiveUnavailable(self.0.clone()))
        }
    }

    #[test]
    fn test_double_hash_empty() {
        // sha256d("") is a well-known constant
        let h = double_hash(b"");
        assert_eq!(
            h.raw_id(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_eq!(
            h.display_id(),
            "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d"
        );
    }

    #[test]
    fn test_primitive_path_matches_direct() {
        let data = b"governance";
        let direct = double_hash(data);
        let via = double_hash_with(&Sha256Primitive, data).unwrap();
        assert_eq!(direct, via);
    }

    #[test]
    fn test_unavailable_primitive_is_fatal() {
        let res = double_hash_with(&UnavailablePrimitive("no sha256".into()), b"x");
        assert_eq!(res, Err(GovError::PrimitiveUnavailable("no sha256".into())));
    }

    #[test]
    fn test_display_uses_reversed_order() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        let h = GObjectHash(bytes);
        assert!(h.raw_id().starts_with("01"));
        assert!(h.display_id().ends_with("01"));
        assert_eq!(h.to_string(), h.display_id());
    }
}
