//! Crypto module: governance object hashing.

pub mod hash;

pub use hash::{double_hash, double_hash_with, gobject_hash, GObjectHash, HashPrimitive, Sha256Primitive};
