use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize a 32-byte hash as a hex string, bytes in stored order
pub fn as_hex<S>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&hex::encode(bytes))
}

/// Deserialize a hex string into a 32-byte hash
pub fn from_hex<'de, D>(d: D) -> Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    let bytes = hex::decode(&s).map_err(D::Error::custom)?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| D::Error::custom(format!("expected 32 bytes, got {}", v.len())))
}

/// Serialize an amount as a JSON integer when it has no fractional part,
/// so `100.0` is written `100` rather than `100.0`.
pub fn amount_as_number<S>(amount: &f64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if amount.fract() == 0.0 && amount.abs() < 9_007_199_254_740_992.0 {
        s.serialize_i64(*amount as i64)
    } else {
        s.serialize_f64(*amount)
    }
}
