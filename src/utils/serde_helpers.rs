use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Deserialize any JSON integer into an `i128`.
///
/// The daemon reports storage counters as unsigned 64-bit values (including
/// `u64::MAX` when unknown), which do not fit an `i64`; negative values still
/// need to survive decoding so the checks can flag them.
pub fn wide_integer<'de, D>(d: D) -> Result<i128, D::Error>
where
    D: Deserializer<'de>,
{
    let n = Number::deserialize(d)?;
    if let Some(u) = n.as_u64() {
        Ok(i128::from(u))
    } else if let Some(i) = n.as_i64() {
        Ok(i128::from(i))
    } else {
        Err(D::Error::custom(format!("expected an integer, got {n}")))
    }
}
