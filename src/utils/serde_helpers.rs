//! Serde helpers for records written by other clients of the data store.

use serde::{Deserialize, Deserializer};

/// Reads `null` the same as a missing field.
///
/// Older records carry `"likedBy": null` or `"tags": null`; combine with
/// `#[serde(default)]` so the field may also be absent.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a counter that other clients may have driven below zero.
///
/// Negative values become 0, `null` reads as 0 and anything past `u32::MAX`
/// saturates.
pub fn clamped_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}
