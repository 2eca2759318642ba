//! Serde helpers for update payloads

use serde::{Deserialize, Deserializer};

/// Tell an absent field from an explicit `null`
///
/// Use with `#[serde(default)]`: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
