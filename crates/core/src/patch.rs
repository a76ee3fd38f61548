//! Helpers for partial-update (PATCH) payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field so that an explicit `null` is distinguishable
/// from an absent one.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>` field: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim an optional text field, mapping blank input to `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Trim a nullable patch field. Blank strings count as an explicit clear.
pub fn blank_to_clear(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(blank_to_none)
}
