//! Field deserializers that never reject a persisted value.
//!
//! Stored schedules come from an admin panel and may carry `null` or
//! wrongly typed fields. A bad field must only disable its own day or pause,
//! so these helpers keep such values in an unusable form instead of failing
//! the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string field. `null` becomes empty; other types keep their JSON text,
/// which no time or date parser accepts.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => {
            tracing::warn!(value = %other, "expected a string, keeping value as unusable");
            other.to_string()
        }
    })
}

/// A flag field. Anything but a JSON `true` reads as `false`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Null => false,
        other => {
            tracing::warn!(value = %other, "expected a boolean, reading as false");
            false
        }
    })
}

/// An optional entry. `null` or an entry of the wrong shape reads as absent.
pub fn entry<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(value) {
        Ok(entry) => Ok(Some(entry)),
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed entry");
            Ok(None)
        }
    }
}

/// A nested object that falls back to its default when `null` or malformed.
pub fn entry_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(entry(d)?.unwrap_or_default())
}

/// A list of entries. Elements of the wrong shape are dropped; a `null` or
/// non-array value reads as empty.
pub fn entries<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(d)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(value = %other, "expected a list, reading as empty");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed list entry");
                None
            }
        })
        .collect())
}
