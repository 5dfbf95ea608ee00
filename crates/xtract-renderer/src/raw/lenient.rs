//! Field deserializers that drop malformed parts of an article body instead
//! of rejecting the whole post.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A list whose malformed elements are skipped. Anything other than a list
/// reads as empty.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(element).collect(),
        Value::Null => Vec::new(),
        _ => {
            tracing::debug!("expected a list, ignoring the field");
            Vec::new()
        }
    })
}

/// An optional value that reads as `None` when malformed.
pub(crate) fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => element(value),
    })
}

pub(crate) fn element<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::debug!(%error, "skipping malformed element");
            None
        }
    }
}
