//! Access to the content backend: query building, execution, and decoding

mod client;
mod query;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use client::{CmsClient, ContentSource};
pub use query::{Filter, GroqQuery, Ordering, Slice};

use crate::error::Result;

/// Run a list query and decode each document.
///
/// A `null` result is an empty list. Documents that fail to decode are
/// skipped with a warning instead of failing the whole list.
pub async fn fetch_list<T: DeserializeOwned>(
    source: &dyn ContentSource,
    query: &GroqQuery,
    max_staleness: Duration,
) -> Result<Vec<T>> {
    let result = source.fetch(query, max_staleness).await?;
    let items = match result.as_ref() {
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        other => std::slice::from_ref(other),
    };

    Ok(items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable document");
                None
            }
        })
        .collect())
}

/// Run a single-document query; `null` means no match.
pub async fn fetch_one<T: DeserializeOwned>(
    source: &dyn ContentSource,
    query: &GroqQuery,
    max_staleness: Duration,
) -> Result<Option<T>> {
    let result = source.fetch(query, max_staleness).await?;
    match result.as_ref() {
        Value::Null => Ok(None),
        doc => Ok(Some(T::deserialize(doc)?)),
    }
}
