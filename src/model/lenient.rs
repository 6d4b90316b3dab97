//! Forgiving field readers.
//!
//! Project files are hand-edited and imported from older exports, so scalar
//! fields accept the loose shapes those files contain instead of failing the
//! whole document.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn clean_number(s: &str) -> String {
    s.trim().trim_start_matches('$').replace(',', "")
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => clean_number(s).parse().ok(),
        _ => None,
    };
    number.filter(|f: &f64| f.is_finite())
}

/// Integers are taken exactly; anything else goes through `f64`.
fn as_whole(value: &Value) -> Option<u64> {
    let exact = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => clean_number(s).parse().ok(),
        _ => None,
    };
    exact.or_else(|| as_number(value).map(|f| f.max(0.0).round() as u64))
}

/// Non-negative integer; floats are rounded, negatives and junk become 0.
pub fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_whole(&value).unwrap_or_default())
}

/// Integer percentage clamped to 0..=100.
pub fn percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .map(|f| f.clamp(0.0, 100.0).round() as u8)
        .unwrap_or_default())
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|f| *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f.round() as u32))
}

/// Free text; `null` reads as empty and scalars are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "1" | "done" | "completed"
        ),
        _ => false,
    })
}

/// List of strings; a single comma-separated string is split.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => split_list(&s),
        _ => Vec::new(),
    })
}

pub fn string_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?.into_iter().collect())
}

/// Optional text; `null` is `None` and scalars are stringified.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Nested records. A field that is not an array reads as empty, and entries
/// that are not records are dropped with a warning.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(value = %other, "expected a list of records, reading as empty");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed record");
                None
            }
        })
        .collect())
}

/// Split a comma-separated list, trimming and dropping empty entries.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
