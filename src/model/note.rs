use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::{now_timestamp, Timestamp};
use super::id::{generate_id, IdKind};
use super::lenient;

/// A timestamped comment attached to a project or subtask.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    pub timestamp: Option<Timestamp>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            timestamp: Some(now_timestamp().into()),
            id: Some(generate_id(IdKind::Note)),
            extra: Map::new(),
        }
    }
}
