//! Game log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::Attributes;

/// Author used for server-generated log entries.
pub const SYSTEM_AUTHOR: &str = "System";

/// A single entry in a session's game log.
///
/// The payload fields (`author`, `text`, dice rolls, ...) come from the
/// client as-is; only `timestamp` is assigned by the server. Entries are
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMessage {
    #[serde(flatten)]
    fields: Attributes,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl GameMessage {
    /// Stamp a client payload with the server receipt time. Any
    /// client-supplied `timestamp` is discarded.
    pub fn stamp(fields: Attributes, now: DateTime<Utc>) -> Self {
        Self {
            fields: fields.without(&["timestamp"]),
            timestamp: now,
        }
    }

    /// A server-authored entry.
    pub fn system(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut fields = Attributes::new();
        fields.insert("author", Value::String(SYSTEM_AUTHOR.to_string()));
        fields.insert("text", Value::String(text.into()));
        Self::stamp(fields, now)
    }

    pub fn author(&self) -> Option<&str> {
        self.fields.get_str("author")
    }

    pub fn text(&self) -> Option<&str> {
        self.fields.get_str("text")
    }

    pub fn fields(&self) -> &Attributes {
        &self.fields
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
