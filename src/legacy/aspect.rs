use serde_json::Value as JsonValue;

use crate::error::{ChartError, Result};

/// A single character aspect, e.g. `lockedRelationship|lover|<hero id>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aspect {
    pub title: String,
    pub data: Vec<String>,
    pub value: Option<f64>,
    pub is_legacy: bool,
    pub is_past: bool,
}

impl Aspect {
    /// Parse an aspect entry as stored in legacy JSON.
    ///
    /// Entries are `[aspect_string]`, `[aspect_string, value]` or
    /// `[aspect_string, {"aspect": aspect_string, "value": value}]`; the value
    /// may be a number, `null`, or missing.
    pub fn from_entry(entry: &JsonValue) -> Result<Self> {
        let items = entry
            .as_array()
            .ok_or_else(|| ChartError::Parse(format!("Aspect entry is not a list: {}", entry)))?;
        let aspect = items
            .first()
            .and_then(JsonValue::as_str)
            .ok_or_else(|| ChartError::Parse(format!("Aspect entry has no aspect string: {}", entry)))?;

        let value = match items.get(1) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Number(n)) => n.as_f64(),
            Some(JsonValue::Object(map)) => map.get("value").and_then(JsonValue::as_f64),
            Some(other) => {
                return Err(ChartError::Parse(format!(
                    "Unexpected aspect value for {}: {}",
                    aspect, other
                )))
            }
        };

        let mut parts = aspect.split('|');
        let title = parts.next().unwrap_or_default().to_string();
        let data = parts.map(str::to_string).collect();

        Ok(Self {
            title,
            data,
            value,
            is_legacy: false,
            is_past: false,
        })
    }

    pub fn same_as(&self, other: &Aspect) -> bool {
        self.title == other.title && self.data == other.data
    }

    pub fn data_at(&self, idx: usize) -> Option<&str> {
        self.data.get(idx).map(String::as_str)
    }
}
