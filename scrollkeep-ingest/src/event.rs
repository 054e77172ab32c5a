//! The asciicast event record: `[relative_time, kind, data]`.

use serde_json::Value;

/// An event line. `relative_time` is seconds since the prior event, not
/// wall-clock time. `kind` is usually `"o"` (output), `"i"` (input), `"m"`
/// (marker), or `"r"` (resize); the ingester doesn't special-case any of
/// them — that belongs to consumers such as the section detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub relative_time: f64,
    pub kind: String,
    pub data: String,
}

impl Event {
    /// Parse a `[time, kind, data]` JSON array. Anything else — a
    /// non-array, wrong arity, or non-string `kind`/`data` — is malformed
    /// and yields `None`; the caller skips the line.
    pub fn parse(value: &Value) -> Option<Event> {
        let arr = value.as_array()?;
        if arr.len() != 3 {
            return None;
        }
        let relative_time = arr[0].as_f64()?;
        let kind = arr[1].as_str()?.to_string();
        let data = arr[2].as_str()?.to_string();
        Some(Event { relative_time, kind, data })
    }

    pub fn is_output(&self) -> bool {
        self.kind == "o"
    }

    pub fn is_marker(&self) -> bool {
        self.kind == "m"
    }

    pub fn is_resize(&self) -> bool {
        self.kind == "r"
    }
}
