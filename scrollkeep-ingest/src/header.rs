//! The asciicast header record.

use serde::Deserialize;
use serde_json::Value;

/// `{ version, width, height }`, normalized from whichever of the v1/v2/v3
/// header shapes the file carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version: u32,
    pub width: usize,
    pub height: usize,
}

/// Raw header shapes accepted on the wire. v3 (and v2) use flat
/// `width`/`height` keys; the legacy v1/v2 shape nests them under `term`.
/// Any other keys present in the JSON object are ignored.
#[derive(Debug, Deserialize)]
struct RawHeader {
    version: u32,
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    height: Option<usize>,
    #[serde(default)]
    term: Option<RawTerm>,
}

#[derive(Debug, Deserialize)]
struct RawTerm {
    #[serde(default)]
    cols: Option<usize>,
    #[serde(default)]
    rows: Option<usize>,
}

impl Header {
    /// Parse a header line, accepting either the flat `{width, height}`
    /// shape or the legacy `{"term": {"cols": W, "rows": H}}` shape seen in
    /// older recordings (full legacy shape is
    /// `{version, width, height, timestamp, title, env}` — only
    /// `version`/`width`/`height` matter here, everything else is ignored).
    pub fn parse(value: &Value) -> Option<Header> {
        let raw: RawHeader = serde_json::from_value(value.clone()).ok()?;
        let (width, height) = match (raw.width, raw.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                let term = raw.term?;
                (term.cols?, term.rows?)
            }
        };
        Some(Header {
            version: raw.version,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_v3_header() {
        let value = json!({"version": 3, "width": 80, "height": 24});
        let header = Header::parse(&value).unwrap();
        assert_eq!(header, Header { version: 3, width: 80, height: 24 });
    }

    #[test]
    fn normalizes_legacy_term_shape() {
        let value = json!({"version": 2, "term": {"cols": 100, "rows": 40}});
        let header = Header::parse(&value).unwrap();
        assert_eq!(header, Header { version: 2, width: 100, height: 40 });
    }

    #[test]
    fn extra_keys_are_ignored() {
        let value = json!({
            "version": 3, "width": 80, "height": 24,
            "timestamp": 1700000000, "title": "demo", "env": {"SHELL": "/bin/zsh"}
        });
        assert!(Header::parse(&value).is_some());
    }

    #[test]
    fn missing_dimensions_is_none() {
        let value = json!({"version": 3});
        assert!(Header::parse(&value).is_none());
    }
}
