//! The streaming NDJSON reader.

use crate::event::Event;
use crate::header::Header;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Failure opening the underlying file. Per-line parse errors are not
/// represented here — they're skipped silently (logged at `debug`), per
/// the ingester's non-fatal malformed-line contract.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open recording: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed record from the stream: the header (always first) or an
/// event.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Header(Header),
    Event(Event),
}

/// A lazy, forward-only sequence of [`Record`]s read from a `.cast` file.
///
/// Bounded memory: only the current line is buffered. Malformed lines
/// (invalid JSON, or a non-array after the header) are skipped silently.
/// The first non-empty line is always interpreted as the header, even if
/// it fails to parse as one — in that case iteration ends having yielded
/// nothing, since there is no header to anchor event indices to.
pub struct Reader {
    lines: Lines<BufReader<File>>,
    header_seen: bool,
}

impl Reader {
    /// Open a recording for streaming. Fails only on I/O error; the file
    /// is not fully read here.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Reader, IngestError> {
        let file = File::open(path)?;
        Ok(Reader {
            lines: BufReader::new(file).lines(),
            header_seen: false,
        })
    }
}

impl Iterator for Reader {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    log::debug!("ingest: I/O error mid-stream, stopping: {err}");
                    return None;
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let value: serde_json::Value = match serde_json::from_str(trimmed) {
                Ok(value) => value,
                Err(err) => {
                    log::debug!("ingest: skipping malformed line: {err}");
                    if !self.header_seen {
                        return None;
                    }
                    continue;
                }
            };

            if !self.header_seen {
                self.header_seen = true;
                return match Header::parse(&value) {
                    Some(header) => Some(Record::Header(header)),
                    None => {
                        log::debug!("ingest: first non-empty line is not a valid header");
                        None
                    }
                };
            }

            match Event::parse(&value) {
                Some(event) => return Some(Record::Event(event)),
                None => {
                    log::debug!("ingest: skipping malformed event line");
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_header_then_events_in_order() {
        let file = fixture(
            "{\"version\":3,\"width\":80,\"height\":24}\n\
             [0.1,\"o\",\"a\"]\n\
             [0.2,\"o\",\"b\"]\n",
        );
        let records: Vec<Record> = Reader::open(file.path()).unwrap().collect();
        assert_eq!(records.len(), 3);
        assert!(matches!(records[0], Record::Header(_)));
        assert!(matches!(records[1], Record::Event(_)));
        assert!(matches!(records[2], Record::Event(_)));
    }

    #[test]
    fn skips_blank_and_malformed_event_lines() {
        let file = fixture(
            "{\"version\":3,\"width\":80,\"height\":24}\n\
             \n\
             not json at all\n\
             [0.1,\"o\",\"a\"]\n\
             [\"bad\",\"shape\"]\n\
             [0.2,\"o\",\"b\"]\n",
        );
        let events: Vec<Record> = Reader::open(file.path())
            .unwrap()
            .filter(|r| matches!(r, Record::Event(_)))
            .collect();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn no_header_yields_empty_stream() {
        let file = fixture("not a header\n[0.1,\"o\",\"a\"]\n");
        let records: Vec<Record> = Reader::open(file.path()).unwrap().collect();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Reader::open("/nonexistent/path/does-not-exist.cast");
        assert!(matches!(result, Err(IngestError::Io(_))));
    }

    #[test]
    fn normalizes_legacy_header_mid_stream() {
        let file = fixture(
            "{\"version\":2,\"term\":{\"cols\":100,\"rows\":40}}\n\
             [0.1,\"o\",\"a\"]\n",
        );
        let mut reader = Reader::open(file.path()).unwrap();
        match reader.next().unwrap() {
            Record::Header(h) => assert_eq!((h.width, h.height), (100, 40)),
            _ => panic!("expected header"),
        }
    }
}
