//! Recorded lifecycle transcripts.
//!
//! A transcript is JSON lines, one event per line:
//!
//! ```text
//! {"event": "htmx:beforeSend", "xhr": {"status": 0}}
//! {"event": "htmx:beforeSwap", "xhr": {"status": 404, "responseText": "{\"error\":\"Not found\"}"}}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coordinator::{Coordinator, Reaction};
use crate::error::{FeedbackError, Result};
use crate::event::{EventDetail, LifecycleEvent};
use crate::progress::ProgressIndicator;
use crate::toast::ToastSink;
use crate::transaction::{Transaction, XhrSnapshot};

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// 1-based line the entry was read from.
    #[serde(skip)]
    pub line: usize,
    pub event: LifecycleEvent,
    #[serde(default)]
    pub xhr: XhrSnapshot,
}

/// Read a transcript file.
pub fn read_transcript(path: &Path) -> Result<Vec<TranscriptEntry>> {
    let file = File::open(path)?;
    parse_transcript(BufReader::new(file))
}

/// Parse transcript lines, failing on the first malformed one.
pub fn parse_transcript(mut reader: impl BufRead) -> Result<Vec<TranscriptEntry>> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        let line = std::str::from_utf8(&buf).map_err(|e| FeedbackError::Transcript {
            line: line_number,
            reason: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut entry: TranscriptEntry =
            serde_json::from_str(trimmed).map_err(|e| FeedbackError::Transcript {
                line: line_number,
                reason: e.to_string(),
            })?;
        entry.line = line_number;
        entries.push(entry);
    }
    Ok(entries)
}

/// What happened when one entry was replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub line: usize,
    pub event: LifecycleEvent,
    pub status: u16,
    pub reaction: Reaction,
    /// `should_swap` after the handler ran.
    pub should_swap: bool,
    /// Indicator state after the handler ran.
    pub progress_running: bool,
}

/// Feed one entry to the coordinator.
pub fn replay_entry<P, T>(coordinator: &mut Coordinator<P, T>, entry: &TranscriptEntry) -> ReplayStep
where
    P: ProgressIndicator,
    T: ToastSink,
{
    let mut detail = EventDetail::new(&entry.xhr);
    let reaction = coordinator.handle(entry.event, &mut detail);
    ReplayStep {
        line: entry.line,
        event: entry.event,
        status: entry.xhr.status(),
        reaction,
        should_swap: detail.should_swap,
        progress_running: coordinator.progress().is_started(),
    }
}

/// Feed every entry to the coordinator, in order.
pub fn replay<P, T>(coordinator: &mut Coordinator<P, T>, entries: &[TranscriptEntry]) -> Vec<ReplayStep>
where
    P: ProgressIndicator,
    T: ToastSink,
{
    entries
        .iter()
        .map(|entry| replay_entry(coordinator, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let input = "# recorded from /sessions\n\n{\"event\":\"beforeSend\"}\n";
        let entries = parse_transcript(input.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[0].event, LifecycleEvent::BeforeSend);
        assert_eq!(entries[0].xhr, XhrSnapshot::unsent());
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let input = "{\"event\":\"htmx:beforeSend\"}\n{\"event\":\"htmx:load\"}\n";
        let err = parse_transcript(input.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedbackError::Transcript { line: 2, .. }));
    }

    #[test]
    fn reports_line_of_invalid_utf8() {
        let input: &[u8] = b"{\"event\":\"beforeSend\"}\n{\"event\":\"before\xffSwap\"}\n";
        let err = parse_transcript(input).unwrap_err();
        assert!(matches!(err, FeedbackError::Transcript { line: 2, .. }));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let input = "{\"event\":\"beforeSend\"}\r\n{\"event\":\"afterRequest\"}";
        let entries = parse_transcript(input.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].line, 2);
        assert_eq!(entries[1].event, LifecycleEvent::AfterRequest);
    }
}
