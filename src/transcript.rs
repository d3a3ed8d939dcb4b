//! # Transcript Module
//!
//! Derives a context-window estimate from the tail of a session transcript (JSONL).
//!
//! Only the last few records are inspected, most recent first. The first record that
//! carries a usable signal wins:
//! - an `assistant` record whose `message.usage` reports a positive token total, or
//! - a `system_message` record with a "context left" / "context low" warning.
//!
//! Scanning never fails: unreadable files, undecodable bytes and malformed lines all
//! degrade to "no estimate".

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::models::{ContextEstimate, ContextWarning, TranscriptLine};

/// Assumed context-window size when no override is configured. Matches the current
/// Claude model family; update if the models' window changes.
pub const DEFAULT_CONTEXT_LIMIT: u64 = 200_000;

/// Number of trailing transcript lines inspected by default
pub const DEFAULT_TAIL_LINES: usize = 15;

/// Transcripts are read backward from the end in chunks of this size
const TAIL_CHUNK_BYTES: u64 = 64 * 1024;

// Context warning message patterns
static CONTEXT_AUTO_COMPACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Context left until auto-compact: (\d+)%").unwrap());

static CONTEXT_LOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Context low \((\d+)% remaining\)").unwrap());

/// Outcome of a scan, kept for `--debug` reporting.
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    pub estimate: Option<ContextEstimate>,
    /// Lines looked at before a match (or the whole tail)
    pub lines_scanned: usize,
    /// Lines in the tail that were not valid JSON records
    pub lines_skipped: usize,
    /// Bytes read from the end of the transcript file
    pub bytes_read: u64,
}

/// Scan the transcript at `transcript_path` for a context estimate.
pub fn scan_transcript(
    transcript_path: &str,
    context_limit: u64,
    tail_lines: usize,
) -> Option<ContextEstimate> {
    scan_transcript_report(transcript_path, context_limit, tail_lines).estimate
}

/// Same as [`scan_transcript`], also reporting how much of the tail was read.
pub fn scan_transcript_report(
    transcript_path: &str,
    context_limit: u64,
    tail_lines: usize,
) -> ScanReport {
    if transcript_path.is_empty() {
        return ScanReport::default();
    }
    let path = Path::new(transcript_path);
    if !path.is_file() {
        return ScanReport::default();
    }
    // Not found, permission denied, etc. all mean "no estimate"
    let bytes = match read_tail(path, tail_lines) {
        Ok(b) => b,
        Err(_) => return ScanReport::default(),
    };
    let text = String::from_utf8_lossy(&bytes);
    let mut report = scan_lines(&text, context_limit, tail_lines);
    report.bytes_read = bytes.len() as u64;
    report
}

/// Read whole lines from the end of the file until at least `tail_lines` of them are
/// held, so only the tail of a long transcript is ever loaded. A line cut off at the
/// start of the read window is dropped.
fn read_tail(path: &Path, tail_lines: usize) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut pos = file.metadata()?.len();
    let mut tail: Vec<u8> = Vec::new();
    let mut newlines = 0usize;

    // One newline more than lines wanted: the last line's terminator may be among them
    while pos > 0 && newlines <= tail_lines {
        let step = TAIL_CHUNK_BYTES.min(pos);
        pos -= step;
        file.seek(SeekFrom::Start(pos))?;
        let mut chunk = vec![0u8; step as usize];
        file.read_exact(&mut chunk)?;
        newlines += chunk.iter().filter(|b| **b == b'\n').count();
        chunk.extend_from_slice(&tail);
        tail = chunk;
    }

    if pos > 0 {
        if let Some(i) = tail.iter().position(|b| *b == b'\n') {
            tail.drain(..=i);
        }
    }
    Ok(tail)
}

/// Scan already-loaded transcript text. Exposed for callers that hold the
/// transcript in memory.
pub fn scan_lines(text: &str, context_limit: u64, tail_lines: usize) -> ScanReport {
    let mut report = ScanReport::default();
    for line in text.lines().rev().take(tail_lines) {
        report.lines_scanned += 1;
        let t = line.trim();
        let parsed = match serde_json::from_str::<TranscriptLine>(t) {
            Ok(p) => p,
            Err(_) => {
                report.lines_skipped += 1;
                continue;
            }
        };
        if let Some(estimate) = estimate_from_record(&parsed, context_limit) {
            report.estimate = Some(estimate);
            break;
        }
    }
    report
}

fn estimate_from_record(record: &TranscriptLine, context_limit: u64) -> Option<ContextEstimate> {
    match record.r#type.as_deref() {
        Some("assistant") => {
            let usage = record.message.as_ref()?.usage.as_ref()?;
            let total = usage.context_tokens();
            if total > 0 {
                Some(ContextEstimate::from_usage(total, context_limit))
            } else {
                None
            }
        }
        Some("system_message") => {
            let content = record.content.as_ref()?.as_str()?;
            parse_context_warning(content)
        }
        _ => None,
    }
}

/// Parse a host warning such as "Context left until auto-compact: 12%" or
/// "Context low (8% remaining)".
pub fn parse_context_warning(content: &str) -> Option<ContextEstimate> {
    if let Some(caps) = CONTEXT_AUTO_COMPACT_RE.captures(content) {
        let percent_left = caps[1].parse::<u64>().ok()?;
        return Some(ContextEstimate::from_warning(
            percent_left,
            ContextWarning::AutoCompact,
        ));
    }
    let caps = CONTEXT_LOW_RE.captures(content)?;
    let percent_left = caps[1].parse::<u64>().ok()?;
    Some(ContextEstimate::from_warning(percent_left, ContextWarning::Low))
}
