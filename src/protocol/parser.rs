//! Frame parser
//!
//! Scans the stream buffer for one complete response frame.
//!
//! The scan never mutates the buffer until a terminator has been found, so
//! an `Incomplete` result leaves every byte in place for the next attempt
//! and a `Corrupt` result leaves the buffer exactly as it was.

use std::ops::Range;

use super::buffer::StreamBuffer;
use super::Block;

/// Result of one parse attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A whole frame was consumed from the buffer
    Complete(Vec<Block>),

    /// More bytes are needed before anything can be decided
    Incomplete,

    /// The buffered bytes can never form a valid frame
    Corrupt(String),
}

impl ParseOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, ParseOutcome::Complete(_))
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseOutcome::Incomplete)
    }
}

/// Try to cut one frame off the front of the buffer
pub fn parse_frame(buffer: &mut StreamBuffer) -> ParseOutcome {
    match scan(buffer.as_slice()) {
        Scan::Complete { consumed, blocks } => {
            let frame = buffer.take(consumed);
            ParseOutcome::Complete(blocks.into_iter().map(|r| frame.slice(r)).collect())
        }
        Scan::Incomplete => ParseOutcome::Incomplete,
        Scan::Corrupt(reason) => ParseOutcome::Corrupt(reason),
    }
}

// =============================================================================
// Scanning
// =============================================================================

enum Scan {
    Complete {
        consumed: usize,
        blocks: Vec<Range<usize>>,
    },
    Incomplete,
    Corrupt(String),
}

/// Walk `buf` from the start, recording block positions
fn scan(buf: &[u8]) -> Scan {
    let mut blocks: Vec<Range<usize>> = Vec::new();
    let mut pos = 0;

    loop {
        let Some(newline) = buf[pos..].iter().position(|&b| b == b'\n') else {
            return Scan::Incomplete;
        };
        let line = &buf[pos..pos + newline];
        pos += newline + 1;

        if is_blank(line) {
            if blocks.is_empty() {
                // Heartbeat with nothing before it
                continue;
            }
            return Scan::Complete {
                consumed: pos,
                blocks,
            };
        }

        let len = match parse_length(line) {
            Ok(len) => len,
            Err(reason) => return Scan::Corrupt(reason),
        };

        // Payload plus at least one trailer byte must already be here
        let Some(body_end) = pos.checked_add(len) else {
            return Scan::Corrupt(format!("block length {} overflows", len));
        };
        if buf.len() <= body_end {
            return Scan::Incomplete;
        }

        match buf[body_end] {
            b'\n' => {
                blocks.push(pos..body_end);
                pos = body_end + 1;
            }
            b'\r' => {
                let Some(&next) = buf.get(body_end + 1) else {
                    return Scan::Incomplete;
                };
                if next != b'\n' {
                    return Scan::Corrupt(format!(
                        "block of {} bytes not followed by a newline",
                        len
                    ));
                }
                blocks.push(pos..body_end);
                pos = body_end + 2;
            }
            _ => {
                return Scan::Corrupt(format!(
                    "block of {} bytes not followed by a newline",
                    len
                ))
            }
        }
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.is_empty() || line == b"\r"
}

/// Parse a block length header, tolerating a trailing carriage return
fn parse_length(line: &[u8]) -> Result<usize, String> {
    let digits = line.strip_suffix(b"\r").unwrap_or(line);

    if digits.first() == Some(&b'-') {
        return Err(format!(
            "negative block length {:?}",
            String::from_utf8_lossy(digits)
        ));
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(format!(
            "invalid block length {:?}",
            String::from_utf8_lossy(digits)
        ));
    }

    // Only ASCII digits remain, so the UTF-8 check cannot fail
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| format!("block length {:?} out of range", String::from_utf8_lossy(digits)))
}
