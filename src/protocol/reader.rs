//! Read loop
//!
//! Pulls bytes from a stream into the stream buffer until the parser
//! produces one frame.

use std::io::{self, ErrorKind, Read};

use super::buffer::StreamBuffer;
use super::parser::{parse_frame, ParseOutcome};
use super::Block;
use crate::error::{Result, SsdbError};

/// Read exactly one response frame
///
/// Blocks until a frame is complete, the stream ends, or a read fails.
/// End of stream is always an error: the protocol has no empty response.
pub fn read_frame<R: Read>(
    reader: &mut R,
    buffer: &mut StreamBuffer,
    chunk_size: usize,
) -> Result<Vec<Block>> {
    let mut chunk = vec![0u8; chunk_size.max(1)];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => {
                return Err(SsdbError::Io(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "connection closed while waiting for response",
                )))
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buffer.extend(&chunk[..n]);

        match parse_frame(buffer) {
            ParseOutcome::Complete(blocks) => {
                tracing::trace!(
                    blocks = blocks.len(),
                    leftover = buffer.len(),
                    "response frame complete"
                );
                return Ok(blocks);
            }
            ParseOutcome::Incomplete => {
                tracing::trace!(buffered = buffer.len(), "waiting for more response bytes");
            }
            ParseOutcome::Corrupt(reason) => return Err(SsdbError::CorruptFrame(reason)),
        }
    }
}
