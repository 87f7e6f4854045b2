//! Frame writer
//!
//! Serializes a block list into one request frame.
//!
//! ```text
//! <len>\n<bytes>\n  <len>\n<bytes>\n  ...  \n
//! └── block 0 ──┘   └── block 1 ──┘       └ terminator
//! ```

use std::io::Write;

use bytes::{BufMut, BytesMut};

use super::Block;
use crate::error::Result;

/// Encode blocks into a complete request frame
pub fn encode_frame(blocks: &[Block]) -> BytesMut {
    // Each block costs at most 20 digits + 2 newlines on top of its payload
    let capacity = blocks.iter().map(|b| b.len() + 22).sum::<usize>() + 1;
    let mut frame = BytesMut::with_capacity(capacity);

    for block in blocks {
        frame.put_slice(block.len().to_string().as_bytes());
        frame.put_u8(b'\n');
        frame.put_slice(block);
        frame.put_u8(b'\n');
    }
    frame.put_u8(b'\n');

    frame
}

/// Write a complete request frame to a stream
///
/// The frame is fully built before the write so a request is never
/// half-sent because of an encoding problem.
pub fn write_frame<W: Write>(writer: &mut W, blocks: &[Block]) -> Result<()> {
    let frame = encode_frame(blocks);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}
