//! Response definitions
//!
//! Splits a decoded frame into its status token and payload blocks.

use bytes::Bytes;

use super::Block;

/// Status token carried in the first block of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
    ClientError,
    Fail,
    /// Any token this client does not know
    Other(Bytes),
}

impl Status {
    /// Interpret a status block
    pub fn from_block(block: &[u8]) -> Self {
        match block {
            b"ok" => Status::Ok,
            b"not_found" => Status::NotFound,
            b"error" => Status::Error,
            b"client_error" => Status::ClientError,
            b"fail" => Status::Fail,
            other => Status::Other(Bytes::copy_from_slice(other)),
        }
    }

    /// The token as it appears on the wire
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Status::Ok => b"ok",
            Status::NotFound => b"not_found",
            Status::Error => b"error",
            Status::ClientError => b"client_error",
            Status::Fail => b"fail",
            Status::Other(token) => &token[..],
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

/// A response frame split into status and payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status token from block 0
    pub status: Status,

    /// Remaining blocks
    pub payload: Vec<Block>,
}

impl Response {
    /// Split a frame into status and payload
    ///
    /// Returns `None` for an empty block list, which the parser never
    /// produces but a hand-built frame might.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Option<Self> {
        if blocks.is_empty() {
            return None;
        }
        let payload = blocks.split_off(1);
        let status = Status::from_block(&blocks[0]);
        Some(Self { status, payload })
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
