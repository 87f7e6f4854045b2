//! Protocol Module
//!
//! Defines the wire protocol spoken between client and server.
//!
//! ## Block Format
//! ```text
//! ┌──────────────────┬────┬────────────────────┬────┐
//! │ decimal length   │ \n │    raw bytes       │ \n │
//! └──────────────────┴────┴────────────────────┴────┘
//! ```
//!
//! ## Frame Format
//! A frame is one or more blocks followed by a blank line. Requests start
//! with the command name; responses start with a status token.
//! ```text
//! 3\nset\n3\nfoo\n3\nbar\n\n      request  ["set", "foo", "bar"]
//! 2\nok\n1\n1\n\n                 response ["ok", "1"]
//! ```
//!
//! Responses may use `\r\n` in place of `\n`. A blank line arriving before
//! any block is a heartbeat and is skipped.
//!
//! ### Status Tokens
//! - ok
//! - not_found
//! - error
//! - client_error
//! - fail

mod value;
mod request;
mod writer;
mod buffer;
mod parser;
mod reader;
mod response;

use bytes::Bytes;

/// One length-prefixed byte string; carries no type of its own
pub type Block = Bytes;

/// Initial capacity of a connection's stream buffer
pub const DEFAULT_BUFFER_CAPACITY: usize = 16 * 1024;

pub use value::{encode_values, Value};
pub use request::Request;
pub use writer::{encode_frame, write_frame};
pub use buffer::StreamBuffer;
pub use parser::{parse_frame, ParseOutcome};
pub use reader::read_frame;
pub use response::{Response, Status};
