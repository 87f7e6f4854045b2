//! Request definitions
//!
//! A command name followed by its arguments, in send order.

use bytes::BytesMut;

use super::value::{encode_values, Value};
use super::writer::encode_frame;
use super::Block;
use crate::error::Result;

/// A request to send to the server
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Command name (first block on the wire)
    name: String,

    /// Arguments following the command name
    args: Vec<Value>,
}

impl Request {
    /// Start a request for the given command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several arguments
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Get the command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the argument count (the command name excluded)
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Encode command name and arguments into blocks
    pub fn to_blocks(&self) -> Result<Vec<Block>> {
        let mut blocks = Vec::with_capacity(self.args.len() + 1);
        blocks.push(Value::from(self.name.as_str()).encode()?);
        blocks.extend(encode_values(&self.args)?);
        Ok(blocks)
    }

    /// Encode the whole request frame
    pub fn encode(&self) -> Result<BytesMut> {
        Ok(encode_frame(&self.to_blocks()?))
    }
}
