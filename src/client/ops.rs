//! Operation table
//!
//! Every store command is one `Operation`: its wire name, the response
//! shape it expects, and the decoder that turns the payload into a typed
//! result. The client methods are thin wrappers over these entries.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::error::{Result, SsdbError};
use crate::protocol::{Block, Request, Response, Status};

/// Payload handed to a decoder; `None` means the server said `not_found`
pub type Payload<'a> = Option<&'a [Block]>;

/// Turns a validated payload into a typed result
pub type Decoder<T> = fn(&str, Payload<'_>) -> Result<T>;

/// Expected layout of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `ok` followed by exactly this many blocks
    Exact(usize),

    /// `ok` followed by one block, or `not_found` for absence
    Optional,

    /// `ok` followed by an even number of blocks
    Pairs,

    /// `ok` followed by any number of blocks
    List,
}

impl Shape {
    fn accepts(&self, payload_len: usize) -> bool {
        match self {
            Shape::Exact(n) => payload_len == *n,
            Shape::Optional => payload_len == 1,
            Shape::Pairs => payload_len % 2 == 0,
            Shape::List => true,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Exact(n) => write!(f, "exactly {} payload blocks", n),
            Shape::Optional => f.write_str("one payload block or not_found"),
            Shape::Pairs => f.write_str("an even number of payload blocks"),
            Shape::List => f.write_str("any number of payload blocks"),
        }
    }
}

/// One store command and how to read its response
pub struct Operation<T> {
    name: &'static str,
    shape: Shape,
    decode: Decoder<T>,
}

impl<T> Operation<T> {
    pub const fn new(name: &'static str, shape: Shape, decode: Decoder<T>) -> Self {
        Self {
            name,
            shape,
            decode,
        }
    }

    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Start a request for this command
    pub fn request(&self) -> Request {
        Request::new(self.name)
    }

    /// Validate a response frame and decode it
    pub fn apply(&self, frame: Vec<Block>) -> Result<T> {
        let response = Response::from_blocks(frame)
            .ok_or_else(|| SsdbError::bad_response(self.name, "empty response"))?;
        let payload = self.check(&response)?;
        (self.decode)(self.name, payload)
    }

    /// Check status token and block count against the expected shape
    pub fn check<'a>(&self, response: &'a Response) -> Result<Payload<'a>> {
        match (&response.status, self.shape) {
            (Status::NotFound, Shape::Optional) => Ok(None),
            (Status::Ok, shape) => {
                if shape.accepts(response.payload.len()) {
                    Ok(Some(response.payload.as_slice()))
                } else {
                    Err(SsdbError::bad_response(
                        self.name,
                        format!(
                            "got {} payload blocks, expected {}",
                            response.payload.len(),
                            shape
                        ),
                    ))
                }
            }
            (status, _) => {
                let reason = match response.payload.first() {
                    Some(detail) => {
                        format!("status {}: {}", status, String::from_utf8_lossy(detail))
                    }
                    None => format!("status {}", status),
                };
                Err(SsdbError::bad_response(self.name, reason))
            }
        }
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

// =============================================================================
// Decoders
// =============================================================================

fn found<'a>(name: &str, payload: Payload<'a>) -> Result<&'a [Block]> {
    payload.ok_or_else(|| SsdbError::bad_response(name, "unexpected not_found"))
}

fn parse_int(name: &str, block: &[u8]) -> Result<i64> {
    std::str::from_utf8(block)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            SsdbError::bad_response(
                name,
                format!("expected integer, got {:?}", String::from_utf8_lossy(block)),
            )
        })
}

pub fn decode_unit(name: &str, payload: Payload<'_>) -> Result<()> {
    found(name, payload).map(|_| ())
}

pub fn decode_int(name: &str, payload: Payload<'_>) -> Result<i64> {
    parse_int(name, &found(name, payload)?[0])
}

pub fn decode_flag(name: &str, payload: Payload<'_>) -> Result<bool> {
    decode_int(name, payload).map(|n| n == 1)
}

pub fn decode_value(name: &str, payload: Payload<'_>) -> Result<Bytes> {
    Ok(found(name, payload)?[0].clone())
}

pub fn decode_optional_value(_name: &str, payload: Payload<'_>) -> Result<Option<Bytes>> {
    Ok(payload.map(|blocks| blocks[0].clone()))
}

pub fn decode_optional_int(name: &str, payload: Payload<'_>) -> Result<Option<i64>> {
    payload.map(|blocks| parse_int(name, &blocks[0])).transpose()
}

pub fn decode_list(name: &str, payload: Payload<'_>) -> Result<Vec<Bytes>> {
    Ok(found(name, payload)?.to_vec())
}

pub fn decode_pairs(name: &str, payload: Payload<'_>) -> Result<Vec<(Bytes, Bytes)>> {
    Ok(found(name, payload)?
        .chunks_exact(2)
        .map(|kv| (kv[0].clone(), kv[1].clone()))
        .collect())
}

pub fn decode_map(name: &str, payload: Payload<'_>) -> Result<HashMap<Bytes, Bytes>> {
    decode_pairs(name, payload).map(|pairs| pairs.into_iter().collect())
}

pub fn decode_scored(name: &str, payload: Payload<'_>) -> Result<Vec<(Bytes, i64)>> {
    found(name, payload)?
        .chunks_exact(2)
        .map(|es| -> Result<(Bytes, i64)> { Ok((es[0].clone(), parse_int(name, &es[1])?)) })
        .collect()
}

pub fn decode_scored_map(name: &str, payload: Payload<'_>) -> Result<HashMap<Bytes, i64>> {
    decode_scored(name, payload).map(|pairs| pairs.into_iter().collect())
}

// =============================================================================
// Key-Value
// =============================================================================

pub const SET: Operation<()> = Operation::new("set", Shape::Exact(1), decode_unit);
pub const SETX: Operation<()> = Operation::new("setx", Shape::Exact(1), decode_unit);
pub const SETNX: Operation<i64> = Operation::new("setnx", Shape::Exact(1), decode_int);
pub const GET: Operation<Option<Bytes>> =
    Operation::new("get", Shape::Optional, decode_optional_value);
pub const GETSET: Operation<Option<Bytes>> =
    Operation::new("getset", Shape::Optional, decode_optional_value);
pub const DEL: Operation<()> = Operation::new("del", Shape::Exact(1), decode_unit);
pub const INCR: Operation<i64> = Operation::new("incr", Shape::Exact(1), decode_int);
pub const DECR: Operation<i64> = Operation::new("decr", Shape::Exact(1), decode_int);
pub const MULTI_SET: Operation<()> = Operation::new("multi_set", Shape::Exact(1), decode_unit);
pub const MULTI_GET: Operation<HashMap<Bytes, Bytes>> =
    Operation::new("multi_get", Shape::Pairs, decode_map);
pub const MULTI_DEL: Operation<i64> = Operation::new("multi_del", Shape::Exact(1), decode_int);
pub const SCAN: Operation<Vec<(Bytes, Bytes)>> =
    Operation::new("scan", Shape::Pairs, decode_pairs);

// =============================================================================
// Hash Map
// =============================================================================

pub const HSET: Operation<()> = Operation::new("hset", Shape::Exact(1), decode_unit);
pub const HGET: Operation<Option<Bytes>> =
    Operation::new("hget", Shape::Optional, decode_optional_value);
pub const HDEL: Operation<()> = Operation::new("hdel", Shape::Exact(1), decode_unit);
pub const HINCR: Operation<i64> = Operation::new("hincr", Shape::Exact(1), decode_int);
pub const HDECR: Operation<i64> = Operation::new("hdecr", Shape::Exact(1), decode_int);
pub const HEXISTS: Operation<bool> = Operation::new("hexists", Shape::Exact(1), decode_flag);
pub const HSIZE: Operation<i64> = Operation::new("hsize", Shape::Exact(1), decode_int);
pub const HLIST: Operation<Vec<Bytes>> = Operation::new("hlist", Shape::List, decode_list);
pub const HKEYS: Operation<Vec<Bytes>> = Operation::new("hkeys", Shape::List, decode_list);
pub const HSCAN: Operation<Vec<(Bytes, Bytes)>> =
    Operation::new("hscan", Shape::Pairs, decode_pairs);
pub const HRSCAN: Operation<Vec<(Bytes, Bytes)>> =
    Operation::new("hrscan", Shape::Pairs, decode_pairs);
pub const HCLEAR: Operation<()> = Operation::new("hclear", Shape::Exact(1), decode_unit);
pub const MULTI_HSET: Operation<()> = Operation::new("multi_hset", Shape::Exact(1), decode_unit);
pub const MULTI_HGET: Operation<HashMap<Bytes, Bytes>> =
    Operation::new("multi_hget", Shape::Pairs, decode_map);
pub const MULTI_HDEL: Operation<()> = Operation::new("multi_hdel", Shape::Exact(1), decode_unit);

// =============================================================================
// Sorted Set
// =============================================================================

pub const ZSET: Operation<()> = Operation::new("zset", Shape::Exact(1), decode_unit);
pub const ZGET: Operation<Option<i64>> =
    Operation::new("zget", Shape::Optional, decode_optional_int);
pub const ZDEL: Operation<()> = Operation::new("zdel", Shape::Exact(1), decode_unit);
pub const ZINCR: Operation<i64> = Operation::new("zincr", Shape::Exact(1), decode_int);
pub const ZSIZE: Operation<i64> = Operation::new("zsize", Shape::Exact(1), decode_int);
pub const ZEXISTS: Operation<bool> = Operation::new("zexists", Shape::Exact(1), decode_flag);
pub const ZLIST: Operation<Vec<Bytes>> = Operation::new("zlist", Shape::List, decode_list);
pub const ZKEYS: Operation<Vec<Bytes>> = Operation::new("zkeys", Shape::List, decode_list);
pub const ZSCAN: Operation<Vec<(Bytes, i64)>> =
    Operation::new("zscan", Shape::Pairs, decode_scored);
pub const ZRSCAN: Operation<Vec<(Bytes, i64)>> =
    Operation::new("zrscan", Shape::Pairs, decode_scored);
pub const ZRANK: Operation<i64> = Operation::new("zrank", Shape::Exact(1), decode_int);
pub const ZRRANK: Operation<i64> = Operation::new("zrrank", Shape::Exact(1), decode_int);
pub const ZRANGE: Operation<Vec<(Bytes, i64)>> =
    Operation::new("zrange", Shape::Pairs, decode_scored);
pub const ZRRANGE: Operation<Vec<(Bytes, i64)>> =
    Operation::new("zrrange", Shape::Pairs, decode_scored);
pub const ZCLEAR: Operation<()> = Operation::new("zclear", Shape::Exact(1), decode_unit);
pub const MULTI_ZSET: Operation<()> = Operation::new("multi_zset", Shape::Exact(1), decode_unit);
pub const MULTI_ZGET: Operation<HashMap<Bytes, i64>> =
    Operation::new("multi_zget", Shape::Pairs, decode_scored_map);
pub const MULTI_ZDEL: Operation<()> = Operation::new("multi_zdel", Shape::Exact(1), decode_unit);

// =============================================================================
// Queue
// =============================================================================

pub const QSIZE: Operation<i64> = Operation::new("qsize", Shape::Exact(1), decode_int);
pub const QCLEAR: Operation<()> = Operation::new("qclear", Shape::Exact(1), decode_unit);
pub const QFRONT: Operation<Bytes> = Operation::new("qfront", Shape::Exact(1), decode_value);
pub const QBACK: Operation<Bytes> = Operation::new("qback", Shape::Exact(1), decode_value);
pub const QGET: Operation<Option<Bytes>> =
    Operation::new("qget", Shape::Optional, decode_optional_value);
pub const QSLICE: Operation<Vec<Bytes>> = Operation::new("qslice", Shape::List, decode_list);
pub const QPUSH_FRONT: Operation<()> =
    Operation::new("qpush_front", Shape::Exact(0), decode_unit);
pub const QPUSH_BACK: Operation<()> = Operation::new("qpush_back", Shape::Exact(0), decode_unit);
pub const QPOP_FRONT: Operation<Option<Bytes>> =
    Operation::new("qpop_front", Shape::Optional, decode_optional_value);
pub const QPOP_BACK: Operation<Option<Bytes>> =
    Operation::new("qpop_back", Shape::Optional, decode_optional_value);
