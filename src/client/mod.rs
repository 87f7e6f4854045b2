//! Client Module
//!
//! Typed access to every store command.
//!
//! Each method builds the command's arguments and hands them to the
//! matching entry in [`ops`], which owns the response validation. A bad
//! response shape is reported as [`SsdbError::BadResponse`] and leaves the
//! connection usable; I/O and framing errors poison it.

pub mod ops;

use std::collections::HashMap;

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::{Result, SsdbError};
use crate::network::Connection;
use crate::protocol::{Block, Request, Value};
use self::ops::Operation;

/// Blocking client over a single connection
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Connect to `host:port` with default settings
    pub fn connect(host: impl Into<String>, port: u16) -> Result<Self> {
        let config = ClientConfig::builder().host(host).port(port).build()?;
        Self::with_config(&config)
    }

    /// Connect using a full configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(config)?,
        })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection
    pub fn close(self) -> Result<()> {
        self.conn.close()
    }

    /// Send any request and return the raw response blocks
    ///
    /// No status or shape checking is done.
    pub fn request(&mut self, request: &Request) -> Result<Vec<Block>> {
        let blocks = request.to_blocks()?;
        tracing::trace!(command = request.name(), args = request.arg_count(), "request");
        self.conn.request(&blocks)
    }

    /// Run one table operation with the given arguments
    pub fn call<T, I>(&mut self, op: &Operation<T>, args: I) -> Result<T>
    where
        I: IntoIterator<Item = Value>,
    {
        let frame = self.request(&op.request().args(args))?;
        op.apply(frame)
    }

    // =========================================================================
    // Key-Value
    // =========================================================================

    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        self.call(&ops::SET, [key.into(), value.into()])
    }

    /// Set a value that expires after `ttl_secs` seconds
    pub fn setx(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
        ttl_secs: i64,
    ) -> Result<()> {
        self.call(&ops::SETX, [key.into(), value.into(), ttl_secs.into()])
    }

    /// Set only if the key is absent; returns 1 when set, 0 otherwise
    pub fn setnx(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<i64> {
        self.call(&ops::SETNX, [key.into(), value.into()])
    }

    pub fn get(&mut self, key: impl Into<Value>) -> Result<Option<Bytes>> {
        self.call(&ops::GET, [key.into()])
    }

    /// Set a new value and return the previous one
    pub fn getset(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Bytes>> {
        self.call(&ops::GETSET, [key.into(), value.into()])
    }

    pub fn del(&mut self, key: impl Into<Value>) -> Result<()> {
        self.call(&ops::DEL, [key.into()])
    }

    pub fn incr(&mut self, key: impl Into<Value>, by: i64) -> Result<i64> {
        self.call(&ops::INCR, [key.into(), by.into()])
    }

    pub fn decr(&mut self, key: impl Into<Value>, by: i64) -> Result<i64> {
        self.call(&ops::DECR, [key.into(), by.into()])
    }

    pub fn multi_set<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let args = non_empty(&ops::MULTI_SET, flatten_pairs(pairs))?;
        self.call(&ops::MULTI_SET, args)
    }

    pub fn multi_get<I, K>(&mut self, keys: I) -> Result<HashMap<Bytes, Bytes>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        let args = non_empty(&ops::MULTI_GET, collect(keys))?;
        self.call(&ops::MULTI_GET, args)
    }

    /// Delete several keys; returns the count reported by the server
    pub fn multi_del<I, K>(&mut self, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        let args = non_empty(&ops::MULTI_DEL, collect(keys))?;
        self.call(&ops::MULTI_DEL, args)
    }

    /// Key-value pairs with `start < key <= end`, in key order
    pub fn scan(
        &mut self,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<(Bytes, Bytes)>> {
        self.call(&ops::SCAN, [start.into(), end.into(), limit.into()])
    }

    // =========================================================================
    // Hash Map
    // =========================================================================

    pub fn hset(
        &mut self,
        name: impl Into<Value>,
        field: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.call(&ops::HSET, [name.into(), field.into(), value.into()])
    }

    pub fn hget(&mut self, name: impl Into<Value>, field: impl Into<Value>) -> Result<Option<Bytes>> {
        self.call(&ops::HGET, [name.into(), field.into()])
    }

    pub fn hdel(&mut self, name: impl Into<Value>, field: impl Into<Value>) -> Result<()> {
        self.call(&ops::HDEL, [name.into(), field.into()])
    }

    pub fn hincr(&mut self, name: impl Into<Value>, field: impl Into<Value>, by: i64) -> Result<i64> {
        self.call(&ops::HINCR, [name.into(), field.into(), by.into()])
    }

    pub fn hdecr(&mut self, name: impl Into<Value>, field: impl Into<Value>, by: i64) -> Result<i64> {
        self.call(&ops::HDECR, [name.into(), field.into(), by.into()])
    }

    pub fn hexists(&mut self, name: impl Into<Value>, field: impl Into<Value>) -> Result<bool> {
        self.call(&ops::HEXISTS, [name.into(), field.into()])
    }

    pub fn hsize(&mut self, name: impl Into<Value>) -> Result<i64> {
        self.call(&ops::HSIZE, [name.into()])
    }

    /// Hash names in `(start, end]`
    pub fn hlist(
        &mut self,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<Bytes>> {
        self.call(&ops::HLIST, [start.into(), end.into(), limit.into()])
    }

    /// Field names of one hash in `(start, end]`
    pub fn hkeys(
        &mut self,
        name: impl Into<Value>,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<Bytes>> {
        self.call(
            &ops::HKEYS,
            [name.into(), start.into(), end.into(), limit.into()],
        )
    }

    pub fn hscan(
        &mut self,
        name: impl Into<Value>,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<(Bytes, Bytes)>> {
        self.call(
            &ops::HSCAN,
            [name.into(), start.into(), end.into(), limit.into()],
        )
    }

    /// Like [`hscan`](Self::hscan) in descending field order
    pub fn hrscan(
        &mut self,
        name: impl Into<Value>,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<(Bytes, Bytes)>> {
        self.call(
            &ops::HRSCAN,
            [name.into(), start.into(), end.into(), limit.into()],
        )
    }

    pub fn hclear(&mut self, name: impl Into<Value>) -> Result<()> {
        self.call(&ops::HCLEAR, [name.into()])
    }

    pub fn multi_hset<I, F, V>(&mut self, name: impl Into<Value>, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<Value>,
        V: Into<Value>,
    {
        let fields = non_empty(&ops::MULTI_HSET, flatten_pairs(fields))?;
        self.call(&ops::MULTI_HSET, prepend(name, fields))
    }

    pub fn multi_hget<I, F>(&mut self, name: impl Into<Value>, fields: I) -> Result<HashMap<Bytes, Bytes>>
    where
        I: IntoIterator<Item = F>,
        F: Into<Value>,
    {
        let fields = non_empty(&ops::MULTI_HGET, collect(fields))?;
        self.call(&ops::MULTI_HGET, prepend(name, fields))
    }

    pub fn multi_hdel<I, F>(&mut self, name: impl Into<Value>, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: Into<Value>,
    {
        let fields = non_empty(&ops::MULTI_HDEL, collect(fields))?;
        self.call(&ops::MULTI_HDEL, prepend(name, fields))
    }

    // =========================================================================
    // Sorted Set
    // =========================================================================

    pub fn zset(&mut self, name: impl Into<Value>, member: impl Into<Value>, score: i64) -> Result<()> {
        self.call(&ops::ZSET, [name.into(), member.into(), score.into()])
    }

    pub fn zget(&mut self, name: impl Into<Value>, member: impl Into<Value>) -> Result<Option<i64>> {
        self.call(&ops::ZGET, [name.into(), member.into()])
    }

    pub fn zdel(&mut self, name: impl Into<Value>, member: impl Into<Value>) -> Result<()> {
        self.call(&ops::ZDEL, [name.into(), member.into()])
    }

    pub fn zincr(&mut self, name: impl Into<Value>, member: impl Into<Value>, by: i64) -> Result<i64> {
        self.call(&ops::ZINCR, [name.into(), member.into(), by.into()])
    }

    pub fn zsize(&mut self, name: impl Into<Value>) -> Result<i64> {
        self.call(&ops::ZSIZE, [name.into()])
    }

    pub fn zexists(&mut self, name: impl Into<Value>, member: impl Into<Value>) -> Result<bool> {
        self.call(&ops::ZEXISTS, [name.into(), member.into()])
    }

    pub fn zlist(
        &mut self,
        start: impl Into<Value>,
        end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<Bytes>> {
        self.call(&ops::ZLIST, [start.into(), end.into(), limit.into()])
    }

    /// Members with score in `[score_start, score_end]`, after `start_member`
    pub fn zkeys(
        &mut self,
        name: impl Into<Value>,
        start_member: impl Into<Value>,
        score_start: impl Into<Value>,
        score_end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<Bytes>> {
        self.call(
            &ops::ZKEYS,
            [
                name.into(),
                start_member.into(),
                score_start.into(),
                score_end.into(),
                limit.into(),
            ],
        )
    }

    /// Member/score pairs in ascending score order
    pub fn zscan(
        &mut self,
        name: impl Into<Value>,
        start_member: impl Into<Value>,
        score_start: impl Into<Value>,
        score_end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<(Bytes, i64)>> {
        self.call(
            &ops::ZSCAN,
            [
                name.into(),
                start_member.into(),
                score_start.into(),
                score_end.into(),
                limit.into(),
            ],
        )
    }

    /// Member/score pairs in descending score order
    pub fn zrscan(
        &mut self,
        name: impl Into<Value>,
        start_member: impl Into<Value>,
        score_start: impl Into<Value>,
        score_end: impl Into<Value>,
        limit: i64,
    ) -> Result<Vec<(Bytes, i64)>> {
        self.call(
            &ops::ZRSCAN,
            [
                name.into(),
                start_member.into(),
                score_start.into(),
                score_end.into(),
                limit.into(),
            ],
        )
    }

    pub fn zrank(&mut self, name: impl Into<Value>, member: impl Into<Value>) -> Result<i64> {
        self.call(&ops::ZRANK, [name.into(), member.into()])
    }

    pub fn zrrank(&mut self, name: impl Into<Value>, member: impl Into<Value>) -> Result<i64> {
        self.call(&ops::ZRRANK, [name.into(), member.into()])
    }

    pub fn zrange(&mut self, name: impl Into<Value>, offset: i64, limit: i64) -> Result<Vec<(Bytes, i64)>> {
        self.call(&ops::ZRANGE, [name.into(), offset.into(), limit.into()])
    }

    pub fn zrrange(&mut self, name: impl Into<Value>, offset: i64, limit: i64) -> Result<Vec<(Bytes, i64)>> {
        self.call(&ops::ZRRANGE, [name.into(), offset.into(), limit.into()])
    }

    pub fn zclear(&mut self, name: impl Into<Value>) -> Result<()> {
        self.call(&ops::ZCLEAR, [name.into()])
    }

    pub fn multi_zset<I, M>(&mut self, name: impl Into<Value>, members: I) -> Result<()>
    where
        I: IntoIterator<Item = (M, i64)>,
        M: Into<Value>,
    {
        let members = non_empty(&ops::MULTI_ZSET, flatten_pairs(members))?;
        self.call(&ops::MULTI_ZSET, prepend(name, members))
    }

    pub fn multi_zget<I, M>(&mut self, name: impl Into<Value>, members: I) -> Result<HashMap<Bytes, i64>>
    where
        I: IntoIterator<Item = M>,
        M: Into<Value>,
    {
        let members = non_empty(&ops::MULTI_ZGET, collect(members))?;
        self.call(&ops::MULTI_ZGET, prepend(name, members))
    }

    pub fn multi_zdel<I, M>(&mut self, name: impl Into<Value>, members: I) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<Value>,
    {
        let members = non_empty(&ops::MULTI_ZDEL, collect(members))?;
        self.call(&ops::MULTI_ZDEL, prepend(name, members))
    }

    // =========================================================================
    // Queue
    // =========================================================================

    pub fn qsize(&mut self, name: impl Into<Value>) -> Result<i64> {
        self.call(&ops::QSIZE, [name.into()])
    }

    pub fn qclear(&mut self, name: impl Into<Value>) -> Result<()> {
        self.call(&ops::QCLEAR, [name.into()])
    }

    pub fn qfront(&mut self, name: impl Into<Value>) -> Result<Bytes> {
        self.call(&ops::QFRONT, [name.into()])
    }

    pub fn qback(&mut self, name: impl Into<Value>) -> Result<Bytes> {
        self.call(&ops::QBACK, [name.into()])
    }

    pub fn qget(&mut self, name: impl Into<Value>, index: i64) -> Result<Option<Bytes>> {
        self.call(&ops::QGET, [name.into(), index.into()])
    }

    /// Items at positions `begin..=end`; negative indexes count from the back
    pub fn qslice(&mut self, name: impl Into<Value>, begin: i64, end: i64) -> Result<Vec<Bytes>> {
        self.call(&ops::QSLICE, [name.into(), begin.into(), end.into()])
    }

    /// Same as [`qpush_back`](Self::qpush_back)
    pub fn qpush(&mut self, name: impl Into<Value>, item: impl Into<Value>) -> Result<()> {
        self.qpush_back(name, item)
    }

    pub fn qpush_front(&mut self, name: impl Into<Value>, item: impl Into<Value>) -> Result<()> {
        self.call(&ops::QPUSH_FRONT, [name.into(), item.into()])
    }

    pub fn qpush_back(&mut self, name: impl Into<Value>, item: impl Into<Value>) -> Result<()> {
        self.call(&ops::QPUSH_BACK, [name.into(), item.into()])
    }

    /// Same as [`qpop_front`](Self::qpop_front)
    pub fn qpop(&mut self, name: impl Into<Value>) -> Result<Option<Bytes>> {
        self.qpop_front(name)
    }

    pub fn qpop_front(&mut self, name: impl Into<Value>) -> Result<Option<Bytes>> {
        self.call(&ops::QPOP_FRONT, [name.into()])
    }

    pub fn qpop_back(&mut self, name: impl Into<Value>) -> Result<Option<Bytes>> {
        self.call(&ops::QPOP_BACK, [name.into()])
    }
}

// =============================================================================
// Argument Helpers
// =============================================================================

fn collect<I, V>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

fn flatten_pairs<I, K, V>(pairs: I) -> Vec<Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Value>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .flat_map(|(k, v)| [k.into(), v.into()])
        .collect()
}

fn prepend(first: impl Into<Value>, rest: Vec<Value>) -> Vec<Value> {
    let mut args = Vec::with_capacity(rest.len() + 1);
    args.push(first.into());
    args.extend(rest);
    args
}

/// Reject a multi command with nothing to operate on
fn non_empty<T>(op: &Operation<T>, args: Vec<Value>) -> Result<Vec<Value>> {
    if args.is_empty() {
        return Err(SsdbError::Encoding(format!(
            "{} needs at least one argument",
            op.name()
        )));
    }
    Ok(args)
}
