//! Network Module
//!
//! TCP connection handling.
//!
//! ## Model
//! - One blocking TCP stream per client
//! - One outstanding request per stream (no pipelining)
//! - No reconnects; a failed connection is dropped by its owner

mod connection;

pub use connection::Connection;
