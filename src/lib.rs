//! # ssdb
//!
//! A blocking client for key-value stores speaking the SSDB text protocol:
//! - Length-prefixed, newline-delimited request and response frames
//! - Incremental response parsing that survives arbitrary TCP fragmentation
//! - One typed method per store command (scalars, hashes, sorted sets, queues)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Client (typed methods)                   │
//! │              ops table: name, shape, decoder                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Connection                             │
//! │                 (one request in flight)                      │
//! └──────────┬──────────────────────────────────────▲───────────┘
//!            │                                      │ blocks
//!            ▼                                      │
//!   ┌─────────────────┐                    ┌────────┴────────┐
//!   │  Value encoder  │                    │    Read loop    │
//!   │  Frame writer   │                    │  Frame parser   │
//!   └────────┬────────┘                    │  Stream buffer  │
//!            │                             └────────▲────────┘
//!            ▼                                      │
//!   ┌─────────────────────────────────────────────────────────┐
//!   │                        TcpStream                         │
//!   └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ssdb::Client;
//!
//! let mut client = Client::connect("127.0.0.1", 8888)?;
//! client.set("greeting", "hello")?;
//! assert_eq!(client.get("greeting")?.as_deref(), Some(&b"hello"[..]));
//! # Ok::<(), ssdb::SsdbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SsdbError, Result};
pub use config::ClientConfig;
pub use client::Client;
pub use protocol::{Block, Request, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
