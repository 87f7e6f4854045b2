//! Connection Handler
//!
//! Owns one TCP stream to the server and its stream buffer.

use std::io::{self, ErrorKind};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::ClientConfig;
use crate::error::{Result, SsdbError};
use crate::protocol::{read_frame, write_frame, Block, StreamBuffer};

/// A single blocking connection to the server
///
/// Carries exactly one request at a time: `request` writes a frame and
/// reads its response before returning. Sharing a connection between
/// threads needs an external lock around it.
pub struct Connection {
    /// TCP stream to the server
    stream: TcpStream,

    /// Bytes read but not yet consumed into a frame
    buffer: StreamBuffer,

    /// Bytes requested per socket read
    read_chunk_size: usize,

    /// Peer address for logging
    peer_addr: String,

    /// Set once a fatal error has made the stream position unreliable
    broken: bool,
}

impl Connection {
    /// Open a connection using the given config
    ///
    /// Tries every resolved address in turn and reports the last failure.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let addr = config.addr();

        let stream = dial(&addr, config).map_err(|source| SsdbError::Connect {
            addr: addr.clone(),
            source,
        })?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(config.nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream,
            buffer: StreamBuffer::new(),
            read_chunk_size: config.read_chunk_size,
            peer_addr,
            broken: false,
        })
    }

    /// Send one request frame and read its response frame
    pub fn request(&mut self, blocks: &[Block]) -> Result<Vec<Block>> {
        self.send(blocks)?;
        self.receive()
    }

    /// Write one request frame
    pub fn send(&mut self, blocks: &[Block]) -> Result<()> {
        self.ensure_usable()?;
        tracing::trace!("Sending {} blocks to {}", blocks.len(), self.peer_addr);

        let result = write_frame(&mut self.stream, blocks);
        self.track(result)
    }

    /// Read one response frame
    pub fn receive(&mut self) -> Result<Vec<Block>> {
        self.ensure_usable()?;

        let result = read_frame(&mut self.stream, &mut self.buffer, self.read_chunk_size);
        self.track(result)
    }

    /// Close the connection, reporting any shutdown failure
    pub fn close(self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);

        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Number of received bytes not yet consumed into a frame
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether a fatal error has already occurred on this connection
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.broken {
            return Err(SsdbError::Io(io::Error::new(
                ErrorKind::NotConnected,
                format!("connection to {} is no longer usable", self.peer_addr),
            )));
        }
        Ok(())
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            if e.is_fatal() {
                tracing::warn!("Connection to {} failed: {}", self.peer_addr, e);
                self.broken = true;
            }
        }
        result
    }
}

fn dial(addr: &str, config: &ClientConfig) -> io::Result<TcpStream> {
    let Some(timeout) = config.connect_timeout() else {
        return TcpStream::connect(addr);
    };

    let addrs: Vec<SocketAddr> = addr.to_socket_addrs()?.collect();
    let mut last_err = io::Error::new(
        ErrorKind::AddrNotAvailable,
        format!("{} resolved to no addresses", addr),
    );
    for candidate in addrs {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}
