use thiserror::Error;

/// Error taxonomy of the socket engine.
///
/// Per-request errors (`BufferRange`, `InvalidAddress`, `Transmission`,
///  `Closed`) are never returned from the enqueue call - they are delivered
///  through that request's after-hook. Engine-level errors (`Reception`,
///  `Fatal`) are delivered through the registered event dispatchers.
#[derive(Error, Debug)]
pub enum SocketError {
    /// the requested (offset, length) window does not fit into the payload buffer
    #[error("buffer length {buffer_len} is not large enough for the specified offset {offset} plus length {length}")]
    BufferRange {
        buffer_len: usize,
        offset: usize,
        length: usize,
    },

    /// the destination is not a syntactically valid IPv4 or IPv6 literal
    #[error("invalid IP address '{0}'")]
    InvalidAddress(String),

    /// an in-flight send attempt failed; terminal for that request, non-fatal
    ///  for the engine
    #[error("send failed: {0}")]
    Transmission(anyhow::Error),

    /// a receive attempt failed; non-fatal for the engine
    #[error("receive failed: {0}")]
    Reception(anyhow::Error),

    /// an error originating from the raw socket primitive itself; the engine
    ///  closes immediately after surfacing it
    #[error("raw socket error: {0}")]
    Fatal(anyhow::Error),

    /// the engine is closed; also delivered to pending requests flushed from
    ///  the queue on teardown
    #[error("socket is closed")]
    Closed,

    /// a checksum does not fit into the target buffer at the given offset
    #[error("offset {offset} leaves no room for a 16 bit checksum in a buffer of length {buffer_len}")]
    ChecksumBounds { buffer_len: usize, offset: usize },
}
