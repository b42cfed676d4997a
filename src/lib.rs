//! Raw IP-level socket access with asynchronous, non-blocking send/receive
//!  semantics, explicit flow-control pausing, and Internet checksum
//!  utilities. This crate targets applications that construct and transmit
//!  custom network-layer packets (e.g. ICMP probes) below the transport
//!  stack.
//!
//! ## Design goals
//!
//! * The abstraction is a *send queue with flow control* over an OS raw
//!   socket, not a reliable protocol: there is no retransmission, no
//!   reassembly, no rate limiting beyond caller-driven pause
//! * Single-threaded, readiness-driven operation: all entry points are
//!   synchronous and return immediately; the actual transmission and
//!   reception happen in handlers driven strictly sequentially by the
//!   primitive's readiness feed
//! * Send requests are dispatched in strict FIFO order relative to enqueue
//!   order, exactly one dispatch attempt per send-ready signal. A failed
//!   dispatch terminates that request (no re-enqueue) without affecting the
//!   engine or the rest of the queue
//! * Flow control is directional and explicit: independent pause flags for
//!   the send and receive directions, always forwarded to the primitive as
//!   one joint pair because both watches are multiplexed on a single handle.
//!   The send direction pauses itself when the queue drains (no
//!   busy-polling) and resumes when a request is enqueued
//! * The OS raw socket is an external collaborator behind the
//!   [raw_socket::RawSocket] trait, so the engine can be tested against a
//!   stub without touching a real socket
//! * Completion is delivered through per-request hooks (exactly one
//!   after-hook invocation per accepted or rejected request) and through
//!   typed [dispatcher::SocketEventDispatcher] notifications for received
//!   messages, errors and closure
//!
//! ## Checksum and byte order
//!
//! [checksum] implements the 16 bit Internet checksum
//!  (one's-complement-of-one's-complement-sum) over one or more byte ranges,
//!  with seeding for pseudo-header computations that span buffers.
//!  [byte_order] provides `htons`/`htonl`/`ntohs`/`ntohl` with the host's
//!  endianness resolved once into process-wide immutable state.

pub mod byte_order;
pub mod checksum;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod options;
pub mod raw_socket;
pub mod socket;

#[cfg(test)]
mod tests {
    use tracing::Level;

    #[ctor::ctor]
    fn init_test_logging() {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(Level::TRACE)
            .try_init()
            .ok();
    }
}
