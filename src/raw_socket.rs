use async_trait::async_trait;
#[cfg(test)] use mockall::automock;
use std::net::IpAddr;

/// Readiness or lifecycle signal delivered by the raw socket primitive.
#[derive(Debug)]
pub enum RawSocketEvent {
    SendReady,
    RecvReady,
    Error(anyhow::Error),
    Closed,
}

/// The raw socket primitive the engine is layered on: an OS-level raw socket
///  behind an explicit interface, introduced to facilitate mocking the I/O
///  part away for testing.
///
/// Contract expected from implementations:
/// * all methods are non-blocking; `send` and `recv` must only be called
///   after a corresponding readiness event
/// * readiness events are delivered only for directions whose `pause` flag
///   is false; both flags are set together in one `pause` call since both
///   watches are multiplexed on a single handle. The initial watch state is
///   `{recv: active, send: paused}`
/// * `close` results in a final `Closed` event, after which no further
///   events are delivered; an `Error` event is likewise followed by `Closed`
///   once the handle is torn down
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RawSocket: Send + Sync + 'static {
    /// The next readiness or lifecycle signal. This is the only suspending
    ///  operation of the primitive.
    async fn next_event(&self) -> RawSocketEvent;

    /// Send an already-sliced payload to `to`, returning the number of bytes
    ///  written.
    fn send(&self, buf: &[u8], to: IpAddr) -> anyhow::Result<usize>;

    /// Receive into `buf`, returning the number of bytes read and the source
    ///  address.
    fn recv(&self, buf: &mut [u8]) -> anyhow::Result<(usize, IpAddr)>;

    fn set_option(&self, level: i32, option: i32, value: &[u8]) -> anyhow::Result<()>;

    /// Read an option value into `buf`, returning the number of bytes
    ///  written.
    fn get_option(&self, level: i32, option: i32, buf: &mut [u8]) -> anyhow::Result<usize>;

    /// Set which directions are watched for readiness, as one joint pair.
    fn pause(&self, recv_paused: bool, send_paused: bool);

    fn close(&self);
}
