#[cfg(test)] use mockall::automock;
use std::net::IpAddr;

use crate::error::SocketError;

/// Notification seam for the engine's observable events. Zero or more
///  dispatchers can be registered; each is notified of every event once, in
///  registration order.
///
/// `data` in [SocketEventDispatcher::on_message] is a view into the engine's
///  reusable receive buffer, valid only for the duration of the call -
///  implementations that need the bytes afterwards must copy them.
#[cfg_attr(test, automock)]
pub trait SocketEventDispatcher: Send + Sync + 'static {
    fn on_message(&self, data: &[u8], source: IpAddr);

    fn on_error(&self, error: &SocketError);

    fn on_close(&self);
}
