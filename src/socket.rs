use bytes::Bytes;
use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::config::SocketConfig;
use crate::dispatcher::SocketEventDispatcher;
use crate::error::SocketError;
use crate::raw_socket::{RawSocket, RawSocketEvent};

/// Hook invoked synchronously immediately before a request's payload is
///  handed to the primitive, e.g. to stamp a TTL-dependent socket option. A
///  failure aborts that dispatch and is delivered to the after-hook.
pub type BeforeHook = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Hook invoked exactly once per accepted or rejected request, with the
///  number of bytes sent or the error that terminated the request.
pub type AfterHook = Box<dyn FnOnce(Result<usize, SocketError>) + Send>;

#[derive(Default)]
pub struct SendHooks {
    pub before: Option<BeforeHook>,
    pub after: Option<AfterHook>,
}

impl SendHooks {
    pub fn none() -> SendHooks {
        SendHooks::default()
    }

    pub fn after(after: impl FnOnce(Result<usize, SocketError>) + Send + 'static) -> SendHooks {
        SendHooks {
            before: None,
            after: Some(Box::new(after)),
        }
    }
}

struct SendRequest {
    payload: Bytes,
    offset: usize,
    length: usize,
    address: IpAddr,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
}

struct SocketInner {
    requests: VecDeque<SendRequest>,
    recv_paused: bool,
    send_paused: bool,
    closed: bool,
}

/// The socket engine: an ordered send queue and directional flow control
///  layered over a [RawSocket] primitive.
///
/// All entry points are synchronous and return immediately; the asynchronous
///  work happens in the readiness handlers, driven strictly sequentially by
///  [Socket::run] (or [Socket::spawn_event_loop]) from the primitive's event
///  feed. Send requests are dispatched in strict FIFO order relative to
///  enqueue order, one per send-ready signal. Receive notifications are an
///  independent stream with no ordering guarantee relative to send
///  completions.
///
/// The initial watch state is `{recv: active, send: paused}` - there is
///  nothing to dispatch until a request is enqueued.
pub struct Socket {
    raw: Arc<dyn RawSocket>,
    inner: Mutex<SocketInner>,
    recv_buf: Mutex<Vec<u8>>,
    dispatchers: Mutex<Vec<Arc<dyn SocketEventDispatcher>>>,
}

/// Convenience factory wrapping [Socket::new] for shared use with
///  [Socket::spawn_event_loop].
pub fn create_socket(raw: Arc<dyn RawSocket>, config: SocketConfig) -> anyhow::Result<Arc<Socket>> {
    Ok(Arc::new(Socket::new(raw, config)?))
}

impl Socket {
    pub fn new(raw: Arc<dyn RawSocket>, config: SocketConfig) -> anyhow::Result<Socket> {
        config.validate()?;
        debug!(
            "creating socket engine: protocol {:?}, ip version {:?}, receive buffer {} bytes",
            config.protocol, config.ip_version, config.buffer_size
        );

        Ok(Socket {
            raw,
            inner: Mutex::new(SocketInner {
                requests: VecDeque::new(),
                recv_paused: false,
                send_paused: true,
                closed: false,
            }),
            recv_buf: Mutex::new(vec![0; config.buffer_size]),
            dispatchers: Mutex::new(Vec::new()),
        })
    }

    /// Register a dispatcher to be notified of message / error / close
    ///  events. Without any registered dispatcher, engine-level errors are
    ///  logged and dropped.
    pub fn subscribe(&self, dispatcher: Arc<dyn SocketEventDispatcher>) -> &Self {
        self.dispatchers.lock().unwrap().push(dispatcher);
        self
    }

    /// Enqueue a send request for the window `payload[offset..offset+length]`
    ///  to the given IPv4 or IPv6 literal.
    ///
    /// Validation failures are delivered synchronously through the after-hook
    ///  and never enter the queue. On success the request is appended in FIFO
    ///  position, and a paused send direction is resumed so the primitive
    ///  starts watching for send readiness.
    pub fn send(
        &self,
        payload: Bytes,
        offset: usize,
        length: usize,
        address: &str,
        hooks: SendHooks,
    ) -> &Self {
        if offset.checked_add(length).map_or(true, |end| end > payload.len()) {
            debug!(
                "rejecting send: offset {} plus length {} exceeds payload of {} bytes",
                offset,
                length,
                payload.len()
            );
            complete(
                hooks.after,
                Err(SocketError::BufferRange {
                    buffer_len: payload.len(),
                    offset,
                    length,
                }),
            );
            return self;
        }

        let address = match address.parse::<IpAddr>() {
            Ok(address) => address,
            Err(_) => {
                debug!("rejecting send: invalid IP address '{}'", address);
                complete(hooks.after, Err(SocketError::InvalidAddress(address.to_string())));
                return self;
            }
        };

        let resume = {
            let mut inner = self.inner.lock().unwrap();
            if inner.closed {
                drop(inner);
                complete(hooks.after, Err(SocketError::Closed));
                return self;
            }

            inner.requests.push_back(SendRequest {
                payload,
                offset,
                length,
                address,
                before: hooks.before,
                after: hooks.after,
            });
            inner.send_paused
        };

        if resume {
            self.resume_send();
        }
        self
    }

    /// Number of enqueued, not-yet-dispatched requests.
    pub fn pending_sends(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn is_send_paused(&self) -> bool {
        self.inner.lock().unwrap().send_paused
    }

    pub fn is_recv_paused(&self) -> bool {
        self.inner.lock().unwrap().recv_paused
    }

    pub fn pause_send(&self) -> &Self {
        self.forward_pause(|inner| inner.send_paused = true)
    }

    pub fn pause_recv(&self) -> &Self {
        self.forward_pause(|inner| inner.recv_paused = true)
    }

    pub fn resume_send(&self) -> &Self {
        self.forward_pause(|inner| inner.send_paused = false)
    }

    pub fn resume_recv(&self) -> &Self {
        self.forward_pause(|inner| inner.recv_paused = false)
    }

    /// Pausing only halts dequeuing, it does not clear the queue. The flags
    ///  are always forwarded to the primitive together, as one joint pair,
    ///  even when the call does not change observable state.
    fn forward_pause(&self, mutate: impl FnOnce(&mut SocketInner)) -> &Self {
        let (recv_paused, send_paused) = {
            let mut inner = self.inner.lock().unwrap();
            mutate(&mut inner);
            (inner.recv_paused, inner.send_paused)
        };
        self.raw.pause(recv_paused, send_paused);
        self
    }

    /// Thin passthrough to the primitive. `level` and `option` accept the
    ///  symbolic [crate::options::SocketLevel] / [crate::options::SocketOption]
    ///  names or raw integer codes; primitive failures propagate to the
    ///  caller.
    pub fn set_option(
        &self,
        level: impl Into<i32>,
        option: impl Into<i32>,
        value: &[u8],
    ) -> anyhow::Result<&Self> {
        self.raw.set_option(level.into(), option.into(), value)?;
        Ok(self)
    }

    /// Thin passthrough to the primitive, returning the number of bytes
    ///  written into `buf`.
    pub fn get_option(
        &self,
        level: impl Into<i32>,
        option: impl Into<i32>,
        buf: &mut [u8],
    ) -> anyhow::Result<usize> {
        self.raw.get_option(level.into(), option.into(), buf)
    }

    /// Close the engine. Idempotent. Requests still queued are drained, each
    ///  pending after-hook firing exactly once with [SocketError::Closed] -
    ///  they are not dropped silently. No further operations are serviced.
    pub fn close(&self) -> &Self {
        if self.drain_on_close() {
            self.raw.close();
        }
        self
    }

    /// Handle a send-ready signal: dispatch the front request, or pause the
    ///  send direction if there is nothing left to do.
    pub fn on_send_ready(&self) {
        let (request, pause_idle) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.closed {
                return;
            }
            match inner.requests.pop_front() {
                Some(request) => (Some(request), false),
                None => (None, !inner.send_paused),
            }
        };

        if let Some(request) = request {
            self.dispatch(request);
        }
        else if pause_idle {
            trace!("send queue drained, pausing send readiness");
            self.pause_send();
        }
    }

    fn dispatch(&self, request: SendRequest) {
        let SendRequest {
            payload,
            offset,
            length,
            address,
            before,
            after,
        } = request;

        if let Some(before) = before {
            if let Err(e) = before() {
                debug!("before hook failed for send to {}: {}", address, e);
                complete(after, Err(SocketError::Transmission(e)));
                return;
            }
        }

        trace!("sending {} bytes to {}", length, address);
        let result = self
            .raw
            .send(&payload[offset..offset + length], address)
            .map_err(SocketError::Transmission);
        complete(after, result);
    }

    /// Handle a recv-ready signal: receive into the reusable buffer and
    ///  notify dispatchers. A receive failure is surfaced as an error event
    ///  but does not close the engine.
    pub fn on_recv_ready(&self) {
        if self.inner.lock().unwrap().closed {
            return;
        }

        let mut buf = self.recv_buf.lock().unwrap();
        match self.raw.recv(&mut buf) {
            Ok((bytes, source)) => {
                trace!("received {} bytes from {}", bytes, source);
                let data = &buf[..bytes];
                self.notify(|dispatcher| dispatcher.on_message(data, source));
            }
            Err(e) => {
                debug!("receive failed: {}", e);
                let error = SocketError::Reception(e);
                self.notify(|dispatcher| dispatcher.on_error(&error));
            }
        }
    }

    /// Handle an error event originating from the primitive itself. This is
    ///  unconditionally fatal: the error is surfaced, then the engine closes.
    pub fn on_raw_error(&self, error: anyhow::Error) {
        error!("raw socket error, closing: {}", error);
        let error = SocketError::Fatal(error);
        self.notify(|dispatcher| dispatcher.on_error(&error));
        self.close();
    }

    /// Handle the primitive's close event, the final event of the feed.
    pub fn on_raw_close(&self) {
        debug!("raw socket closed");
        self.drain_on_close();
        self.notify(|dispatcher| dispatcher.on_close());
    }

    /// returns true if this call transitioned the engine to closed
    fn drain_on_close(&self) -> bool {
        let (newly_closed, pending) = {
            let mut inner = self.inner.lock().unwrap();
            let newly_closed = !inner.closed;
            inner.closed = true;
            (newly_closed, std::mem::take(&mut inner.requests))
        };

        for request in pending {
            complete(request.after, Err(SocketError::Closed));
        }
        newly_closed
    }

    fn notify(&self, f: impl Fn(&dyn SocketEventDispatcher)) {
        let dispatchers = self.dispatchers.lock().unwrap().clone();
        for dispatcher in &dispatchers {
            f(dispatcher.as_ref());
        }
    }

    /// Drive the engine from the primitive's event feed until it closes. The
    ///  handlers run strictly sequentially - this loop is the engine's single
    ///  logical thread of control.
    pub async fn run(&self) {
        info!("starting socket event loop");
        loop {
            match self.raw.next_event().await {
                RawSocketEvent::SendReady => self.on_send_ready(),
                RawSocketEvent::RecvReady => self.on_recv_ready(),
                RawSocketEvent::Error(e) => self.on_raw_error(e),
                RawSocketEvent::Closed => {
                    self.on_raw_close();
                    break;
                }
            }
        }
    }

    pub fn spawn_event_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let socket = self.clone();
        tokio::spawn(async move { socket.run().await })
    }
}

fn complete(after: Option<AfterHook>, result: Result<usize, SocketError>) {
    if let Some(after) = after {
        after(result);
    }
}
