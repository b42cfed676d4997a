//! Symbolic names for socket option levels and options, resolving to the
//!  platform's numeric codes.
//!
//! The engine's option passthrough accepts either these symbolic names or raw
//!  integer codes (`impl Into<i32>`); resolution happens before the call is
//!  forwarded to the primitive. The tables cover the options commonly set on
//!  raw sockets - anything else can be passed as a raw code.

/// Option level, i.e. the protocol layer an option belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketLevel {
    Socket,
    IpProto,
    Ipv6Proto,
}

impl From<SocketLevel> for i32 {
    fn from(level: SocketLevel) -> i32 {
        match level {
            SocketLevel::Socket => libc::SOL_SOCKET,
            SocketLevel::IpProto => libc::IPPROTO_IP,
            SocketLevel::Ipv6Proto => libc::IPPROTO_IPV6,
        }
    }
}

/// Socket options relevant to raw sockets. Availability of some entries is
///  platform-dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketOption {
    RcvBuf,
    RcvTimeo,
    SndBuf,
    SndTimeo,
    /// caller supplies the IP header itself
    IpHdrIncl,
    IpOptions,
    IpTos,
    IpTtl,
    Ipv6UnicastHops,
    Ipv6Only,
    #[cfg(target_os = "linux")]
    BindToDevice,
}

impl From<SocketOption> for i32 {
    fn from(option: SocketOption) -> i32 {
        match option {
            SocketOption::RcvBuf => libc::SO_RCVBUF,
            SocketOption::RcvTimeo => libc::SO_RCVTIMEO,
            SocketOption::SndBuf => libc::SO_SNDBUF,
            SocketOption::SndTimeo => libc::SO_SNDTIMEO,
            SocketOption::IpHdrIncl => libc::IP_HDRINCL,
            SocketOption::IpOptions => libc::IP_OPTIONS,
            SocketOption::IpTos => libc::IP_TOS,
            SocketOption::IpTtl => libc::IP_TTL,
            SocketOption::Ipv6UnicastHops => libc::IPV6_UNICAST_HOPS,
            SocketOption::Ipv6Only => libc::IPV6_V6ONLY,
            #[cfg(target_os = "linux")]
            SocketOption::BindToDevice => libc::SO_BINDTODEVICE,
        }
    }
}
