use anyhow::bail;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// IP-level protocol number passed to the raw socket primitive at
///  construction time. `None` leaves protocol selection to the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Protocol {
    None = 0,
    Icmp = 1,
    Tcp = 6,
    Udp = 17,
    Icmpv6 = 58,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum IpVersion {
    V4 = 1,
    V6 = 2,
}

pub struct SocketConfig {
    /// Size of the engine's single reusable receive buffer. A received packet
    ///  larger than this is truncated by the primitive, so this bounds the
    ///  largest message the engine can surface in one piece.
    pub buffer_size: usize,

    pub protocol: Protocol,
    pub ip_version: IpVersion,
}

impl SocketConfig {
    pub fn default_ipv4() -> SocketConfig {
        SocketConfig {
            buffer_size: 4096,
            protocol: Protocol::None,
            ip_version: IpVersion::V4,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.buffer_size == 0 {
            bail!("receive buffer size must not be zero");
        }

        Ok(())
    }
}
