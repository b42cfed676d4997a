//! Host/network byte order conversions for the 16 and 32 bit unsigned
//!  integers that appear in IP-level headers.
//!
//! The host's endianness is resolved exactly once into process-wide immutable
//!  state and read-only thereafter - it is detected from the actual in-memory
//!  byte layout rather than assumed.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

static HOST_ENDIANNESS: OnceLock<Endianness> = OnceLock::new();

/// The byte order of the host this process runs on, detected on first use.
pub fn host_endianness() -> Endianness {
    *HOST_ENDIANNESS.get_or_init(|| {
        if u16::from_ne_bytes([0x12, 0x34]) == 0x1234 {
            Endianness::Big
        }
        else {
            Endianness::Little
        }
    })
}

/// host to network byte order, 16 bit
pub fn htons(value: u16) -> u16 {
    match host_endianness() {
        Endianness::Big => value,
        Endianness::Little => value.swap_bytes(),
    }
}

/// host to network byte order, 32 bit
pub fn htonl(value: u32) -> u32 {
    match host_endianness() {
        Endianness::Big => value,
        Endianness::Little => value.swap_bytes(),
    }
}

/// network to host byte order, 16 bit. The same bit swap as [htons], provided
///  separately for call-site clarity.
pub fn ntohs(value: u16) -> u16 {
    htons(value)
}

/// network to host byte order, 32 bit. The same bit swap as [htonl], provided
///  separately for call-site clarity.
pub fn ntohl(value: u32) -> u32 {
    htonl(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_host_endianness_matches_target() {
        let expected = if cfg!(target_endian = "big") {
            Endianness::Big
        }
        else {
            Endianness::Little
        };
        assert_eq!(host_endianness(), expected);
        // stable across calls
        assert_eq!(host_endianness(), expected);
    }

    #[rstest]
    #[case::zero(0x0000)]
    #[case::one(0x0001)]
    #[case::pattern(0x1234)]
    #[case::high_bit(0x8000)]
    #[case::max(0xffff)]
    fn test_htons_matches_to_be(#[case] value: u16) {
        assert_eq!(htons(value), value.to_be());
        assert_eq!(ntohs(value), u16::from_be(value));
    }

    #[rstest]
    #[case::zero(0x0000_0000)]
    #[case::one(0x0000_0001)]
    #[case::pattern(0x1234_5678)]
    #[case::high_bit(0x8000_0000)]
    #[case::max(0xffff_ffff)]
    fn test_htonl_matches_to_be(#[case] value: u32) {
        assert_eq!(htonl(value), value.to_be());
        assert_eq!(ntohl(value), u32::from_be(value));
    }

    #[rstest]
    #[case::zero(0x0000)]
    #[case::asymmetric(0x12ff)]
    #[case::max(0xffff)]
    fn test_round_trip_16(#[case] value: u16) {
        assert_eq!(ntohs(htons(value)), value);
        assert_eq!(htons(ntohs(value)), value);
    }

    #[rstest]
    #[case::zero(0x0000_0000)]
    #[case::asymmetric(0x12ff_34aa)]
    #[case::max(0xffff_ffff)]
    fn test_round_trip_32(#[case] value: u32) {
        assert_eq!(ntohl(htonl(value)), value);
        assert_eq!(htonl(ntohl(value)), value);
    }

    #[test]
    fn test_network_order_is_big_endian() {
        assert_eq!(htons(0x1234).to_ne_bytes()[0], 0x12);
        assert_eq!(htonl(0x1234_5678).to_ne_bytes()[0], 0x12);
    }
}
