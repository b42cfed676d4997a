//! The 16 bit Internet checksum (the one's-complement checksum used by IP,
//!  ICMP, TCP and UDP headers), computed over one or more byte ranges.
//!
//! Multi-range summing exists so that a checksum spanning a pseudo-header and
//!  a payload in separate buffers can be computed without copying; seeding
//!  supports incremental computation across calls.

use crate::error::SocketError;

/// Running one's-complement sum over byte ranges.
///
/// Bytes are summed as big-endian 16 bit words; a range of odd length
///  contributes its final byte as the high byte of a zero-padded word. The
///  padding applies per range, so splitting data across ranges is only
///  equivalent to summing it contiguously if every range but the last has
///  even length.
pub struct ChecksumAccumulator {
    sum: u32,
}

impl ChecksumAccumulator {
    pub fn new() -> ChecksumAccumulator {
        ChecksumAccumulator { sum: 0 }
    }

    /// Continue a previously started computation, e.g. a pseudo-header summed
    ///  in an earlier call.
    pub fn with_seed(seed: u32) -> ChecksumAccumulator {
        ChecksumAccumulator { sum: seed }
    }

    pub fn add(&mut self, range: &[u8]) -> &mut ChecksumAccumulator {
        let mut chunks = range.chunks_exact(2);
        for word in &mut chunks {
            self.sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
        }
        if let [last] = chunks.remainder() {
            self.sum += u32::from(u16::from_be_bytes([*last, 0]));
        }
        self
    }

    /// The intermediate sum, for carrying into a later [ChecksumAccumulator::with_seed] call.
    pub fn sum(&self) -> u32 {
        self.sum
    }

    /// Fold the carries back into the low 16 bits and return the one's
    ///  complement of the result.
    pub fn finish(&self) -> u16 {
        let mut folded = self.sum;
        while folded > 0xffff {
            folded = (folded & 0xffff) + (folded >> 16);
        }
        !(folded as u16)
    }
}

impl Default for ChecksumAccumulator {
    fn default() -> Self {
        ChecksumAccumulator::new()
    }
}

/// Compute the Internet checksum across all given ranges, folding and
///  complementing once at the end.
pub fn create_checksum(ranges: &[&[u8]]) -> u16 {
    let mut acc = ChecksumAccumulator::new();
    for range in ranges {
        acc.add(range);
    }
    acc.finish()
}

/// Write `checksum` as two big-endian bytes at `buffer[offset]` and
///  `buffer[offset + 1]`. No partial write happens on a bounds failure.
pub fn write_checksum(buffer: &mut [u8], offset: usize, checksum: u16) -> Result<(), SocketError> {
    if offset.checked_add(2).map_or(true, |end| end > buffer.len()) {
        return Err(SocketError::ChecksumBounds {
            buffer_len: buffer.len(),
            offset,
        });
    }
    buffer[offset..offset + 2].copy_from_slice(&checksum.to_be_bytes());
    Ok(())
}
