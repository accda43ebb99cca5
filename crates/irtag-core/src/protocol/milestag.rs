//! MilesTag v2 — laser-tag infrared protocol
//!
//! MilesTag is the protocol used by MilesTag-based DIY laser tag systems.
//! It is a modified Sony encoding: variable-length marks carry the data,
//! spaces are fixed. A frame is a 2400 us header mark followed by data
//! bits, each bit a 600 us space and then a mark: 1200 us for a 1,
//! 600 us for a 0. Two packet lengths are customary: a 14-bit "shot" and
//! a 24-bit "message"; the decoder accepts any length the buffer implies,
//! up to the 32-bit accumulator capacity. Unlike Sony, a frame goes out
//! exactly once. The carrier is 38, 40, or 56 kHz, 38 by default as that
//! matches the most common receiver modules.
//!
//! ## Example
//!
//! ```rust
//! use irtag_core::protocol::milestag::MilesTag;
//! use irtag_core::protocol::ProtocolCodec;
//! use irtag_core::pulse::CarrierFrequency;
//!
//! let codec = MilesTag::new();
//! let train = codec.encode(0x2A5, 14, CarrierFrequency::Khz38).unwrap();
//! let captured = train.to_capture_buffer(10_000);
//! let packet = codec.decode(&captured, false).unwrap();
//! assert_eq!(packet.value, 0x2A5);
//! assert_eq!(packet.bit_count, 14);
//! ```

use tracing::{debug, trace};

use super::{CodecInfo, ProtocolCodec};
use crate::pulse::{build_frame, CarrierFrequency, FrameTiming, PulseTrain};
use crate::tolerance::PulseMatcher;
use crate::types::{CodecError, CodecResult, DecodedPacket, Microseconds, ProtocolId};

/// Header mark duration.
pub const HEADER_MARK: Microseconds = 2400;
/// Fixed space duration, used uniformly after the header and between bits.
pub const BIT_SPACE: Microseconds = 600;
/// Mark duration for a 1 bit.
pub const ONE_MARK: Microseconds = 1200;
/// Mark duration for a 0 bit.
pub const ZERO_MARK: Microseconds = 600;
/// Widest frame the 32-bit value accumulator can hold.
pub const MAX_BITS: u8 = 32;
/// Data bits in a shot packet.
pub const SHOT_BITS: u8 = 14;
/// Data bits in a message packet.
pub const MESSAGE_BITS: u8 = 24;

/// Frame timing handed to the generic builder. The header space collapses
/// with the inter-bit space in this protocol, and the frame is sent once.
const TIMING: FrameTiming = FrameTiming {
    header_mark: HEADER_MARK,
    header_space: BIT_SPACE,
    one_mark: ONE_MARK,
    zero_mark: ZERO_MARK,
    bit_space: BIT_SPACE,
    repeats: 1,
};

/// The customary MilesTag packet lengths.
///
/// Decoding never enforces these (any frame length decodes), but callers
/// usually want to know which kind they received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    /// 14-bit shot packet (player ID, team, damage).
    Shot,
    /// 24-bit message packet (system commands).
    Message,
}

impl PacketKind {
    /// Classify a bit count, if it matches a customary packet length.
    pub fn from_bit_count(bit_count: u8) -> Option<Self> {
        match bit_count {
            SHOT_BITS => Some(PacketKind::Shot),
            MESSAGE_BITS => Some(PacketKind::Message),
            _ => None,
        }
    }
}

/// MilesTag v2 codec.
#[derive(Debug, Clone)]
pub struct MilesTag {
    matcher: PulseMatcher,
}

impl MilesTag {
    /// Create a codec with the default ±25% tolerance window.
    pub fn new() -> Self {
        Self {
            matcher: PulseMatcher::default(),
        }
    }

    /// Create a codec with a custom fractional tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            matcher: PulseMatcher::new(tolerance),
        }
    }

    /// The duration matcher this codec scans with.
    pub fn matcher(&self) -> &PulseMatcher {
        &self.matcher
    }
}

impl Default for MilesTag {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolCodec for MilesTag {
    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "MilesTag",
            full_name: "MilesTag v2",
            description: "Laser-tag IR protocol: variable marks, fixed 600 us spaces",
            default_carrier: CarrierFrequency::Khz38,
            characteristics: &[
                "2400 us header mark",
                "1200 us mark = 1, 600 us mark = 0",
                "14-bit shot and 24-bit message packets",
                "frame sent once, no repeat",
            ],
        }
    }

    fn decode(
        &self,
        durations: &[Microseconds],
        ignore_header: bool,
    ) -> CodecResult<DecodedPacket> {
        trace!(len = durations.len(), ignore_header, "attempting MilesTag decode");

        // Reject frames the 32-bit accumulator cannot hold before
        // consuming anything.
        let implied_bits = durations.len().saturating_sub(2) / 2;
        if implied_bits > MAX_BITS as usize {
            return Err(CodecError::BitCount {
                requested: implied_bits,
                max: MAX_BITS as usize,
            });
        }

        if !ignore_header {
            let header = durations.get(1).copied().unwrap_or(0);
            if !self.matcher.matches(header, HEADER_MARK) {
                debug!(measured = header, "header mark outside tolerance");
                return Err(CodecError::HeaderMark {
                    expected: HEADER_MARK,
                });
            }
        }

        // All scan state is local to this call.
        let mut value: u32 = 0;
        let mut bit_count: u8 = 0;
        let mut offset = 2; // skip the leading gap and the header mark

        while offset < durations.len() {
            if !self.matcher.matches(durations[offset], BIT_SPACE) {
                debug!(offset, measured = durations[offset], "data space outside tolerance");
                return Err(CodecError::DataSpace { expected: BIT_SPACE });
            }
            offset += 1;

            match durations.get(offset) {
                Some(&mark) if self.matcher.matches(mark, ONE_MARK) => {
                    value = (value << 1) | 1;
                }
                Some(&mark) if self.matcher.matches(mark, ZERO_MARK) => {
                    value <<= 1;
                }
                // Ambiguous mark, or a trailing space with no mark at all.
                _ => {
                    debug!(offset, "data mark matches neither bit duration");
                    return Err(CodecError::DataMark { expected: ZERO_MARK });
                }
            }
            offset += 1;
            bit_count += 1;
        }

        Ok(DecodedPacket {
            value,
            bit_count,
            protocol: ProtocolId::MilesTag,
        })
    }

    fn encode(
        &self,
        value: u32,
        bit_count: u8,
        carrier: CarrierFrequency,
    ) -> CodecResult<PulseTrain> {
        if bit_count == 0 || bit_count > MAX_BITS {
            return Err(CodecError::BitCount {
                requested: bit_count as usize,
                max: MAX_BITS as usize,
            });
        }
        if bit_count < 32 && value >> bit_count != 0 {
            return Err(CodecError::ValueOverflow { value, bit_count });
        }

        Ok(PulseTrain {
            durations: build_frame(&TIMING, value, bit_count),
            carrier,
            repeats: TIMING.repeats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Capture buffer for the given bits, all durations nominal.
    fn nominal_buffer(bits: &[u8]) -> Vec<Microseconds> {
        let mut buffer = vec![10_000, HEADER_MARK];
        for &bit in bits {
            buffer.push(BIT_SPACE);
            buffer.push(if bit == 1 { ONE_MARK } else { ZERO_MARK });
        }
        buffer
    }

    #[test]
    fn test_decode_concrete_two_bit_frame() {
        // [gap, 2400, 600, 1200, 600, 600]: marks 1200 then 600 read
        // MSB-first as binary 10.
        let codec = MilesTag::new();
        let packet = codec.decode(&[10_000, 2400, 600, 1200, 600, 600], false).unwrap();
        assert_eq!(packet.value, 0b10);
        assert_eq!(packet.bit_count, 2);
        assert_eq!(packet.protocol, ProtocolId::MilesTag);
    }

    #[test]
    fn test_decode_shot_packet() {
        let codec = MilesTag::new();
        let bits: Vec<u8> = (0..14).map(|i| ((0x2A5 >> (13 - i)) & 1) as u8).collect();
        let packet = codec.decode(&nominal_buffer(&bits), false).unwrap();
        assert_eq!(packet.value, 0x2A5);
        assert_eq!(packet.bit_count, SHOT_BITS);
        assert_eq!(PacketKind::from_bit_count(packet.bit_count), Some(PacketKind::Shot));
    }

    #[test]
    fn test_decode_tolerates_jittered_durations() {
        // Everything 20% long still lands inside the ±25% window.
        let codec = MilesTag::new();
        let packet = codec
            .decode(&[9_000, 2880, 720, 1440, 720, 720, 720, 1440], false)
            .unwrap();
        assert_eq!(packet.value, 0b101);
        assert_eq!(packet.bit_count, 3);
    }

    #[test]
    fn test_decode_rejects_bad_header() {
        let codec = MilesTag::new();
        let mut buffer = nominal_buffer(&[1, 0]);
        buffer[1] = 1500; // below 2400's lower edge of 1800
        assert_eq!(
            codec.decode(&buffer, false),
            Err(CodecError::HeaderMark { expected: HEADER_MARK })
        );
    }

    #[test]
    fn test_decode_ignore_header_skips_validation() {
        let codec = MilesTag::new();
        let mut buffer = nominal_buffer(&[1, 0]);
        buffer[1] = 1500;
        let packet = codec.decode(&buffer, true).unwrap();
        assert_eq!(packet.value, 0b10);
        assert_eq!(packet.bit_count, 2);
    }

    #[test]
    fn test_decode_rejects_bad_space_without_partial_value() {
        let codec = MilesTag::new();
        let mut buffer = nominal_buffer(&[1, 1, 1, 1]);
        buffer[6] = 1000; // third bit's space, above 600's upper edge of 750
        assert_eq!(
            codec.decode(&buffer, false),
            Err(CodecError::DataSpace { expected: BIT_SPACE })
        );
    }

    #[test]
    fn test_decode_rejects_ambiguous_mark() {
        // 800 us sits between the two mark windows: above 750, below 900.
        let codec = MilesTag::new();
        let mut buffer = nominal_buffer(&[1, 0]);
        buffer[3] = 800;
        assert_eq!(
            codec.decode(&buffer, false),
            Err(CodecError::DataMark { expected: ZERO_MARK })
        );
    }

    #[test]
    fn test_decode_mark_window_edges() {
        let codec = MilesTag::new();
        // 900 is 1200's inclusive lower edge → reads as a 1 bit.
        let packet = codec.decode(&[0, 2400, 600, 900], false).unwrap();
        assert_eq!(packet.value, 1);
        // 750 is 600's inclusive upper edge → reads as a 0 bit.
        let packet = codec.decode(&[0, 2400, 600, 750], false).unwrap();
        assert_eq!(packet.value, 0);
    }

    #[test]
    fn test_decode_rejects_trailing_space_without_mark() {
        let codec = MilesTag::new();
        let mut buffer = nominal_buffer(&[1, 0]);
        buffer.push(BIT_SPACE); // dangling space, no mark follows
        assert_eq!(
            codec.decode(&buffer, false),
            Err(CodecError::DataMark { expected: ZERO_MARK })
        );
    }

    #[test]
    fn test_decode_header_only_buffer_is_empty_packet() {
        let codec = MilesTag::new();
        let packet = codec.decode(&[10_000, 2400], false).unwrap();
        assert_eq!(packet.value, 0);
        assert_eq!(packet.bit_count, 0);
    }

    #[test]
    fn test_decode_short_buffer_fails_header_check() {
        let codec = MilesTag::new();
        assert_eq!(
            codec.decode(&[10_000], false),
            Err(CodecError::HeaderMark { expected: HEADER_MARK })
        );
        assert_eq!(
            codec.decode(&[], false),
            Err(CodecError::HeaderMark { expected: HEADER_MARK })
        );
    }

    #[test]
    fn test_decode_rejects_overlong_buffer() {
        let codec = MilesTag::new();
        let bits = vec![0u8; 33];
        assert_eq!(
            codec.decode(&nominal_buffer(&bits), false),
            Err(CodecError::BitCount { requested: 33, max: 32 })
        );
    }

    #[test]
    fn test_decode_accepts_full_32_bits() {
        let codec = MilesTag::new();
        let bits = vec![1u8; 32];
        let packet = codec.decode(&nominal_buffer(&bits), false).unwrap();
        assert_eq!(packet.value, u32::MAX);
        assert_eq!(packet.bit_count, 32);
    }

    #[test]
    fn test_encode_all_zeros_shot() {
        // Header mark, then 14 repetitions of (600 space, 600 mark).
        let codec = MilesTag::new();
        let train = codec.encode(0, SHOT_BITS, CarrierFrequency::Khz38).unwrap();
        assert_eq!(train.durations.len(), 1 + 2 * 14);
        assert_eq!(train.durations[0], HEADER_MARK);
        for pair in train.durations[1..].chunks(2) {
            assert_eq!(pair, &[BIT_SPACE, ZERO_MARK]);
        }
        assert_eq!(train.repeats, 1);
        assert_eq!(train.carrier, CarrierFrequency::Khz38);
    }

    #[test]
    fn test_encode_rejects_invalid_bit_counts() {
        let codec = MilesTag::new();
        assert_eq!(
            codec.encode(0, 0, CarrierFrequency::Khz38),
            Err(CodecError::BitCount { requested: 0, max: 32 })
        );
        assert_eq!(
            codec.encode(0, 33, CarrierFrequency::Khz38),
            Err(CodecError::BitCount { requested: 33, max: 32 })
        );
    }

    #[test]
    fn test_encode_rejects_oversized_value() {
        let codec = MilesTag::new();
        assert_eq!(
            codec.encode(0x10, 4, CarrierFrequency::Khz38),
            Err(CodecError::ValueOverflow { value: 0x10, bit_count: 4 })
        );
        // 0xF fits in 4 bits
        assert!(codec.encode(0xF, 4, CarrierFrequency::Khz38).is_ok());
        // full-width values are always representable
        assert!(codec.encode(u32::MAX, 32, CarrierFrequency::Khz38).is_ok());
    }

    #[test]
    fn test_round_trip_exhaustive_small_widths() {
        let codec = MilesTag::new();
        for bit_count in 1..=8u8 {
            for value in 0..(1u32 << bit_count) {
                let train = codec.encode(value, bit_count, CarrierFrequency::Khz38).unwrap();
                let packet = codec.decode(&train.to_capture_buffer(12_000), false).unwrap();
                assert_eq!(packet.value, value, "value mismatch at {} bits", bit_count);
                assert_eq!(packet.bit_count, bit_count);
            }
        }
    }

    #[test]
    fn test_round_trip_edge_values_wide_widths() {
        let codec = MilesTag::new();
        for bit_count in 9..=24u8 {
            let max = (1u64 << bit_count) as u32 - 1;
            for value in [0, 1, max / 2, max - 1, max] {
                let train = codec.encode(value, bit_count, CarrierFrequency::Khz38).unwrap();
                let packet = codec.decode(&train.to_capture_buffer(12_000), false).unwrap();
                assert_eq!(packet.value, value, "value mismatch at {} bits", bit_count);
                assert_eq!(packet.bit_count, bit_count);
            }
        }
    }

    #[test]
    fn test_packet_kind_classification() {
        assert_eq!(PacketKind::from_bit_count(14), Some(PacketKind::Shot));
        assert_eq!(PacketKind::from_bit_count(24), Some(PacketKind::Message));
        assert_eq!(PacketKind::from_bit_count(16), None);
    }

    #[test]
    fn test_custom_tolerance_narrows_acceptance() {
        let strict = MilesTag::with_tolerance(0.05);
        // 20% off is fine for the default codec, not for the strict one.
        let buffer = [9_000, 2880, 720, 1440];
        assert!(MilesTag::new().decode(&buffer, false).is_ok());
        assert_eq!(
            strict.decode(&buffer, false),
            Err(CodecError::HeaderMark { expected: HEADER_MARK })
        );
    }
}
