//! Core types for infrared pulse coding
//!
//! This module defines the fundamental types shared by every protocol codec:
//! duration measurements, decoded packets, and the error taxonomy.
//!
//! ## Duration buffers
//!
//! Capture hardware reports a frame as an ordered list of durations in
//! microseconds, alternating mark (carrier on) and space (carrier off):
//!
//! ```text
//! index:    0      1        2      3      4      5
//!         [ gap | header | space | mark | space | mark | ... ]
//!           ^      ^
//!           |      first mark of the frame
//!           idle time before the frame; decoders ignore it
//! ```
//!
//! Buffers are owned by the capture side; decoders take a read-only borrow
//! and keep all scan state local to the call, so concurrent decodes of
//! independent buffers need no locking.

use serde::{Deserialize, Serialize};

/// A pulse duration measurement in microseconds.
pub type Microseconds = u32;

/// An owned mark/space duration sequence.
pub type DurationBuffer = Vec<Microseconds>;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while decoding a captured frame or building one to send.
///
/// Decode errors are terminal for the attempt and carry the nominal
/// duration the scanner expected, for diagnostic reporting. None of them
/// are fatal to the caller; a malformed capture simply yields no packet
/// for this protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The first mark of the frame does not match the header duration.
    #[error("header mark outside tolerance (expected {expected} us)")]
    HeaderMark { expected: Microseconds },

    /// An inter-bit space does not match the fixed space duration.
    #[error("data space outside tolerance (expected {expected} us)")]
    DataSpace { expected: Microseconds },

    /// A data mark matches neither the one-bit nor the zero-bit duration,
    /// or the mark is missing entirely after a valid space.
    #[error("data mark outside tolerance (expected {expected} us or a multiple)")]
    DataMark { expected: Microseconds },

    /// The frame implies more bits than the value accumulator can hold.
    #[error("bit count {requested} outside supported range 1..={max}")]
    BitCount { requested: usize, max: usize },

    /// The value to encode does not fit in the requested bit count.
    #[error("value {value:#x} does not fit in {bit_count} bits")]
    ValueOverflow { value: u32, bit_count: u8 },
}

/// Identifies which protocol produced a decoded packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolId {
    /// MilesTag v2 laser-tag protocol.
    MilesTag,
}

/// A successfully decoded frame.
///
/// Produced fresh by each decode call; nothing is shared between calls.
/// `bit_count` always equals the number of (space, mark) pairs consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPacket {
    /// Frame payload, MSB-first as received.
    pub value: u32,
    /// Number of data bits in the frame.
    pub bit_count: u8,
    /// Protocol that matched the frame.
    pub protocol: ProtocolId,
}
