//! Pulse train construction for infrared transmission
//!
//! A [`PulseTrain`] is the wire format of this library: an ordered
//! mark/space duration sequence ready for carrier modulation, starting
//! with a mark. [`build_frame`] is the generic builder shared by header +
//! variable-mark protocols: a codec supplies its [`FrameTiming`] record
//! and the payload, and gets the duration sequence back.
//!
//! ## Example
//!
//! ```rust
//! use irtag_core::pulse::{build_frame, FrameTiming};
//!
//! let timing = FrameTiming {
//!     header_mark: 2400,
//!     header_space: 600,
//!     one_mark: 1200,
//!     zero_mark: 600,
//!     bit_space: 600,
//!     repeats: 1,
//! };
//! // 0b10 encodes as header, then (space, one mark), (space, zero mark)
//! let durations = build_frame(&timing, 0b10, 2);
//! assert_eq!(durations, vec![2400, 600, 1200, 600, 600]);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Microseconds;

/// Carrier frequencies the protocol family allows.
///
/// 38 kHz is the default; it matches the most common receiver modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierFrequency {
    /// 38 kHz (default).
    #[default]
    Khz38,
    /// 40 kHz.
    Khz40,
    /// 56 kHz.
    Khz56,
}

impl CarrierFrequency {
    /// Carrier frequency in kilohertz.
    pub fn khz(&self) -> u32 {
        match self {
            CarrierFrequency::Khz38 => 38,
            CarrierFrequency::Khz40 => 40,
            CarrierFrequency::Khz56 => 56,
        }
    }

    /// Carrier frequency in hertz.
    pub fn hz(&self) -> f64 {
        self.khz() as f64 * 1000.0
    }
}

/// An ordered duration sequence ready for modulated transmission.
///
/// `durations[0]` is the first mark; marks and spaces then alternate.
/// The leading idle gap that capture buffers carry is *not* part of a
/// train; it exists only on the receive side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseTrain {
    /// Alternating mark/space durations, starting with a mark.
    pub durations: Vec<Microseconds>,
    /// Carrier the marks are modulated on.
    pub carrier: CarrierFrequency,
    /// Number of times the frame is transmitted (1 = sent once).
    pub repeats: u8,
}

impl PulseTrain {
    /// Total on-air time of one frame in microseconds.
    pub fn frame_duration(&self) -> Microseconds {
        self.durations.iter().sum()
    }

    /// Prepend a leading gap, producing the buffer layout the capture
    /// subsystem hands to decoders: index 0 the gap, index 1 the first mark.
    pub fn to_capture_buffer(&self, leading_gap: Microseconds) -> Vec<Microseconds> {
        let mut buffer = Vec::with_capacity(self.durations.len() + 1);
        buffer.push(leading_gap);
        buffer.extend_from_slice(&self.durations);
        buffer
    }
}

/// Timing parameters for a generic header + variable-mark frame.
///
/// One record per protocol. `header_space` is the space between the
/// header mark and the first data mark; some protocols collapse it with
/// `bit_space`, in which case the two are simply equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTiming {
    /// Leading mark announcing the frame.
    pub header_mark: Microseconds,
    /// Space between the header mark and the first data mark.
    pub header_space: Microseconds,
    /// Mark duration encoding a 1 bit.
    pub one_mark: Microseconds,
    /// Mark duration encoding a 0 bit.
    pub zero_mark: Microseconds,
    /// Space between consecutive data marks.
    pub bit_space: Microseconds,
    /// Frames per transmission (1 = sent once).
    pub repeats: u8,
}

/// Build the duration sequence for one frame.
///
/// Emits the header mark, then one (space, mark) pair per data bit,
/// MSB-first, mirroring decode order. The caller validates `bit_count`
/// and `value`; bits of `value` above `bit_count` are not emitted.
pub fn build_frame(timing: &FrameTiming, value: u32, bit_count: u8) -> Vec<Microseconds> {
    let mut durations = Vec::with_capacity(1 + 2 * bit_count as usize);
    durations.push(timing.header_mark);
    for i in (0..bit_count).rev() {
        let space = if i + 1 == bit_count {
            timing.header_space
        } else {
            timing.bit_space
        };
        durations.push(space);
        if (value >> i) & 1 == 1 {
            durations.push(timing.one_mark);
        } else {
            durations.push(timing.zero_mark);
        }
    }
    durations
}
