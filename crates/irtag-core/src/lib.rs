//! # Infrared Pulse Codec Library
//!
//! This crate implements encoding and decoding for the MilesTag infrared
//! protocol used by DIY laser-tag transmitters, together with the shared
//! plumbing a protocol codec needs: tolerance-aware duration matching, a
//! generic frame builder, a codec registry, and a software IR front end
//! for loopback testing without hardware.
//!
//! ## Signal flow
//!
//! ```text
//! TX: (value, bits) → frame builder → PulseTrain → carrier modulation → IR
//! RX: IR → demodulated edges → duration buffer → decode → DecodedPacket
//! ```
//!
//! The capture side hands decoders a duration buffer whose index 0 is the
//! idle gap before the frame; everything after alternates mark/space. All
//! decode state is local to the call, so codecs are freely shareable
//! across threads.
//!
//! ## Example
//!
//! ```rust
//! use irtag_core::prelude::*;
//!
//! let codec = MilesTag::new();
//!
//! // Encode a 14-bit shot packet for 38 kHz transmission
//! let train = codec.encode(0x2A5, 14, CarrierFrequency::Khz38).unwrap();
//!
//! // A capture of the same frame decodes back to the packet
//! let captured = train.to_capture_buffer(10_000);
//! let packet = codec.decode(&captured, false).unwrap();
//! assert_eq!(packet.value, 0x2A5);
//! assert_eq!(packet.bit_count, 14);
//! ```

pub mod jitter;
pub mod modulation;
pub mod protocol;
pub mod pulse;
pub mod tolerance;
pub mod types;

// Re-export key types at the crate root for ergonomic `use irtag_core::*`.
pub use modulation::{capture_durations, IrModulator, IQSample};
#[cfg(feature = "milestag")]
pub use protocol::milestag::MilesTag;
pub use protocol::{CodecInfo, CodecRegistry, ProtocolCodec};
pub use pulse::{build_frame, CarrierFrequency, FrameTiming, PulseTrain};
pub use tolerance::PulseMatcher;
pub use types::{CodecError, CodecResult, DecodedPacket, DurationBuffer, Microseconds, ProtocolId};

/// Convenience prelude pulling in the types most callers need.
pub mod prelude {
    pub use crate::modulation::{capture_durations, IrModulator};
    #[cfg(feature = "milestag")]
    pub use crate::protocol::milestag::MilesTag;
    pub use crate::protocol::{CodecRegistry, ProtocolCodec};
    pub use crate::pulse::{CarrierFrequency, PulseTrain};
    pub use crate::types::{CodecError, CodecResult, DecodedPacket, ProtocolId};
}
