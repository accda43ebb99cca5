//! Protocol codec framework
//!
//! Every infrared protocol exposes the same capability set (decode a
//! captured duration buffer, encode a value into a pulse train) behind
//! the [`ProtocolCodec`] trait, with one concrete implementation per
//! protocol. A dispatch layer selects a codec through [`CodecRegistry`]
//! by name; there is no automatic try-every-protocol detection here.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               ProtocolCodec                  │
//! │   ┌────────┐   ┌────────┐   ┌────────┐       │
//! │   │ decode │   │ encode │   │  info  │       │
//! │   └────────┘   └────────┘   └────────┘       │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//!                 ┌────────────┐
//!                 │  MilesTag  │
//!                 └────────────┘
//! ```

#[cfg(feature = "milestag")]
pub mod milestag;

use std::fmt::Debug;

use serde::Serialize;

use crate::pulse::{CarrierFrequency, PulseTrain};
use crate::types::{CodecResult, DecodedPacket, Microseconds};

/// Information about a protocol codec for display and selection.
#[derive(Debug, Clone, Serialize)]
pub struct CodecInfo {
    /// Short name used for registry lookup (e.g. "MilesTag").
    pub name: &'static str,
    /// Full protocol name.
    pub full_name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Carrier the protocol is normally transmitted on.
    pub default_carrier: CarrierFrequency,
    /// Key timing characteristics for reference.
    pub characteristics: &'static [&'static str],
}

/// A single infrared protocol's decode and encode capability set.
///
/// Implementations hold only configuration (timing constants, tolerance),
/// never scan state: decode and encode run to completion within one call,
/// so a codec can be shared across threads freely.
pub trait ProtocolCodec: Debug + Send + Sync {
    /// Get information about this codec.
    fn info(&self) -> CodecInfo;

    /// Reconstruct (value, bit count) from a captured duration buffer.
    ///
    /// `durations[0]` is the leading idle gap (ignored), `durations[1]`
    /// the header mark, then alternating (space, mark) pairs. Set
    /// `ignore_header` when an earlier attempt already validated the
    /// header mark; the scan then starts directly at the first pair.
    fn decode(
        &self,
        durations: &[Microseconds],
        ignore_header: bool,
    ) -> CodecResult<DecodedPacket>;

    /// Produce the pulse train carrying `value` in `bit_count` bits.
    fn encode(
        &self,
        value: u32,
        bit_count: u8,
        carrier: CarrierFrequency,
    ) -> CodecResult<PulseTrain>;
}

/// Registry for creating protocol codecs by name.
pub struct CodecRegistry;

impl CodecRegistry {
    /// List the codecs compiled into this build.
    pub fn list() -> Vec<&'static str> {
        let mut codecs = Vec::new();
        #[cfg(feature = "milestag")]
        codecs.push("MilesTag");
        codecs
    }

    /// Create a codec by name with default parameters.
    ///
    /// Lookup is case-insensitive and ignores `-`/`_` separators. Returns
    /// `None` for unknown names and for codecs left out of the build.
    pub fn create(name: &str) -> Option<Box<dyn ProtocolCodec>> {
        match name.to_uppercase().replace(['-', '_'], "").as_str() {
            #[cfg(feature = "milestag")]
            "MILESTAG" | "MILESTAG2" => Some(Box::new(milestag::MilesTag::new())),
            _ => None,
        }
    }
}
