//! Tolerance-aware pulse duration matching
//!
//! Receiver and transmitter clocks jitter, so a measured duration never
//! equals its nominal value exactly. A [`PulseMatcher`] accepts a measured
//! duration when it falls inside a fractional window around the nominal,
//! boundaries included: with the default ±25% window, a nominal 600 us
//! accepts 450..=750.
//!
//! The matcher is shared by all protocol codecs; the window fraction is a
//! parameter here, never hard-coded per protocol.
//!
//! ## Example
//!
//! ```rust
//! use irtag_core::tolerance::PulseMatcher;
//!
//! let matcher = PulseMatcher::default();
//! assert!(matcher.matches(750, 600));  // exactly on the +25% edge
//! assert!(!matcher.matches(751, 600)); // one microsecond beyond
//! ```

use crate::types::Microseconds;

/// Default fractional tolerance window (±25%).
pub const DEFAULT_TOLERANCE: f64 = 0.25;

/// Tolerance-aware duration comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseMatcher {
    /// Fractional half-width of the acceptance window.
    tolerance: f64,
}

impl PulseMatcher {
    /// Create a matcher with the given fractional tolerance
    /// (0.25 means ±25% around each nominal duration).
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// The fractional tolerance this matcher applies.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Inclusive lower edge of the window around `nominal`.
    pub fn lower_bound(&self, nominal: Microseconds) -> f64 {
        nominal as f64 * (1.0 - self.tolerance)
    }

    /// Inclusive upper edge of the window around `nominal`.
    pub fn upper_bound(&self, nominal: Microseconds) -> f64 {
        nominal as f64 * (1.0 + self.tolerance)
    }

    /// Whether `measured` falls inside the window around `nominal`.
    pub fn matches(&self, measured: Microseconds, nominal: Microseconds) -> bool {
        let m = measured as f64;
        m >= self.lower_bound(nominal) && m <= self.upper_bound(nominal)
    }
}

impl Default for PulseMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
