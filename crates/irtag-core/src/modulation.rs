//! Software IR front end — pulse trains to samples and back
//!
//! Real transmitters modulate each mark onto a carrier with a PWM pin and
//! receivers time the demodulated edges with an interrupt-driven counter.
//! This module is the software loopback equivalent: [`IrModulator`]
//! renders a [`PulseTrain`] to I/Q samples (carrier during marks, silence
//! during spaces, phase-continuous across gaps), and
//! [`capture_durations`] run-length measures a sample stream back into
//! the duration-buffer layout decoders consume.
//!
//! ## Example
//!
//! ```rust
//! use irtag_core::modulation::{capture_durations, IrModulator, DEFAULT_SAMPLE_RATE};
//! use irtag_core::protocol::milestag::MilesTag;
//! use irtag_core::protocol::ProtocolCodec;
//! use irtag_core::pulse::CarrierFrequency;
//!
//! let codec = MilesTag::new();
//! let train = codec.encode(0b10, 2, CarrierFrequency::Khz38).unwrap();
//!
//! let modulator = IrModulator::new(DEFAULT_SAMPLE_RATE);
//! let samples = modulator.modulate(&train);
//! let captured = capture_durations(&samples, DEFAULT_SAMPLE_RATE);
//!
//! let packet = codec.decode(&captured, false).unwrap();
//! assert_eq!(packet.value, 0b10);
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::pulse::PulseTrain;
use crate::types::Microseconds;

/// A single I/Q sample point.
pub type IQSample = Complex64;

/// Default sample rate: one sample per microsecond, comfortably above the
/// highest supported carrier (56 kHz).
pub const DEFAULT_SAMPLE_RATE: f64 = 1_000_000.0;

/// Idle time inserted between frames when a train repeats.
const INTER_FRAME_GAP: Microseconds = 10_000;

/// Renders pulse trains to I/Q samples.
#[derive(Debug, Clone)]
pub struct IrModulator {
    sample_rate: f64,
    amplitude: f64,
}

impl IrModulator {
    /// Create a modulator at the given sample rate.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            amplitude: 1.0,
        }
    }

    /// Set the carrier amplitude (default 1.0).
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// The configured sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples covering `duration`.
    fn samples_for(&self, duration: Microseconds) -> usize {
        (duration as f64 * 1e-6 * self.sample_rate).round() as usize
    }

    /// Render a pulse train to I/Q samples.
    ///
    /// Even-indexed durations are marks (carrier on), odd-indexed are
    /// spaces (silence). The carrier phase keeps running through spaces so
    /// marks stay phase-continuous. Trains with `repeats > 1` are rendered
    /// back to back with an idle gap between frames.
    pub fn modulate(&self, train: &PulseTrain) -> Vec<IQSample> {
        let omega = 2.0 * PI * train.carrier.hz() / self.sample_rate;
        let mut samples = Vec::new();
        let mut phase = 0.0_f64;

        for frame in 0..train.repeats.max(1) {
            if frame > 0 {
                let n = self.samples_for(INTER_FRAME_GAP);
                samples.resize(samples.len() + n, Complex64::new(0.0, 0.0));
                phase += omega * n as f64;
            }
            for (i, &duration) in train.durations.iter().enumerate() {
                let n = self.samples_for(duration);
                if i % 2 == 0 {
                    for _ in 0..n {
                        samples.push(Complex64::new(
                            self.amplitude * phase.cos(),
                            self.amplitude * phase.sin(),
                        ));
                        phase += omega;
                    }
                } else {
                    samples.resize(samples.len() + n, Complex64::new(0.0, 0.0));
                    phase += omega * n as f64;
                }
            }
        }

        samples
    }
}

/// Measure a sample stream back into a capture-style duration buffer.
///
/// Output layout matches what decoders expect: index 0 is the leading gap
/// (zero when the stream opens with carrier), index 1 the first mark,
/// then alternating space/mark durations. A trailing silent run is
/// dropped, so the buffer always ends on a mark. Carrier-on is decided
/// per sample against half the stream's peak power; an all-silent stream
/// yields just the gap entry.
pub fn capture_durations(samples: &[IQSample], sample_rate: f64) -> Vec<Microseconds> {
    let us_per_sample = 1e6 / sample_rate;
    let peak = samples.iter().map(|s| s.norm_sqr()).fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return vec![(samples.len() as f64 * us_per_sample).round() as Microseconds];
    }
    let threshold = peak * 0.5;

    let mut durations = Vec::new();
    let mut carrier_on = false; // buffers open with the leading gap
    let mut run = 0usize;

    for s in samples {
        let on = s.norm_sqr() > threshold;
        if on == carrier_on {
            run += 1;
        } else {
            durations.push((run as f64 * us_per_sample).round() as Microseconds);
            carrier_on = on;
            run = 1;
        }
    }
    if carrier_on {
        durations.push((run as f64 * us_per_sample).round() as Microseconds);
    }

    durations
}
