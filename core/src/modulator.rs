use std::f64::consts::PI;

use crate::config::ModemConfig;
use crate::PREAMBLE_BITS;

/// Expand bytes into bits, MSB first, preserving byte order.
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Alternating warm-up bits (0,1,0,1,...) sent before the frame so the
/// receive channel can settle. The decoder never correlates against them;
/// frame discovery is entirely flag+CRC driven.
pub fn preamble_bits() -> Vec<u8> {
    (0..PREAMBLE_BITS).map(|i| (i % 2) as u8).collect()
}

/// Continuous-phase BFSK synthesizer.
///
/// One phase accumulator runs across the whole bit sequence; a reset per
/// bit would put a discontinuity at every symbol boundary and leak energy
/// into the detector's neighboring bins. The accumulator is never reduced
/// modulo 2π; it is kept in f64 so the drift over a message-length burst
/// stays far below a sample period.
pub struct FskModulator {
    config: ModemConfig,
}

impl FskModulator {
    pub fn new(config: ModemConfig) -> Self {
        Self { config }
    }

    /// Modulate a bit sequence into `bits.len() * samples_per_symbol`
    /// audio samples in `[-volume, volume]`.
    pub fn modulate(&self, bits: &[u8]) -> Vec<f32> {
        let sps = self.config.samples_per_symbol();
        let inc0 = 2.0 * PI * self.config.f0 as f64 / self.config.sample_rate as f64;
        let inc1 = 2.0 * PI * self.config.f1 as f64 / self.config.sample_rate as f64;
        let volume = self.config.volume as f64;

        let mut samples = Vec::with_capacity(bits.len() * sps);
        let mut phase = 0.0f64;
        for &bit in bits {
            let inc = if bit == 1 { inc1 } else { inc0 };
            for _ in 0..sps {
                samples.push((phase.sin() * volume) as f32);
                phase += inc;
            }
        }
        samples
    }
}
