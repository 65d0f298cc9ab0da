//! Single-bin tone power estimation.

use std::f32::consts::PI;

/// Estimate signal power at `freq` over one symbol's worth of samples
/// using the Goertzel recurrence. Far cheaper than a full transform when
/// only two bins matter. The returned magnitude-squared value is only
/// meaningful comparatively (power at f0 vs power at f1), not as a
/// calibrated measurement.
pub fn goertzel_power(block: &[f32], freq: f32, sample_rate: u32) -> f32 {
    let n = block.len();
    let k = (0.5 + n as f32 * freq / sample_rate as f32) as usize;
    let omega = 2.0 * PI * k as f32 / n as f32;
    let cos_w = omega.cos();
    let sin_w = omega.sin();
    let coeff = 2.0 * cos_w;

    let mut q1 = 0.0f32;
    let mut q2 = 0.0f32;
    for &sample in block {
        let q0 = coeff * q1 - q2 + sample;
        q2 = q1;
        q1 = q0;
    }

    let real = q1 - q2 * cos_w;
    let imag = q2 * sin_w;
    real * real + imag * imag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModemConfig;
    use crate::modulator::FskModulator;

    #[test]
    fn test_on_frequency_power_dominates() {
        let config = ModemConfig::default();
        let modulator = FskModulator::new(config);
        let sps = config.samples_per_symbol();

        let tone0 = modulator.modulate(&[0]);
        assert_eq!(tone0.len(), sps);
        let p0 = goertzel_power(&tone0, config.f0, config.sample_rate);
        let p1 = goertzel_power(&tone0, config.f1, config.sample_rate);
        assert!(p0 > 10.0 * p1, "p0={p0} p1={p1}");

        let tone1 = modulator.modulate(&[1]);
        let p0 = goertzel_power(&tone1, config.f0, config.sample_rate);
        let p1 = goertzel_power(&tone1, config.f1, config.sample_rate);
        assert!(p1 > 10.0 * p0, "p0={p0} p1={p1}");
    }

    #[test]
    fn test_silence_has_zero_power() {
        let block = vec![0.0f32; 120];
        assert_eq!(goertzel_power(&block, 3200.0, 48000), 0.0);
    }
}
