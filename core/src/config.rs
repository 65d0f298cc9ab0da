use crate::error::{ModemError, Result};

/// Session-wide modem parameters, shared by the modulator, the tone
/// detector and the demodulator. Validated once at construction and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
    /// Tone frequency for bit 0, Hz.
    pub f0: f32,
    /// Tone frequency for bit 1, Hz.
    pub f1: f32,
    /// Symbol rate in baud (one bit per symbol).
    pub symbol_rate: u32,
    /// Output amplitude scale in `[0, 1]`.
    pub volume: f32,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            f0: 3200.0,
            f1: 4200.0,
            symbol_rate: 400,
            volume: 0.6,
        }
    }
}

impl ModemConfig {
    /// Build a validated configuration. Invalid parameters fail here, at
    /// session start, rather than being coerced later.
    pub fn new(sample_rate: u32, f0: f32, f1: f32, symbol_rate: u32, volume: f32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ModemError::InvalidConfig(
                "sample rate must be positive".into(),
            ));
        }
        if symbol_rate == 0 {
            return Err(ModemError::InvalidConfig(
                "symbol rate must be positive".into(),
            ));
        }
        if !(f0 > 0.0) || !(f1 > 0.0) {
            return Err(ModemError::InvalidConfig(format!(
                "tone frequencies must be positive (got f0={f0}, f1={f1})"
            )));
        }
        if f0 == f1 {
            return Err(ModemError::InvalidConfig(format!(
                "f0 and f1 must differ (both {f0} Hz)"
            )));
        }
        if !(0.0..=1.0).contains(&volume) {
            return Err(ModemError::InvalidConfig(format!(
                "volume must be within 0.0..=1.0 (got {volume})"
            )));
        }
        Ok(Self {
            sample_rate,
            f0,
            f1,
            symbol_rate,
            volume,
        })
    }

    /// Samples carrying one bit. Never less than 1.
    pub fn samples_per_symbol(&self) -> usize {
        let sps = (self.sample_rate as f64 / self.symbol_rate as f64).round() as usize;
        sps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ModemConfig::default();
        let rebuilt = ModemConfig::new(
            config.sample_rate,
            config.f0,
            config.f1,
            config.symbol_rate,
            config.volume,
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_samples_per_symbol() {
        let config = ModemConfig::new(48000, 3200.0, 4200.0, 400, 0.6).unwrap();
        assert_eq!(config.samples_per_symbol(), 120);

        // Rounded, not truncated
        let config = ModemConfig::new(44100, 3200.0, 4200.0, 400, 0.6).unwrap();
        assert_eq!(config.samples_per_symbol(), 110);
    }

    #[test]
    fn test_samples_per_symbol_floor_of_one() {
        let config = ModemConfig::new(100, 10.0, 20.0, 400, 0.6).unwrap();
        assert_eq!(config.samples_per_symbol(), 1);
    }

    #[test]
    fn test_rejects_equal_frequencies() {
        let result = ModemConfig::new(48000, 3200.0, 3200.0, 400, 0.6);
        assert!(matches!(result, Err(ModemError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_rates() {
        assert!(ModemConfig::new(0, 3200.0, 4200.0, 400, 0.6).is_err());
        assert!(ModemConfig::new(48000, 3200.0, 4200.0, 0, 0.6).is_err());
    }

    #[test]
    fn test_rejects_nonpositive_frequencies() {
        assert!(ModemConfig::new(48000, 0.0, 4200.0, 400, 0.6).is_err());
        assert!(ModemConfig::new(48000, 3200.0, -1.0, 400, 0.6).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_volume() {
        assert!(ModemConfig::new(48000, 3200.0, 4200.0, 400, 1.5).is_err());
        assert!(ModemConfig::new(48000, 3200.0, 4200.0, 400, -0.1).is_err());
    }
}
