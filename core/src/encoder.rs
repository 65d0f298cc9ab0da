use crate::config::ModemConfig;
use crate::error::Result;
use crate::framing::encode_frame;
use crate::modulator::{bytes_to_bits, preamble_bits, FskModulator};

/// Transmit pipeline: frame a payload and synthesize the full waveform,
/// warm-up preamble included.
pub struct Encoder {
    modulator: FskModulator,
}

impl Encoder {
    pub fn new(config: ModemConfig) -> Self {
        Self {
            modulator: FskModulator::new(config),
        }
    }

    /// Encode one payload into audio samples: preamble bits, then the
    /// framed payload, through the same FSK mapping. Fails only if the
    /// payload exceeds the length field.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<f32>> {
        let frame = encode_frame(payload)?;
        let mut bits = preamble_bits();
        bits.extend(bytes_to_bits(&frame));
        Ok(self.modulator.modulate(&bits))
    }
}
