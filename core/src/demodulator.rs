use crate::config::ModemConfig;
use crate::framing::deframe;
use crate::goertzel::goertzel_power;

/// Streaming BFSK demodulator.
///
/// Consumes whole-symbol sample blocks, decides one bit per block by
/// comparing tone power at f0 and f1, packs bits into bytes MSB first and
/// runs the deframer over the accumulated byte stream. All state survives
/// across calls, so a message may arrive split over any number of capture
/// blocks; nothing is ever reset implicitly.
pub struct Demodulator {
    config: ModemConfig,
    /// Partial byte being assembled, high bits first.
    acc: u8,
    /// Bits currently held in `acc`, 0..=7.
    bits_filled: u8,
    /// Bytes not yet consumed into a verified frame (deframer remainder).
    pending: Vec<u8>,
}

impl Demodulator {
    pub fn new(config: ModemConfig) -> Self {
        Self {
            config,
            acc: 0,
            bits_filled: 0,
            pending: Vec::new(),
        }
    }

    /// Decode a buffer of samples and return any payloads completed by it,
    /// in arrival order.
    ///
    /// Aligning the input to whole symbols is the caller's job; a trailing
    /// partial block is ignored. Corrupted frames produce no output and no
    /// error, they are absorbed by the deframer's resync rule.
    pub fn process(&mut self, samples: &[f32]) -> Vec<Vec<u8>> {
        let sps = self.config.samples_per_symbol();
        let mut messages = Vec::new();

        for block in samples.chunks_exact(sps) {
            let p0 = goertzel_power(block, self.config.f0, self.config.sample_rate);
            let p1 = goertzel_power(block, self.config.f1, self.config.sample_rate);
            // equal powers decide 0
            let bit = u8::from(p1 > p0);

            self.acc = (self.acc << 1) | bit;
            self.bits_filled += 1;
            if self.bits_filled < 8 {
                continue;
            }

            self.pending.push(self.acc);
            self.acc = 0;
            self.bits_filled = 0;

            let (payloads, remainder) = deframe(&self.pending);
            if !payloads.is_empty() {
                log::debug!("verified {} frame(s)", payloads.len());
                messages.extend(payloads);
            }
            self.pending = remainder;
        }
        messages
    }
}
