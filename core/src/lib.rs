//! Acoustic BFSK data modem
//!
//! Converts short messages into a continuous-phase two-tone waveform and
//! recovers them from a captured sample stream. Frames are flag-delimited
//! and CRC-16 checked; the receiver resynchronizes byte-by-byte after
//! corruption so one bad frame never swallows its neighbors.

pub mod config;
pub mod demodulator;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod goertzel;
pub mod modulator;

pub use config::ModemConfig;
pub use demodulator::Demodulator;
pub use encoder::Encoder;
pub use error::{ModemError, Result};

/// Sentinel byte marking the start of every frame.
pub const FLAG_BYTE: u8 = 0x7E;

/// Number of alternating warm-up bits sent ahead of the framed payload.
pub const PREAMBLE_BITS: usize = 64;

/// Largest payload the 16-bit length field can describe.
pub const MAX_PAYLOAD_SIZE: usize = 65535;
