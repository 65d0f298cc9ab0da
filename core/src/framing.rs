use crate::error::{ModemError, Result};
use crate::{FLAG_BYTE, MAX_PAYLOAD_SIZE};

/// CRC-16 (poly 0xA001, init 0xFFFF) for payload integrity verification
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Wrap a payload in a flag-delimited, checksummed frame.
///
/// Layout: flag byte, payload length (2 bytes, big-endian), payload,
/// CRC-16 over the payload (2 bytes, big-endian). Always exactly
/// `5 + payload.len()` bytes.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ModemError::PayloadTooLarge(payload.len()));
    }
    let length = payload.len() as u16;
    let crc = crc16(payload);

    let mut frame = Vec::with_capacity(5 + payload.len());
    frame.push(FLAG_BYTE);
    frame.push((length >> 8) as u8);
    frame.push(length as u8);
    frame.extend_from_slice(payload);
    frame.push((crc >> 8) as u8);
    frame.push(crc as u8);
    Ok(frame)
}

/// Scan a byte stream for complete, CRC-verified frames.
///
/// Returns accepted payloads in arrival order plus the unconsumed tail;
/// the caller prefixes that tail onto the next call's input. A frame cut
/// off by the end of the buffer stays in the tail, starting at its flag
/// byte. A flag whose tentative frame fails the CRC is a false positive:
/// the scan advances a single byte and keeps looking, so a corrupted
/// frame never swallows valid frames behind it.
pub fn deframe(stream: &[u8]) -> (Vec<Vec<u8>>, Vec<u8>) {
    let mut payloads = Vec::new();
    let mut i = 0;
    while i + 5 <= stream.len() {
        if stream[i] != FLAG_BYTE {
            i += 1;
            continue;
        }
        let length = ((stream[i + 1] as usize) << 8) | stream[i + 2] as usize;
        let end = i + 5 + length;
        if end > stream.len() {
            // frame still in flight, wait for more bytes
            break;
        }
        let payload = &stream[i + 3..i + 3 + length];
        let stored = ((stream[end - 2] as u16) << 8) | stream[end - 1] as u16;
        if crc16(payload) == stored {
            payloads.push(payload.to_vec());
            i = end;
        } else {
            log::trace!("crc mismatch for flag at offset {i}, resyncing");
            i += 1;
        }
    }
    (payloads, stream[i..].to_vec())
}
