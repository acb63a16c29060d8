//! Base58Check: Base58 with a four-byte checksum and leading-zero preservation.

use crate::primitives::basen::BASE58;
use crate::primitives::checksum::{append_checksum, verify_and_strip};
use crate::{HdkError, Result};

/// Base58-encodes `bytes`, writing one zero symbol per leading 0x00 byte.
pub fn encode_padded(bytes: &[u8]) -> String {
    let n_pad = bytes.iter().take_while(|&&b| b == 0).count();
    let mut encoded: String = std::iter::repeat(BASE58.zero_symbol()).take(n_pad).collect();
    encoded.push_str(&BASE58.encode(bytes));
    encoded
}

/// Inverse of [`encode_padded`]: one 0x00 byte per leading zero symbol.
pub fn decode_padded(text: &str) -> Result<Vec<u8>> {
    let zero = BASE58.zero_symbol();
    let n_pad = text.chars().take_while(|&c| c == zero).count();
    // The zero symbol is ASCII, so `n_pad` is also a byte offset.
    let decoded = BASE58.decode(&text[n_pad..]).map_err(|e| match e {
        HdkError::InvalidCharacter { character, position } => HdkError::InvalidCharacter {
            character,
            position: position + n_pad,
        },
        other => other,
    })?;
    let mut bytes = vec![0u8; n_pad];
    bytes.extend_from_slice(&decoded);
    Ok(bytes)
}

/// Appends a checksum to `payload` and Base58-encodes the result.
pub fn encode(payload: &[u8]) -> String {
    encode_padded(&append_checksum(payload))
}

/// Decodes a Base58Check string and returns the payload without its checksum.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let bytes = decode_padded(text)?;
    let payload = verify_and_strip(&bytes).map_err(|e| {
        log::debug!("Base58Check checksum validation failed: {}", e);
        e
    })?;
    Ok(payload.to_vec())
}
