//! Four-byte double-SHA256 checksums.

use crate::primitives::hash::sha256d;
use crate::{HdkError, Result};
use subtle::ConstantTimeEq;

pub const CHECKSUM_LEN: usize = 4;

/// The first four bytes of SHA256(SHA256(data)).
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = sha256d(data);
    let mut tag = [0u8; CHECKSUM_LEN];
    tag.copy_from_slice(&hash[..CHECKSUM_LEN]);
    tag
}

/// Returns `data || checksum(data)`.
pub fn append_checksum(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum(data));
    out
}

/// Validates the trailing checksum and returns the payload in front of it.
pub fn verify_and_strip(data: &[u8]) -> Result<&[u8]> {
    if data.len() < CHECKSUM_LEN {
        return Err(HdkError::MissingChecksum(data.len()));
    }
    let (payload, tag) = data.split_at(data.len() - CHECKSUM_LEN);
    if !bool::from(tag.ct_eq(&checksum(payload))) {
        return Err(HdkError::ChecksumMismatch);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_sha256d_prefix() {
        let data = b"hello";
        assert_eq!(checksum(data), [0x95, 0x95, 0xc9, 0xdf]);
    }

    #[test]
    fn test_append_then_verify() {
        let data = b"payload bytes";
        let with_checksum = append_checksum(data);
        assert_eq!(with_checksum.len(), data.len() + CHECKSUM_LEN);
        assert_eq!(verify_and_strip(&with_checksum).unwrap(), data);
    }

    #[test]
    fn test_empty_payload() {
        let with_checksum = append_checksum(&[]);
        assert_eq!(with_checksum.len(), CHECKSUM_LEN);
        assert!(verify_and_strip(&with_checksum).unwrap().is_empty());
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            verify_and_strip(&[1, 2, 3]),
            Err(HdkError::MissingChecksum(3))
        ));
    }

    #[test]
    fn test_every_bit_flip_is_detected() {
        let with_checksum = append_checksum(&[0x00, 0x01, 0x02, 0x03, 0x04]);
        for byte in 0..with_checksum.len() {
            for bit in 0..8 {
                let mut corrupted = with_checksum.clone();
                corrupted[byte] ^= 1 << bit;
                assert!(matches!(
                    verify_and_strip(&corrupted),
                    Err(HdkError::ChecksumMismatch)
                ));
            }
        }
    }
}
