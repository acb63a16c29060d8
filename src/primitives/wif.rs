//! Wallet Import Format for single private keys.

use crate::primitives::{base58check, ec};
use crate::{HdkError, Result};
use secp256k1::SecretKey;
use std::fmt;
use std::str::FromStr;

const COMPRESSED_FLAG: u8 = 0x01;

/// A private key together with its WIF prefix and compression flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateKeyWif {
    pub key: SecretKey,
    pub prefix: u8,
    pub compressed: bool,
}

/// Encodes `prefix || scalar`, plus a trailing 0x01 when the public key is compressed.
pub fn encode_wif(key: &SecretKey, prefix: u8, compressed: bool) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(prefix);
    payload.extend_from_slice(&key.secret_bytes());
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }
    base58check::encode(&payload)
}

pub fn decode_wif(wif: &str) -> Result<PrivateKeyWif> {
    let payload = base58check::decode(wif)?;
    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSED_FLAG => true,
        34 => {
            return Err(HdkError::InvalidKeyMaterial(format!(
                "Invalid compression flag: {:#04x}",
                payload[33]
            )))
        }
        actual => return Err(HdkError::WrongLength { expected: 34, actual }),
    };
    let key = ec::parse_scalar(&payload[1..33])?;
    Ok(PrivateKeyWif {
        key,
        prefix: payload[0],
        compressed,
    })
}

impl fmt::Display for PrivateKeyWif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_wif(&self.key, self.prefix, self.compressed))
    }
}

impl FromStr for PrivateKeyWif {
    type Err = HdkError;

    fn from_str(s: &str) -> Result<Self> {
        decode_wif(s)
    }
}
