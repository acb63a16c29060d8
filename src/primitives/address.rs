//! Base58Check addresses: a version byte followed by a 20-byte hash.

use crate::primitives::base58check;
use crate::primitives::hash::hash160;
use crate::types::NetworkParams;
use crate::{HdkError, Result};
use secp256k1::PublicKey;
use std::fmt;
use std::str::FromStr;

pub const HASH160_LEN: usize = 20;
const ADDRESS_PAYLOAD_LEN: usize = HASH160_LEN + 1;

/// Encodes `version || hash160` as Base58Check.
pub fn encode_address(hash160: &[u8], version: u8) -> Result<String> {
    if hash160.len() != HASH160_LEN {
        return Err(HdkError::InvalidHashLength(hash160.len()));
    }
    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
    payload.push(version);
    payload.extend_from_slice(hash160);
    Ok(base58check::encode(&payload))
}

/// Decodes an address into its 20-byte hash and version byte.
pub fn decode_address(address: &str) -> Result<([u8; HASH160_LEN], u8)> {
    let payload = base58check::decode(address)?;
    if payload.len() != ADDRESS_PAYLOAD_LEN {
        return Err(HdkError::WrongLength {
            expected: ADDRESS_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&payload[1..]);
    Ok((hash, payload[0]))
}

/// True if `address` decodes and re-encodes to exactly the same text.
pub fn is_valid_address(address: &str) -> bool {
    match decode_address(address) {
        Ok((hash, version)) => encode_address(&hash, version)
            .map(|encoded| encoded == address)
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub version: u8,
    pub hash: [u8; HASH160_LEN],
}

impl Address {
    pub fn new(hash: [u8; HASH160_LEN], version: u8) -> Self {
        Address { version, hash }
    }

    /// Builds an address from an arbitrary slice, rejecting anything but 20 bytes.
    pub fn from_hash_slice(hash: &[u8], version: u8) -> Result<Self> {
        if hash.len() != HASH160_LEN {
            return Err(HdkError::InvalidHashLength(hash.len()));
        }
        let mut bytes = [0u8; HASH160_LEN];
        bytes.copy_from_slice(hash);
        Ok(Address::new(bytes, version))
    }

    /// Pay-to-Pubkey-Hash of the compressed public key.
    pub fn p2pkh(pubkey: &PublicKey, params: &NetworkParams) -> Self {
        Address::new(hash160(&pubkey.serialize()), params.p2pkh_version)
    }

    /// Pay-to-Script-Hash of a serialized script.
    pub fn p2sh(script: &[u8], params: &NetworkParams) -> Self {
        Address::new(hash160(script), params.p2sh_version)
    }

    pub fn is_p2pkh(&self, params: &NetworkParams) -> bool {
        self.version == params.p2pkh_version
    }

    pub fn is_p2sh(&self, params: &NetworkParams) -> bool {
        self.version == params.p2sh_version
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
        payload[0] = self.version;
        payload[1..].copy_from_slice(&self.hash);
        write!(f, "{}", base58check::encode(&payload))
    }
}

impl FromStr for Address {
    type Err = HdkError;

    fn from_str(s: &str) -> Result<Self> {
        let (hash, version) = decode_address(s)?;
        Ok(Address::new(hash, version))
    }
}
