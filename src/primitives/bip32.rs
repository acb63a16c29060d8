//! BIP32 Hierarchical Deterministic Keys.
//!
//! An [`ExtendedKey`] is either private or public; both variants share the
//! chain code and derivation metadata. Derivation and neutering always return
//! new keys.

use crate::primitives::address::Address;
use crate::primitives::checksum::{append_checksum, verify_and_strip};
use crate::primitives::{base58check, ec, hash, wif};
use crate::types::NetworkParams;
use crate::{HdkError, Result};
use secp256k1::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BIP32_MASTER_KEY: &[u8] = b"Bitcoin seed";

/// First hardened child index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Length of a serialized extended key without checksum.
pub const EXTENDED_KEY_LEN: usize = 78;

/// Length of a serialized extended key with its checksum.
pub const SERIALIZED_EXTENDED_KEY_LEN: usize = EXTENDED_KEY_LEN + 4;

/// Chain code for BIP32 key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainCode(pub [u8; 32]);

impl ChainCode {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Key fingerprint (first 4 bytes of HASH160 of public key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Fingerprint(pub [u8; 4]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Calculate fingerprint from public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let identifier = hash::hash160(&public_key.serialize());
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&identifier[0..4]);
        Fingerprint(fingerprint)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Derivation path for BIP32 key derivation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivationPath {
    path: Vec<u32>,
}

impl DerivationPath {
    pub fn new(path: Vec<u32>) -> Self {
        DerivationPath { path }
    }

    /// Create master path (empty)
    pub fn master() -> Self {
        DerivationPath { path: Vec::new() }
    }

    pub fn path(&self) -> &[u32] {
        &self.path
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.path.iter()
    }

    /// Check if a child number is hardened
    pub fn is_hardened(child_number: u32) -> bool {
        child_number >= HARDENED_OFFSET
    }

    /// Create hardened child number. `index` must be below the hardened offset.
    pub fn hardened(index: u32) -> u32 {
        index | HARDENED_OFFSET
    }

    /// Number of derivation steps in the path
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Get the last child number, or 0 for master
    pub fn child_number(&self) -> u32 {
        self.path.last().copied().unwrap_or(0)
    }

    pub fn parent(&self) -> Option<DerivationPath> {
        if self.path.is_empty() {
            None
        } else {
            let mut parent_path = self.path.clone();
            parent_path.pop();
            Some(DerivationPath::new(parent_path))
        }
    }

    /// Extend path with child
    pub fn child(&self, child_number: u32) -> DerivationPath {
        let mut new_path = self.path.clone();
        new_path.push(child_number);
        DerivationPath::new(new_path)
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(path: Vec<u32>) -> Self {
        DerivationPath::new(path)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.iter()
    }
}

fn parse_segment(segment: &str) -> Result<u32> {
    let invalid = || HdkError::InvalidPathSegment(segment.to_string());

    let (digits, is_hardened) = match segment.strip_suffix(|c: char| c == '\'' || c == 'h') {
        Some(digits) => (digits, true),
        None => (segment, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let index: u32 = digits.parse().map_err(|_| invalid())?;
    if index >= HARDENED_OFFSET {
        return Err(invalid());
    }

    Ok(if is_hardened { DerivationPath::hardened(index) } else { index })
}

impl FromStr for DerivationPath {
    type Err = HdkError;

    /// Parses `m/44'/0'/0'/0/1` style paths.
    ///
    /// A leading `m` and empty or blank segments contribute no step, so `"/0"`
    /// and `"0"` are relative paths. `'` or `h` marks a hardened index.
    fn from_str(s: &str) -> Result<Self> {
        let mut path = Vec::new();
        let mut at_start = true;

        for segment in s.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if at_start && segment == "m" {
                at_start = false;
                continue;
            }
            at_start = false;
            path.push(parse_segment(segment)?);
        }

        Ok(DerivationPath::new(path))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &child_number in &self.path {
            if DerivationPath::is_hardened(child_number) {
                write!(f, "/{}'", child_number - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", child_number)?;
            }
        }
        Ok(())
    }
}

/// The key carried by an extended key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMaterial {
    Private(SecretKey),
    Public(PublicKey),
}

impl KeyMaterial {
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyMaterial::Private(secret_key) => ec::scalar_to_point(secret_key),
            KeyMaterial::Public(public_key) => *public_key,
        }
    }

    /// 33-byte serialized form; private scalars get a leading 0x00.
    fn to_bytes(self) -> [u8; 33] {
        match self {
            KeyMaterial::Private(secret_key) => {
                let mut bytes = [0u8; 33];
                bytes[1..].copy_from_slice(&secret_key.secret_bytes());
                bytes
            }
            KeyMaterial::Public(public_key) => public_key.serialize(),
        }
    }

    /// The private/public discriminant is the first byte: 0x00 means private.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(0x00) => Ok(KeyMaterial::Private(ec::parse_scalar(&bytes[1..])?)),
            _ => Ok(KeyMaterial::Public(ec::parse_point(bytes)?)),
        }
    }
}

/// A BIP32 extended key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: ChainCode,
    depth: u8,
    child_number: u32,
    parent_fingerprint: Fingerprint,
}

impl ExtendedKey {
    pub fn new(
        key: KeyMaterial,
        chain_code: ChainCode,
        depth: u8,
        child_number: u32,
        parent_fingerprint: Fingerprint,
    ) -> Self {
        ExtendedKey {
            key,
            chain_code,
            depth,
            child_number,
            parent_fingerprint,
        }
    }

    /// Create a new master key from a seed
    pub fn new_master(seed: &[u8]) -> Result<Self> {
        let intermediary = hash::hmac_sha512(BIP32_MASTER_KEY, &[seed]);
        let (key_bytes, chain_code_bytes) = intermediary.split_at(32);

        let private_key = SecretKey::from_slice(key_bytes).map_err(|_| {
            log::debug!("Seed of {} bytes produced an out-of-range master key", seed.len());
            HdkError::InvalidSeed
        })?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(chain_code_bytes);

        let master = ExtendedKey::new(
            KeyMaterial::Private(private_key),
            ChainCode(chain_code),
            0,
            0,
            Fingerprint::default(),
        );
        log::debug!("Created master key with fingerprint {}", master.fingerprint());
        Ok(master)
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    pub fn private_key(&self) -> Option<&SecretKey> {
        match &self.key {
            KeyMaterial::Private(secret_key) => Some(secret_key),
            KeyMaterial::Public(_) => None,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// HASH160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        hash::hash160(&self.public_key().serialize())
    }

    /// Get the fingerprint of this key
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_public_key(&self.public_key())
    }

    /// Derive a child key.
    ///
    /// Private keys derive private children (CKDpriv); public keys derive public
    /// children (CKDpub) and refuse hardened indices. [`HdkError::InvalidDerivedKey`]
    /// means this index is unusable and the caller should move on to the next one.
    pub fn derive_child(&self, child_number: u32) -> Result<ExtendedKey> {
        let is_hardened = DerivationPath::is_hardened(child_number);
        if is_hardened && !self.is_private() {
            return Err(HdkError::CannotDeriveHardenedFromPublic);
        }
        let depth = self.depth.checked_add(1).ok_or(HdkError::DepthOverflow)?;

        let parent_public_key = self.public_key();
        let index_bytes = child_number.to_be_bytes();
        let intermediary = match &self.key {
            KeyMaterial::Private(secret_key) if is_hardened => hash::hmac_sha512(
                &self.chain_code.0,
                &[&[0x00], &secret_key.secret_bytes(), &index_bytes],
            ),
            _ => hash::hmac_sha512(
                &self.chain_code.0,
                &[&parent_public_key.serialize(), &index_bytes],
            ),
        };

        let mut tweak = [0u8; 32];
        tweak.copy_from_slice(&intermediary[..32]);
        let mut child_chain_code = [0u8; 32];
        child_chain_code.copy_from_slice(&intermediary[32..]);

        let key = match &self.key {
            KeyMaterial::Private(secret_key) => ec::scalar_add(secret_key, &tweak).map(KeyMaterial::Private),
            KeyMaterial::Public(public_key) => ec::point_add_scalar(public_key, &tweak).map(KeyMaterial::Public),
        }
        .map_err(|e| {
            log::debug!("Child {} at depth {} is invalid: {}", child_number, depth, e);
            e
        })?;

        log::trace!("Derived child {} at depth {}", child_number, depth);
        Ok(ExtendedKey {
            key,
            chain_code: ChainCode(child_chain_code),
            depth,
            child_number,
            parent_fingerprint: Fingerprint::from_public_key(&parent_public_key),
        })
    }

    /// Derive a key from a derivation path, stopping at the first error.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        log::debug!("Deriving {} from key {}", path, self.fingerprint());
        let mut current_key = self.clone();
        for &child_number in path {
            current_key = current_key.derive_child(child_number)?;
        }
        Ok(current_key)
    }

    /// Parse `path` and derive along it.
    pub fn derive(&self, path: &str) -> Result<ExtendedKey> {
        self.derive_path(&DerivationPath::from_str(path)?)
    }

    /// Get the corresponding extended public key
    pub fn neuter(&self) -> ExtendedKey {
        ExtendedKey {
            key: KeyMaterial::Public(self.public_key()),
            ..self.clone()
        }
    }

    /// The 82-byte serialization: 78 bytes of key data followed by a checksum.
    pub fn serialize(&self, params: &NetworkParams) -> [u8; SERIALIZED_EXTENDED_KEY_LEN] {
        let mut data = Vec::with_capacity(EXTENDED_KEY_LEN);

        let version = match self.key {
            KeyMaterial::Private(_) => params.private_version,
            KeyMaterial::Public(_) => params.public_version,
        };
        data.extend_from_slice(&version);
        data.push(self.depth);
        data.extend_from_slice(self.parent_fingerprint.as_bytes());
        data.extend_from_slice(&self.child_number.to_be_bytes());
        data.extend_from_slice(self.chain_code.as_bytes());
        data.extend_from_slice(&self.key.to_bytes());

        let mut serialized = [0u8; SERIALIZED_EXTENDED_KEY_LEN];
        serialized.copy_from_slice(&append_checksum(&data));
        serialized
    }

    /// Inverse of [`ExtendedKey::serialize`].
    ///
    /// The version bytes must match `params` for the variant found in the key data.
    pub fn deserialize(data: &[u8], params: &NetworkParams) -> Result<Self> {
        if data.len() != SERIALIZED_EXTENDED_KEY_LEN {
            return Err(HdkError::WrongLength {
                expected: SERIALIZED_EXTENDED_KEY_LEN,
                actual: data.len(),
            });
        }
        let payload = verify_and_strip(data)?;

        let mut version = [0u8; 4];
        version.copy_from_slice(&payload[0..4]);
        let depth = payload[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);
        let child_number = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[13..45]);
        let key = KeyMaterial::from_bytes(&payload[45..78])?;

        let expected_version = match key {
            KeyMaterial::Private(_) => params.private_version,
            KeyMaterial::Public(_) => params.public_version,
        };
        if version != expected_version {
            return Err(HdkError::UnknownVersion(hex::encode(version)));
        }

        Ok(ExtendedKey {
            key,
            chain_code: ChainCode(chain_code),
            depth,
            child_number,
            parent_fingerprint: Fingerprint(parent_fingerprint),
        })
    }

    /// Serialize to extended key format (xprv/xpub, tprv/tpub)
    pub fn to_base58(&self, params: &NetworkParams) -> String {
        base58check::encode_padded(&self.serialize(params))
    }

    pub fn from_base58(s: &str, params: &NetworkParams) -> Result<Self> {
        let data = base58check::decode_padded(s)?;
        ExtendedKey::deserialize(&data, params)
    }

    /// The private key in Wallet Import Format (compressed).
    pub fn to_wif(&self, params: &NetworkParams) -> Result<String> {
        let secret_key = self.private_key().ok_or(HdkError::MissingPrivateKey)?;
        Ok(wif::encode_wif(secret_key, params.wif_prefix, true))
    }

    /// P2PKH address of the compressed public key.
    pub fn address(&self, params: &NetworkParams) -> Address {
        Address::p2pkh(&self.public_key(), params)
    }
}
