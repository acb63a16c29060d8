//! secp256k1 operations used by key derivation.

use crate::{HdkError, Result};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey, SECP256K1};

fn context() -> &'static Secp256k1<All> {
    SECP256K1
}

/// Multiplies the curve generator by `scalar`.
pub fn scalar_to_point(scalar: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(context(), scalar)
}

/// Adds two curve points, failing if the sum is the point at infinity.
pub fn point_add(a: &PublicKey, b: &PublicKey) -> Result<PublicKey> {
    a.combine(b).map_err(|_| HdkError::InvalidDerivedKey)
}

/// Returns `(tweak + scalar) mod n`.
///
/// Fails if `tweak >= n` or the sum is zero.
pub fn scalar_add(scalar: &SecretKey, tweak: &[u8; 32]) -> Result<SecretKey> {
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| HdkError::InvalidDerivedKey)?;
    scalar.add_tweak(&tweak).map_err(|_| HdkError::InvalidDerivedKey)
}

/// Returns `tweak * G + point`.
///
/// Fails if `tweak >= n` or the result is the point at infinity.
pub fn point_add_scalar(point: &PublicKey, tweak: &[u8; 32]) -> Result<PublicKey> {
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| HdkError::InvalidDerivedKey)?;
    point
        .add_exp_tweak(context(), &tweak)
        .map_err(|_| HdkError::InvalidDerivedKey)
}

/// True if `bytes` is a 32-byte scalar in `[1, n - 1]`.
pub fn is_valid_scalar(bytes: &[u8]) -> bool {
    bytes.len() == 32 && SecretKey::from_slice(bytes).is_ok()
}

/// True if `bytes` is a 33-byte compressed encoding of a curve point.
pub fn is_valid_point(bytes: &[u8]) -> bool {
    bytes.len() == 33 && PublicKey::from_slice(bytes).is_ok()
}

pub fn parse_scalar(bytes: &[u8]) -> Result<SecretKey> {
    if bytes.len() != 32 {
        return Err(HdkError::WrongLength { expected: 32, actual: bytes.len() });
    }
    SecretKey::from_slice(bytes)
        .map_err(|e| HdkError::InvalidKeyMaterial(format!("Invalid private key: {}", e)))
}

pub fn parse_point(bytes: &[u8]) -> Result<PublicKey> {
    if bytes.len() != 33 {
        return Err(HdkError::WrongLength { expected: 33, actual: bytes.len() });
    }
    PublicKey::from_slice(bytes)
        .map_err(|e| HdkError::InvalidKeyMaterial(format!("Invalid public key: {}", e)))
}
