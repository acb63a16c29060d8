//! Hashing, encoding and key-derivation primitives.

pub mod hash;
pub mod basen;
pub mod checksum;
pub mod base58check;
pub mod ec;
pub mod bip32;
pub mod address;
pub mod wif;
