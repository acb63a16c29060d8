//! # hdk-rs
//!
//! BIP32 hierarchical deterministic keys for Bitcoin-like ledgers, with the
//! Base58Check encodings used to serialize them and the addresses derived from
//! them.
//!
//! ## Quick Start
//!
//! ```rust
//! use hdk_rs::primitives::bip32::ExtendedKey;
//! use hdk_rs::types::NetworkParams;
//!
//! # fn main() -> hdk_rs::Result<()> {
//! let seed = [0x42u8; 32];
//! let master = ExtendedKey::new_master(&seed)?;
//! let account = master.derive("m/44'/0'/0'")?;
//! let receive = account.neuter().derive("m/0/0")?;
//!
//! let params = NetworkParams::BITCOIN;
//! assert!(account.to_base58(&params).starts_with("xprv"));
//! assert!(receive.to_base58(&params).starts_with("xpub"));
//! println!("address: {}", receive.address(&params));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture Overview
//!
//! - [`primitives::hash`]: SHA256, double SHA256, RIPEMD160, HASH160, HMAC-SHA512
//! - [`primitives::basen`]: base-N codec over any ASCII alphabet, Base58 instance
//! - [`primitives::checksum`]: four-byte double-SHA256 checksums
//! - [`primitives::base58check`]: Base58Check with leading-zero preservation
//! - [`primitives::bip32`]: extended keys, derivation paths, serialization
//! - [`primitives::address`]: version byte + HASH160 addresses
//! - [`primitives::wif`]: Wallet Import Format private keys
//! - [`utils`]: logging and configuration loading
//!
//! ## Error Handling
//!
//! All fallible APIs return [`Result<T, HdkError>`](error::HdkError). Nothing is
//! retried internally; for example a child index that yields an invalid key is
//! reported and the caller picks the next index.
//!
//! ## Thread Safety
//!
//! Keys are immutable values and every operation is pure, so keys can be shared
//! across threads and derived from concurrently.

pub mod error;
pub mod types;
pub mod primitives;
pub mod utils;

pub use error::{HdkError, Result};
pub use primitives::address::Address;
pub use primitives::bip32::{DerivationPath, ExtendedKey, KeyMaterial};
pub use types::{HdkConfig, LogLevel, Network, NetworkParams};

/// Initializes logging from `config`.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init(config: &HdkConfig) -> Result<()> {
    let level = config.log_level.unwrap_or_default();
    utils::logging::init_logging(level);
    log::info!("hdk-rs initialized for network {}", config.network);
    Ok(())
}
