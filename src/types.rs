use crate::{HdkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export logging types
pub use crate::utils::logging::LogLevel;

/// Named networks with published version bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Bitcoin,
    Testnet,
}

impl Network {
    pub fn params(&self) -> NetworkParams {
        match self {
            Network::Bitcoin => NetworkParams::BITCOIN,
            Network::Testnet => NetworkParams::TESTNET,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Bitcoin => write!(f, "bitcoin"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = HdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" => Ok(Network::Bitcoin),
            "testnet" => Ok(Network::Testnet),
            other => Err(HdkError::InvalidInput(format!("Unknown network: {}", other))),
        }
    }
}

/// Version and prefix bytes used when serializing keys and addresses.
///
/// Serializers take this explicitly, so several networks can be handled side by
/// side without shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Extended private key version (`xprv`, `tprv`).
    pub private_version: [u8; 4],
    /// Extended public key version (`xpub`, `tpub`).
    pub public_version: [u8; 4],
    /// Pay-to-pubkey-hash address version byte.
    pub p2pkh_version: u8,
    /// Pay-to-script-hash address version byte.
    pub p2sh_version: u8,
    /// Wallet Import Format prefix.
    pub wif_prefix: u8,
}

impl NetworkParams {
    pub const BITCOIN: NetworkParams = NetworkParams {
        private_version: [0x04, 0x88, 0xAD, 0xE4],
        public_version: [0x04, 0x88, 0xB2, 0x1E],
        p2pkh_version: 0x00,
        p2sh_version: 0x05,
        wif_prefix: 0x80,
    };

    pub const TESTNET: NetworkParams = NetworkParams {
        private_version: [0x04, 0x35, 0x83, 0x94],
        public_version: [0x04, 0x35, 0x87, 0xCF],
        p2pkh_version: 0x6F,
        p2sh_version: 0xC4,
        wif_prefix: 0xEF,
    };
}

impl Default for NetworkParams {
    fn default() -> Self {
        NetworkParams::BITCOIN
    }
}

/// Library configuration, loadable through [`crate::utils::config::ConfigManager`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HdkConfig {
    /// Network whose version bytes are used by default.
    #[serde(default)]
    pub network: Network,
    /// Log level for the library
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Custom version bytes, overriding `network`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<NetworkParams>,
}

impl HdkConfig {
    pub fn network_params(&self) -> NetworkParams {
        self.params.unwrap_or_else(|| self.network.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_params() {
        assert_eq!(Network::Bitcoin.params(), NetworkParams::BITCOIN);
        assert_eq!(Network::Testnet.params(), NetworkParams::TESTNET);
        assert_ne!(
            NetworkParams::BITCOIN.private_version,
            NetworkParams::BITCOIN.public_version
        );
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!(Network::from_str("mainnet").unwrap(), Network::Bitcoin);
        assert_eq!(Network::from_str("Bitcoin").unwrap(), Network::Bitcoin);
        assert_eq!(Network::from_str("testnet").unwrap(), Network::Testnet);
        assert!(Network::from_str("regtest").is_err());
    }

    #[test]
    fn test_config_params_override() {
        let config = HdkConfig::default();
        assert_eq!(config.network_params(), NetworkParams::BITCOIN);

        let custom = NetworkParams { p2pkh_version: 0x1e, ..NetworkParams::BITCOIN };
        let config = HdkConfig {
            network: Network::Testnet,
            log_level: None,
            params: Some(custom),
        };
        assert_eq!(config.network_params(), custom);
    }

    #[test]
    fn test_config_json() {
        let config: HdkConfig = serde_json::from_str(r#"{"network":"testnet","log_level":"Debug"}"#).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.params, None);

        let json = serde_json::to_string(&HdkConfig::default()).unwrap();
        assert_eq!(json, r#"{"network":"bitcoin"}"#);
    }
}
