//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::signing::types::DEFAULT_EXPIRATION_WINDOW_MS;
use crate::signing::wallet::PRIVATE_KEY_ENV_VAR;

/// Mainnet exchange endpoint.
pub const MAINNET_EXCHANGE_URL: &str = "https://api.hyperliquid.xyz/exchange";

/// Testnet exchange endpoint.
pub const TESTNET_EXCHANGE_URL: &str = "https://api.hyperliquid-testnet.xyz/exchange";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Exchange endpoint and signing parameters.
    pub exchange: ExchangeConfig,

    /// Where the signing key comes from.
    pub credentials: CredentialsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Target network. Selects both the endpoint and the signing domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn is_mainnet(self) -> bool {
        matches!(self, Network::Mainnet)
    }

    /// `source` field of the phantom agent.
    pub fn agent_source(self) -> &'static str {
        match self {
            Network::Mainnet => "a",
            Network::Testnet => "b",
        }
    }

    pub fn exchange_url(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_EXCHANGE_URL,
            Network::Testnet => TESTNET_EXCHANGE_URL,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Exchange endpoint and signing parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Network to sign for.
    pub network: Network,

    /// Endpoint override; defaults to the network's exchange URL.
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Validity window committed into the signature, in milliseconds.
    pub expiration_window_ms: u64,

    /// Also send the window as `expiresAfter` in the request body.
    pub send_expires_after: bool,
}

impl ExchangeConfig {
    /// Endpoint actually used for submission.
    pub fn endpoint(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.network.exchange_url())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            api_url: None,
            request_timeout_secs: 30,
            expiration_window_ms: DEFAULT_EXPIRATION_WINDOW_MS,
            send_expires_after: false,
        }
    }
}

/// Credential source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Environment variable holding the hex private key.
    pub private_key_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            private_key_env: PRIVATE_KEY_ENV_VAR.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
