//! Key material: secret loading, address derivation, digest signing.
//!
//! # Security
//! - Secrets reach this module only through a [`SecretSource`]
//! - Keys are never logged or serialized; only their length is reported
//! - Intermediate secret strings are zeroized on drop

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, SignerSync};
use zeroize::Zeroizing;

use crate::signing::types::{SignerError, SignerResult};

/// Default environment variable holding the account's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Length of a 32-byte secret in hex characters.
const KEY_HEX_LEN: usize = 64;

/// Capability that yields the raw hex secret.
pub trait SecretSource {
    /// Load the secret.
    fn load(&self) -> SignerResult<Zeroizing<String>>;

    /// Human-readable origin of the secret, safe to log.
    fn describe(&self) -> String;
}

/// Reads the secret from a named environment variable.
#[derive(Debug, Clone)]
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSecret {
    fn default() -> Self {
        Self::new(PRIVATE_KEY_ENV_VAR)
    }
}

impl SecretSource for EnvSecret {
    fn load(&self) -> SignerResult<Zeroizing<String>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(Zeroizing::new(value)),
            Ok(_) => Err(SignerError::SecretUnavailable(format!(
                "Environment variable {} is empty",
                self.var
            ))),
            Err(_) => Err(SignerError::SecretUnavailable(format!(
                "Environment variable {} not set",
                self.var
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("env:{}", self.var)
    }
}

/// Wraps a secret already held in memory.
pub struct StaticSecret(Zeroizing<String>);

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }
}

impl SecretSource for StaticSecret {
    fn load(&self) -> SignerResult<Zeroizing<String>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

impl std::fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticSecret").field(&"<redacted>").finish()
    }
}

/// Normalize a hex secret to 64 lowercase-agnostic hex characters without prefix.
fn normalize_key(raw: &str) -> SignerResult<&str> {
    let trimmed = raw.trim();
    let key_hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if key_hex.len() != KEY_HEX_LEN {
        return Err(SignerError::InvalidKeyFormat(format!(
            "expected {} hex characters, got {}",
            KEY_HEX_LEN,
            key_hex.len()
        )));
    }
    if !key_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SignerError::InvalidKeyFormat(
            "key contains non-hex characters".to_string(),
        ));
    }
    Ok(key_hex)
}

/// Signing capability bound to one account.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str) -> SignerResult<Self> {
        let key_hex = normalize_key(private_key_hex)?;

        let bytes: B256 = key_hex
            .parse()
            .map_err(|e| SignerError::InvalidKeyFormat(format!("{}", e)))?;
        let signer = PrivateKeySigner::from_bytes(&bytes)
            .map_err(|e| SignerError::InvalidKeyFormat(format!("scalar out of range: {}", e)))?;

        Ok(Self { signer })
    }

    /// Load and derive the wallet from an injected secret source.
    pub fn from_source(source: &dyn SecretSource) -> SignerResult<Self> {
        let secret = source.load()?;
        tracing::info!(
            source = %source.describe(),
            length = secret.len(),
            "Private key loaded"
        );

        let wallet = Self::from_private_key(&secret)?;
        tracing::info!(address = %wallet.address(), "Wallet initialized");
        Ok(wallet)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte digest without any message prefix.
    pub fn sign_hash(&self, hash: &B256) -> SignerResult<Signature> {
        self.signer
            .sign_hash_sync(hash)
            .map_err(|e| SignerError::Signing(format!("Signing failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ONES_KEY: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let plain = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let prefixed = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(plain.address(), prefixed.address());
    }

    #[test]
    fn test_ones_key_address() {
        let wallet = Wallet::from_private_key(ONES_KEY).unwrap();
        assert_eq!(
            wallet.address().to_checksum(None),
            "0x1a642f0E3c3aF545E7AcBD38b07251B3990914F1"
        );
        // Derivation is deterministic.
        assert_eq!(wallet.address(), Wallet::from_private_key(ONES_KEY).unwrap().address());
    }

    #[test]
    fn test_invalid_private_key() {
        let malformed = vec![
            "invalid_key".to_string(),
            "0x".to_string(),
            String::new(),
            TEST_PRIVATE_KEY[..62].to_string(),
            format!("{}00", TEST_PRIVATE_KEY),
            format!("zz{}", &TEST_PRIVATE_KEY[2..]),
        ];
        for bad in &malformed {
            let result = Wallet::from_private_key(bad);
            assert!(
                matches!(result, Err(SignerError::InvalidKeyFormat(_))),
                "accepted malformed key {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let zero = "0".repeat(64);
        assert!(matches!(
            Wallet::from_private_key(&zero),
            Err(SignerError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSecret::new(TEST_PRIVATE_KEY);
        let wallet = Wallet::from_source(&source).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert!(!format!("{:?}", source).contains(TEST_PRIVATE_KEY));
    }

    #[test]
    fn test_missing_env_source() {
        let source = EnvSecret::new("BIG_BLOCKS_TEST_UNSET_KEY_VAR");
        let err = Wallet::from_source(&source).unwrap_err();
        assert!(matches!(err, SignerError::SecretUnavailable(_)));
        assert!(err.to_string().contains("BIG_BLOCKS_TEST_UNSET_KEY_VAR"));
    }

    #[test]
    fn test_sign_hash_recovers_address() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let hash = B256::repeat_byte(0x42);
        let signature = wallet.sign_hash(&hash).unwrap();
        assert_eq!(signature.as_bytes().len(), 65);
        assert_eq!(
            signature.recover_address_from_prehash(&hash).unwrap(),
            wallet.address()
        );
    }
}
