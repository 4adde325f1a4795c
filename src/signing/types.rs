//! Signing primitives and error definitions.

use thiserror::Error;

/// Default validity window for a signed action, in milliseconds.
pub const DEFAULT_EXPIRATION_WINDOW_MS: u64 = 60_000;

/// Errors raised while loading keys, encoding actions, or signing.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The secret could not be obtained from its source.
    #[error("Secret unavailable: {0}")]
    SecretUnavailable(String),

    /// The secret is not a well-formed 32-byte hex scalar.
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// An action, nonce, or expiration value is outside its domain.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The cryptographic backend failed to produce or recover a signature.
    #[error("Signing error: {0}")]
    Signing(String),
}

/// Result type for signing operations.
pub type SignerResult<T> = Result<T, SignerError>;

/// Replay-protection nonce: wall-clock milliseconds at signing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonce(u64);

impl Nonce {
    /// Wrap a millisecond timestamp.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Millisecond value.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Fixed-width big-endian encoding used in the action hash.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl TryFrom<i64> for Nonce {
    type Error = SignerError;

    fn try_from(millis: i64) -> SignerResult<Self> {
        u64::try_from(millis)
            .map(Self)
            .map_err(|_| SignerError::Encoding(format!("nonce must not be negative, got {}", millis)))
    }
}

impl From<Nonce> for u64 {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How long a signed action stays valid, in milliseconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpirationWindow(u64);

impl ExpirationWindow {
    /// Build a window, rejecting zero.
    pub fn from_millis(millis: u64) -> SignerResult<Self> {
        if millis == 0 {
            return Err(SignerError::Encoding(
                "expiration window must be positive".to_string(),
            ));
        }
        Ok(Self(millis))
    }

    /// Millisecond value.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Fixed-width big-endian encoding used in the action hash.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl Default for ExpirationWindow {
    fn default() -> Self {
        Self(DEFAULT_EXPIRATION_WINDOW_MS)
    }
}
