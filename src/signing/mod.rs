//! Key handling and action signing.
//!
//! # Data Flow
//! ```text
//! SecretSource (env var, in-memory)
//!     → wallet.rs (normalize, validate, derive address)
//!     → action.rs (msgpack + nonce + expiration → connection id)
//!     → signer.rs (phantom agent EIP-712 hash → ECDSA signature)
//! ```
//!
//! # Security Constraints
//! - Private keys only arrive through an injected `SecretSource`
//! - Never log private keys or sensitive data
//! - The hash layout and domain are fixed by the venue; do not alter them

pub mod action;
pub mod nonce;
pub mod signer;
pub mod types;
pub mod wallet;

pub use action::{Action, ActionCodec};
pub use nonce::{Clock, NonceGenerator, SystemClock};
pub use signer::{ActionSigner, SignedAction, WireSignature};
pub use types::{ExpirationWindow, Nonce, SignerError, SignerResult};
pub use wallet::{EnvSecret, SecretSource, StaticSecret, Wallet};
