//! L1 action signing over the venue's EIP-712 "phantom agent" domain.
//!
//! The connection id from [`ActionCodec`] is wrapped in an `Agent` struct whose
//! `source` field separates mainnet (`"a"`) from testnet (`"b"`) signatures,
//! then hashed under a fixed EIP-712 domain and signed with RFC 6979 ECDSA.

use alloy::primitives::{Address, B256, U256};
use alloy::signers::Signature;
use alloy::sol;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct};
use serde::{Deserialize, Serialize};

use crate::config::schema::Network;
use crate::signing::action::{Action, ActionCodec};
use crate::signing::types::{ExpirationWindow, Nonce, SignerError, SignerResult};
use crate::signing::wallet::Wallet;

sol! {
    /// Phantom agent the venue reconstructs to verify L1 actions.
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Chain id of the venue's L1 signing domain (not an EVM chain).
pub const L1_SIGNING_CHAIN_ID: u64 = 1337;

/// EIP-712 domain shared by every L1 action.
pub fn exchange_domain() -> Eip712Domain {
    eip712_domain! {
        name: "Exchange",
        version: "1",
        chain_id: L1_SIGNING_CHAIN_ID,
        verifying_contract: Address::ZERO,
    }
}

/// Signature in the `{r, s, v}` shape the exchange endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSignature {
    pub r: U256,
    pub s: U256,
    pub v: u8,
}

impl From<Signature> for WireSignature {
    fn from(signature: Signature) -> Self {
        Self {
            r: signature.r(),
            s: signature.s(),
            v: 27 + u8::from(signature.v()),
        }
    }
}

impl WireSignature {
    /// Recover the signing address for `digest`.
    pub fn recover(&self, digest: &B256) -> SignerResult<Address> {
        let y_parity = match self.v {
            27 => false,
            28 => true,
            other => {
                return Err(SignerError::Signing(format!(
                    "invalid recovery id {}",
                    other
                )))
            }
        };
        Signature::new(self.r, self.s, y_parity)
            .recover_address_from_prehash(digest)
            .map_err(|e| SignerError::Signing(format!("recovery failed: {}", e)))
    }
}

/// An action bound to its nonce, expiration and signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAction {
    pub action: Action,
    pub nonce: Nonce,
    pub expiration: ExpirationWindow,
    pub connection_id: B256,
    pub digest: B256,
    pub signature: WireSignature,
}

/// Produces signatures for the configured network's signing domain.
#[derive(Debug, Clone, Copy)]
pub struct ActionSigner {
    network: Network,
}

impl ActionSigner {
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// EIP-712 signing hash for a connection id under this signer's domain.
    pub fn signing_digest(&self, connection_id: B256) -> B256 {
        let agent = Agent {
            source: self.network.agent_source().to_string(),
            connectionId: connection_id,
        };
        agent.eip712_signing_hash(&exchange_domain())
    }

    /// Digest for the full `(action, nonce, expiration)` triple.
    pub fn action_digest(
        &self,
        action: &Action,
        nonce: Nonce,
        expiration: ExpirationWindow,
    ) -> SignerResult<B256> {
        let connection_id = ActionCodec::connection_id(action, nonce, expiration)?;
        Ok(self.signing_digest(connection_id))
    }

    /// Encode, hash and sign an action.
    pub fn sign(
        &self,
        wallet: &Wallet,
        action: Action,
        nonce: Nonce,
        expiration: ExpirationWindow,
    ) -> SignerResult<SignedAction> {
        let connection_id = ActionCodec::connection_id(&action, nonce, expiration)?;
        let digest = self.signing_digest(connection_id);
        let signature = WireSignature::from(wallet.sign_hash(&digest)?);

        tracing::debug!(
            nonce = %nonce,
            connection_id = %connection_id,
            digest = %digest,
            mainnet = self.network.is_mainnet(),
            "Action signed"
        );

        Ok(SignedAction {
            action,
            nonce,
            expiration,
            connection_id,
            digest,
            signature,
        })
    }

    /// Check that `signature` was made by `expected` over this exact triple.
    pub fn verify(
        &self,
        action: &Action,
        nonce: Nonce,
        expiration: ExpirationWindow,
        signature: &WireSignature,
        expected: Address,
    ) -> SignerResult<bool> {
        let digest = self.action_digest(action, nonce, expiration)?;
        // A mismatched triple can still recover to some address, or fail outright.
        Ok(matches!(signature.recover(&digest), Ok(addr) if addr == expected))
    }
}
