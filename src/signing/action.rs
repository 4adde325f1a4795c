//! Exchange actions and their canonical hash encoding.
//!
//! The venue recomputes this exact byte layout before verifying a signature:
//!
//! ```text
//! msgpack(action) || nonce (u64 BE) || 0x00 (no vault) || 0x00 || expiration (u64 BE)
//! ```
//!
//! The keccak256 of that buffer is the "connection id" handed to the signer.

use alloy::primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

use crate::signing::types::{ExpirationWindow, Nonce, SignerError, SignerResult};

/// Marker byte: the action is not submitted on behalf of a vault.
const NO_VAULT: u8 = 0x00;

/// Marker byte preceding the expiration field.
const EXPIRES_AFTER_TAG: u8 = 0x00;

/// Actions this crate knows how to sign. Field order is part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Toggle large-block execution for the account's EVM transactions.
    #[serde(rename_all = "camelCase")]
    EvmUserModify { using_big_blocks: bool },
}

impl Action {
    /// Action that switches big blocks on or off.
    pub fn big_blocks(enabled: bool) -> Self {
        Action::EvmUserModify {
            using_big_blocks: enabled,
        }
    }
}

/// Canonical encoder for [`Action`] hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionCodec;

impl ActionCodec {
    /// MessagePack encoding with named fields.
    pub fn encode_action(action: &Action) -> SignerResult<Vec<u8>> {
        rmp_serde::to_vec_named(action)
            .map_err(|e| SignerError::Encoding(format!("msgpack encoding failed: {}", e)))
    }

    /// Full pre-hash buffer for `(action, nonce, expiration)`.
    pub fn encode(
        action: &Action,
        nonce: Nonce,
        expiration: ExpirationWindow,
    ) -> SignerResult<Vec<u8>> {
        let mut data = Self::encode_action(action)?;
        data.extend_from_slice(&nonce.to_be_bytes());
        data.push(NO_VAULT);
        data.push(EXPIRES_AFTER_TAG);
        data.extend_from_slice(&expiration.to_be_bytes());
        Ok(data)
    }

    /// keccak256 of [`ActionCodec::encode`]; the value the signer commits to.
    pub fn connection_id(
        action: &Action,
        nonce: Nonce,
        expiration: ExpirationWindow,
    ) -> SignerResult<B256> {
        let data = Self::encode(action, nonce, expiration)?;
        Ok(keccak256(&data))
    }
}
