//! Wire payload assembly for `/exchange`.

use serde::{Deserialize, Serialize};

use crate::exchange::types::{ExchangeError, ExchangeResult};
use crate::signing::action::Action;
use crate::signing::signer::{SignedAction, WireSignature};

/// Body of a POST to the exchange endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub action: Action,
    pub nonce: u64,
    pub signature: WireSignature,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires_after: Option<u64>,
}

impl ExchangeRequest {
    /// JSON bytes sent on the wire.
    pub fn to_json(&self) -> ExchangeResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ExchangeError::Serialize(e.to_string()))
    }
}

/// Turns signed actions into request bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
    send_expires_after: bool,
}

impl RequestBuilder {
    pub fn new(send_expires_after: bool) -> Self {
        Self { send_expires_after }
    }

    pub fn build(&self, signed: &SignedAction) -> ExchangeRequest {
        ExchangeRequest {
            action: signed.action,
            nonce: signed.nonce.as_millis(),
            signature: signed.signature,
            expires_after: self
                .send_expires_after
                .then(|| signed.expiration.as_millis()),
        }
    }
}
