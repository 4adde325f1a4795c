//! The sign-and-submit pipeline for the big blocks toggle.
//!
//! Each run moves through `Unsigned → Signed → Submitted` and ends in exactly
//! one of `Succeeded`, `Rejected` or `Failed`. Nothing loops back; a retry is a
//! new run with a new nonce.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::ExchangeConfig;
use crate::exchange::{ExchangeClient, ExchangeError, ExchangeRequest, RequestBuilder, SubmissionOutcome};
use crate::signing::{
    Action, ActionSigner, Clock, ExpirationWindow, NonceGenerator, SignedAction, SignerError,
    SystemClock, Wallet,
};

/// Pipeline failures, one variant per stage that can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Key, encoding or signing failure before anything was sent.
    #[error(transparent)]
    Signer(#[from] SignerError),

    /// The exchange client could not be built or the body serialized.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// The endpoint answered but did not accept the request.
    #[error("Remote rejection (HTTP {status}): {body}")]
    RemoteRejection { status: u16, body: String },

    /// No response was received.
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

/// Lifecycle stage of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unsigned,
    Signed,
    Submitted,
    Succeeded,
    Rejected,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Rejected | Stage::Failed)
    }

    fn as_str(self) -> &'static str {
        match self {
            Stage::Unsigned => "unsigned",
            Stage::Signed => "signed",
            Stage::Submitted => "submitted",
            Stage::Succeeded => "succeeded",
            Stage::Rejected => "rejected",
            Stage::Failed => "failed",
        }
    }
}

impl From<&SubmissionOutcome> for Stage {
    fn from(outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Success(_) => Stage::Succeeded,
            SubmissionOutcome::RemoteRejection { .. } => Stage::Rejected,
            SubmissionOutcome::TransportFailure(_) => Stage::Failed,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed action and the request body built from it.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub signed: SignedAction,
    pub request: ExchangeRequest,
}

/// Signs and submits `evmUserModify` actions for one wallet.
#[derive(Debug)]
pub struct BigBlocksToggle<C = SystemClock> {
    wallet: Wallet,
    signer: ActionSigner,
    nonces: NonceGenerator<C>,
    expiration: ExpirationWindow,
    builder: RequestBuilder,
    client: ExchangeClient,
}

impl BigBlocksToggle<SystemClock> {
    /// Build a pipeline from exchange configuration.
    pub fn new(wallet: Wallet, config: &ExchangeConfig) -> Result<Self, PipelineError> {
        Self::with_nonces(wallet, config, NonceGenerator::new())
    }
}

impl<C: Clock> BigBlocksToggle<C> {
    /// Build a pipeline with a caller-supplied nonce generator.
    pub fn with_nonces(
        wallet: Wallet,
        config: &ExchangeConfig,
        nonces: NonceGenerator<C>,
    ) -> Result<Self, PipelineError> {
        let expiration = ExpirationWindow::from_millis(config.expiration_window_ms)?;
        let client = ExchangeClient::new(
            config.endpoint(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            wallet,
            signer: ActionSigner::new(config.network),
            nonces,
            expiration,
            builder: RequestBuilder::new(config.send_expires_after),
            client,
        })
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn signer(&self) -> &ActionSigner {
        &self.signer
    }

    pub fn client(&self) -> &ExchangeClient {
        &self.client
    }

    /// Mint a nonce, sign the action and build the request body.
    pub fn prepare(&self, enable: bool) -> Result<PreparedRequest, PipelineError> {
        let action = Action::big_blocks(enable);
        tracing::debug!(stage = %Stage::Unsigned, using_big_blocks = enable, "Action built");

        let nonce = self.nonces.next();
        let signed = self.signer.sign(&self.wallet, action, nonce, self.expiration)?;
        let request = self.builder.build(&signed);

        tracing::info!(
            stage = %Stage::Signed,
            address = %self.wallet.address(),
            nonce = %nonce,
            using_big_blocks = enable,
            "Action signed"
        );

        Ok(PreparedRequest { signed, request })
    }

    /// Submit a prepared request once and surface the outcome.
    pub async fn submit(&self, prepared: &PreparedRequest) -> Result<Value, PipelineError> {
        tracing::debug!(stage = %Stage::Submitted, nonce = prepared.request.nonce, "Posting request");
        let outcome = self.client.submit(&prepared.request).await?;

        let stage = Stage::from(&outcome);
        tracing::info!(stage = %stage, nonce = prepared.request.nonce, "Submission finished");

        match outcome {
            SubmissionOutcome::Success(confirmation) => Ok(confirmation),
            SubmissionOutcome::RemoteRejection { status, body } => {
                Err(PipelineError::RemoteRejection { status, body })
            }
            SubmissionOutcome::TransportFailure(reason) => {
                Err(PipelineError::TransportFailure(reason))
            }
        }
    }

    /// Full invocation: sign, build, submit.
    pub async fn run(&self, enable: bool) -> Result<Value, PipelineError> {
        let prepared = self.prepare(enable)?;
        self.submit(&prepared).await
    }
}
