//! HTTP submission to the exchange endpoint.
//!
//! # Responsibilities
//! - POST one JSON payload with a bounded timeout
//! - Classify the result as success, rejection, or transport failure
//! - Never retry: a resend must carry a freshly signed nonce

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::exchange::request::ExchangeRequest;
use crate::exchange::types::{ExchangeError, ExchangeResult, SubmissionOutcome};

/// Client for a single exchange endpoint.
#[derive(Clone)]
pub struct ExchangeClient {
    client: Client,
    endpoint: url::Url,
    timeout_duration: Duration,
}

impl ExchangeClient {
    /// Create a new exchange client.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the `/exchange` route
    /// * `timeout_duration` - Upper bound for the whole request
    pub fn new(endpoint: &str, timeout_duration: Duration) -> ExchangeResult<Self> {
        let endpoint: url::Url = endpoint.parse().map_err(|e: url::ParseError| {
            ExchangeError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = Client::builder().timeout(timeout_duration);
        if is_loopback(&endpoint) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ExchangeError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout_duration,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Submit a payload once and classify the response.
    pub async fn submit(&self, request: &ExchangeRequest) -> ExchangeResult<SubmissionOutcome> {
        let body = request.to_json()?;

        tracing::info!(
            endpoint = %self.endpoint,
            nonce = request.nonce,
            "Submitting action"
        );

        let response = match self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("request timed out after {:?}", self.timeout_duration)
                } else {
                    format!("request failed: {}", e)
                };
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Transport failure");
                return Ok(SubmissionOutcome::TransportFailure(reason));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Failed to read response body");
                return Ok(SubmissionOutcome::TransportFailure(format!(
                    "failed to read response body: {}",
                    e
                )));
            }
        };

        Ok(classify(status, text))
    }
}

/// Local endpoints are never reached through a system proxy.
fn is_loopback(endpoint: &url::Url) -> bool {
    match endpoint.host() {
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => false,
    }
}

/// Map a received status and body onto an outcome.
fn classify(status: StatusCode, body: String) -> SubmissionOutcome {
    if status != StatusCode::OK {
        tracing::warn!(status = status.as_u16(), body = %body, "Exchange rejected request");
        return SubmissionOutcome::RemoteRejection {
            status: status.as_u16(),
            body,
        };
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(confirmation) => {
            tracing::debug!(response = %confirmation, "Exchange accepted request");
            SubmissionOutcome::Success(confirmation)
        }
        Err(e) => {
            tracing::warn!(error = %e, body = %body, "Unparsable confirmation body");
            SubmissionOutcome::RemoteRejection {
                status: status.as_u16(),
                body,
            }
        }
    }
}

impl std::fmt::Debug for ExchangeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
