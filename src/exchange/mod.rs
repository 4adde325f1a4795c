//! Exchange submission subsystem.
//!
//! # Data Flow
//! ```text
//! SignedAction
//!     → request.rs (ExchangeRequest JSON body)
//!     → client.rs (single POST, timeout, classification)
//!     → SubmissionOutcome
//! ```

pub mod client;
pub mod request;
pub mod types;

pub use client::ExchangeClient;
pub use request::{ExchangeRequest, RequestBuilder};
pub use types::{confirmation_error, ExchangeError, ExchangeResult, SubmissionOutcome};
