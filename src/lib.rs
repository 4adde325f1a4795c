//! Hyperliquid big blocks toggle: sign and submit `evmUserModify` actions.

pub mod config;
pub mod exchange;
pub mod observability;
pub mod pipeline;
pub mod signing;

pub use config::schema::AppConfig;
pub use pipeline::{BigBlocksToggle, PipelineError};
