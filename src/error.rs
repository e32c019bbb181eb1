//! Error types shared across the harness

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that stop the harness itself, as opposed to failing one step
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Duplicate step order {order}: '{first}' and '{second}'")]
    DuplicateStepOrder {
        order: u32,
        first: String,
        second: String,
    },
}

/// Failure of a single step
#[derive(Error, Debug)]
pub enum StepError {
    /// Status or body did not match; later steps still run
    #[error("{0}")]
    Assertion(String),

    /// Response body could not be decoded; later steps still run
    #[error("Undecodable response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network, DNS or timeout failure; aborts the run
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl StepError {
    /// Whether this failure should abort the remaining steps
    pub fn is_fatal(&self) -> bool {
        matches!(self, StepError::Transport(_))
    }
}

/// Result type returned by every step
pub type StepResult = Result<(), StepError>;
