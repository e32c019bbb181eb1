//! Foody Harness Library
//!
//! Ordered, authenticated end-to-end tests for the Foody REST API.
//!
//! # Features
//!
//! - **Login once**: one bearer credential per run, attached to every request
//! - **Ordered steps**: explicit sequence numbers, executed strictly in order
//! - **Shared fixture**: the created food id flows from create to edit/delete
//! - **Scoped session**: the connection pool is released on every exit path
//!
//! # Example
//!
//! ```no_run
//! use foody_harness::{config::HarnessConfig, harness::Harness, suite};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HarnessConfig::load("foody.yaml")?;
//!     let steps = suite::steps_for(&config.checks);
//!     let report = Harness::new(config, steps)?.run().await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod harness;
pub mod metrics;
pub mod models;
pub mod suite;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{HarnessError, StepError};
pub use harness::{Harness, RunReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
