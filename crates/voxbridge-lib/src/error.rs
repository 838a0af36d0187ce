//! Error types for the bridge engine.
//!
//! All five variants are terminal for the initialization attempt that raised
//! them; nothing here is retried internally beyond the documented poll
//! budget. Relay-phase errors (the SDK's native `error` event) are not
//! represented here at all — they are forwarded to the registered callback
//! and never escalate to a `BridgeError`.

use thiserror::Error;

/// Failure modes of the bridge client.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The config endpoint answered with a non-success status.
    #[error("config fetch failed with status {status}")]
    ConfigFetch { status: u16 },

    /// The config request itself could not be completed.
    #[error("config request error: {0}")]
    ConfigRequest(#[from] reqwest::Error),

    /// The config body decoded but a required field was missing or empty.
    #[error("invalid configuration from server: missing {field}")]
    ConfigInvalid { field: &'static str },

    /// The SDK binding never appeared within the poll budget.
    #[error("SDK failed to load after {attempts} attempts")]
    SdkLoadTimeout { attempts: u32 },

    /// The SDK's session-creation entry point failed.
    #[error("SDK initialization failed: {0}")]
    SdkInit(String),

    /// A session control method was called before initialization succeeded.
    #[error("not initialized: no SDK session exists")]
    NotInitialized,
}
