//! voxbridge-lib — bridge engine for a hosted voice-assistant SDK.
//!
//! Config fetch, SDK readiness polling, session construction, event relay,
//! and the HTTP config server. Depends on voxbridge-core for pure types.

pub mod client;
pub mod config;
pub mod error;
pub mod sdk;
pub mod server;
pub mod ui;

pub use client::{Callback, ClientOptions, VapiClient};
pub use error::BridgeError;
pub use sdk::{NativeEvent, SdkProvider, VapiSdk, VapiSession};

// Re-export voxbridge-core for convenience
pub use voxbridge_core as core;
