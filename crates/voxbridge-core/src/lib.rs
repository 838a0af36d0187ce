//! voxbridge-core — pure types for the voxbridge voice-assistant bridge.
//!
//! These types are shared between voxbridge-lib, voxbridge-cli, and any
//! downstream consumer of the config server's wire format. Keeping them here
//! means consumers can depend on the wire structs without pulling in tokio,
//! axum, or reqwest.

pub mod transcript;
pub mod types;

pub use transcript::parse_transcript;
pub use types::{Health, Role, SessionConfig, SessionState, TranscriptEntry, VapiConfig};
