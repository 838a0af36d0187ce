//! Shared types for the voxbridge bridge ecosystem.
//!
//! Wire structs use camelCase renames because the config endpoint and the
//! SDK entry point both speak the JSON dialect of the hosted assistant
//! service.

use serde::{Deserialize, Serialize};

// ─── Config types ──────────────────────────────────────────────────────────

/// Credentials handed to the browser-side SDK, served by the config server.
///
/// The server may legitimately serve empty strings when its environment is
/// unset; clients must validate both fields before use. Fields default on
/// decode so a body with a key missing outright is indistinguishable from
/// one serving an empty string — both fail the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VapiConfig {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub assistant_id: String,
}

impl VapiConfig {
    /// True when both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.public_key.is_empty() && !self.assistant_id.is_empty()
    }
}

/// Payload handed to the SDK's session-creation entry point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub api_key: String,
    pub assistant: String,
    pub config: SessionOverrides,
}

/// Widget-level overrides nested under `config` in the session payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverrides {
    pub hide_button: bool,
}

impl SessionConfig {
    pub fn new(config: &VapiConfig) -> Self {
        Self {
            api_key: config.public_key.clone(),
            assistant: config.assistant_id.clone(),
            config: SessionOverrides { hide_button: false },
        }
    }
}

// ─── Transcript types ──────────────────────────────────────────────────────

/// Speaker side of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Maps a raw payload role string. Anything other than exactly
    /// `"assistant"` is treated as the user side.
    pub fn from_payload(raw: Option<&str>) -> Self {
        match raw {
            Some("assistant") => Role::Assistant,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One line of conversation, derived from an SDK `message` event.
/// Rendered and discarded, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    /// RFC 3339 timestamp stamped when the message was relayed.
    pub timestamp: String,
}

impl TranscriptEntry {
    /// Builds an entry stamped with the current time.
    pub fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ─── Server types ──────────────────────────────────────────────────────────

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

impl Health {
    pub fn now() -> Self {
        Self {
            status: "healthy".into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ─── Client session state ──────────────────────────────────────────────────

/// Mutable state owned by a bridge client instance.
///
/// Mutated only by the client's own initialization sequence and relay
/// handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionState {
    /// Whether a voice call is currently in progress.
    pub call_active: bool,
    /// Number of readiness probes that found the SDK absent.
    pub retry_count: u32,
}
