//! Config fetch — one outbound request to the collaborator server.

use voxbridge_core::VapiConfig;

use crate::error::BridgeError;

/// Fetches `{base_url}/api/vapi-config` and validates both fields.
///
/// Single-shot: never retried internally. The caller may retry by invoking
/// it again.
pub async fn fetch_config(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<VapiConfig, BridgeError> {
    let url = format!("{}/api/vapi-config", base_url.trim_end_matches('/'));
    let resp = client.get(&url).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(BridgeError::ConfigFetch {
            status: status.as_u16(),
        });
    }

    let config: VapiConfig = resp.json().await?;
    validate(&config)?;

    tracing::info!("configuration loaded from server");
    Ok(config)
}

/// Rejects configs with a missing or empty field. The server serves empty
/// strings when its environment is unset, so this check lives client-side.
pub fn validate(config: &VapiConfig) -> Result<(), BridgeError> {
    if config.public_key.is_empty() {
        return Err(BridgeError::ConfigInvalid {
            field: "publicKey",
        });
    }
    if config.assistant_id.is_empty() {
        return Err(BridgeError::ConfigInvalid {
            field: "assistantId",
        });
    }
    Ok(())
}
