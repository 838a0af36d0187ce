//! HTTP config server.
//!
//! Serves the SDK credentials the browser page needs, a health check, and
//! optionally the page's static assets. CORS-permissive so the page can be
//! opened from anywhere during development.

use std::path::PathBuf;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use voxbridge_core::{Health, VapiConfig};

pub const DEFAULT_PORT: u16 = 3002;

/// Server configuration, sourced from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_key: String,
    pub assistant_id: String,
    /// Directory of static assets to serve as a fallback, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: DEFAULT_PORT,
            public_key: String::new(),
            assistant_id: String::new(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `VAPI_PUBLIC_KEY`, and `VAPI_ASSISTANT_ID`.
    ///
    /// Unset credentials become empty strings: the endpoint still answers
    /// 200 and clients are expected to validate on their side.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let public_key = std::env::var("VAPI_PUBLIC_KEY").unwrap_or_default();
        let assistant_id = std::env::var("VAPI_ASSISTANT_ID").unwrap_or_default();

        if public_key.is_empty() {
            tracing::warn!("VAPI_PUBLIC_KEY is not set; serving empty config");
        }
        if assistant_id.is_empty() {
            tracing::warn!("VAPI_ASSISTANT_ID is not set; serving empty config");
        }

        Self {
            port,
            public_key,
            assistant_id,
            ..Self::default()
        }
    }

    /// Address to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
struct AppState {
    config: VapiConfig,
}

/// Builds the axum router.
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        config: VapiConfig {
            public_key: config.public_key.clone(),
            assistant_id: config.assistant_id.clone(),
        },
    };

    let mut app = Router::new()
        .route("/api/vapi-config", get(vapi_config))
        .route("/health", get(health))
        .with_state(state);

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
}

async fn vapi_config(State(state): State<AppState>) -> Json<VapiConfig> {
    Json(state.config)
}

async fn health() -> Json<Health> {
    Json(Health::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn test_router(public_key: &str, assistant_id: &str) -> Router {
        router(&ServerConfig {
            public_key: public_key.into(),
            assistant_id: assistant_id.into(),
            ..ServerConfig::default()
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn config_endpoint_serves_credentials() {
        let (status, body) = get_json(test_router("pk-1", "asst-2"), "/api/vapi-config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["publicKey"], "pk-1");
        assert_eq!(body["assistantId"], "asst-2");
    }

    #[tokio::test]
    async fn unset_credentials_serve_empty_strings() {
        let (status, body) = get_json(router(&ServerConfig::default()), "/api/vapi-config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["publicKey"], "");
        assert_eq!(body["assistantId"], "");
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy_with_timestamp() {
        let (status, body) = get_json(test_router("pk", "asst"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let response = test_router("pk", "asst")
            .oneshot(
                Request::builder()
                    .uri("/api/vapi-config")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn unknown_route_without_static_dir_is_not_found() {
        let response = test_router("pk", "asst")
            .oneshot(
                Request::builder()
                    .uri("/no-such-page.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
