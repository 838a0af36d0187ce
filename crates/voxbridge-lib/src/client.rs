//! Bridge client — config handshake, SDK readiness poll, event relay.
//!
//! Lifecycle: fetch config from the collaborator server, poll the injected
//! [`SdkProvider`] until the SDK binding appears, construct a session,
//! attach the relay, fire `ready`. `Idle → Polling → {Ready | Failed}`;
//! a failed initialization leaves the session slot unset, so control
//! methods keep failing with `NotInitialized` instead of touching a
//! half-built session.
//!
//! Only one initialization sequence should be in flight per client; callers
//! must serialize concurrent calls themselves. There is no cancellation:
//! a poll terminates only by success or by exhausting its budget.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use voxbridge_core::{SessionConfig, SessionState, TranscriptEntry, VapiConfig, parse_transcript};

use crate::config;
use crate::error::BridgeError;
use crate::sdk::{NativeEvent, SdkProvider, VapiSdk, VapiSession};

/// Default poll spacing while waiting for the SDK binding.
const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default number of readiness probes before giving up.
const MAX_RETRIES: u32 = 10;

/// Tuning knobs for a bridge client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the config server.
    pub server_url: String,
    /// Spacing between readiness probes.
    pub poll_interval: Duration,
    /// Probe budget before `SdkLoadTimeout`.
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3002".into(),
            poll_interval: POLL_INTERVAL,
            max_retries: MAX_RETRIES,
        }
    }
}

/// A callback registration. One handler per variant; registering a variant
/// again replaces the previous handler.
pub enum Callback {
    /// Initialization completed and the session is live.
    Ready(Box<dyn Fn() + Send + Sync>),
    /// A voice call started.
    CallStart(Box<dyn Fn() + Send + Sync>),
    /// The voice call ended.
    CallEnd(Box<dyn Fn() + Send + Sync>),
    /// A transcript line was relayed.
    Transcript(Box<dyn Fn(TranscriptEntry) + Send + Sync>),
    /// The assistant requested a function call; receives the raw event.
    FunctionCall(Box<dyn Fn(&Value) + Send + Sync>),
    /// The SDK reported an error; receives the raw value.
    Error(Box<dyn Fn(&Value) + Send + Sync>),
}

// Handlers are stored as `Arc` so dispatch can clone one out and release the
// slot's lock before invoking it; a handler is then free to call `on()` and
// replace itself without deadlocking on its own slot.
#[derive(Default)]
struct Callbacks {
    ready: Mutex<Option<Arc<dyn Fn() + Send + Sync>>>,
    call_start: Mutex<Option<Arc<dyn Fn() + Send + Sync>>>,
    call_end: Mutex<Option<Arc<dyn Fn() + Send + Sync>>>,
    transcript: Mutex<Option<Arc<dyn Fn(TranscriptEntry) + Send + Sync>>>,
    function_call: Mutex<Option<Arc<dyn Fn(&Value) + Send + Sync>>>,
    error: Mutex<Option<Arc<dyn Fn(&Value) + Send + Sync>>>,
}

/// State and callbacks shared with the relay handlers the session owns.
/// Kept separate from `Inner` so the session's handlers never hold the
/// session itself alive through a reference cycle.
#[derive(Default)]
struct Shared {
    state: Mutex<SessionState>,
    callbacks: Callbacks,
}

struct Inner {
    options: ClientOptions,
    provider: Arc<dyn SdkProvider>,
    http: reqwest::Client,
    config: Mutex<Option<VapiConfig>>,
    session: Mutex<Option<Arc<dyn VapiSession>>>,
    shared: Arc<Shared>,
}

/// Client handle. Cheap to clone; all clones share one session and state.
#[derive(Clone)]
pub struct VapiClient {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl VapiClient {
    pub fn new(options: ClientOptions, provider: Arc<dyn SdkProvider>) -> Self {
        Self {
            inner: Arc::new(Inner {
                options,
                provider,
                http: reqwest::Client::new(),
                config: Mutex::new(None),
                session: Mutex::new(None),
                shared: Arc::new(Shared::default()),
            }),
        }
    }

    // ---------------------------------------------------------------------
    // Initialization
    // ---------------------------------------------------------------------

    /// Fetches config from the server, then runs [`initialize`].
    ///
    /// [`initialize`]: VapiClient::initialize
    pub async fn initialize_from_server(&self) -> Result<(), BridgeError> {
        let config =
            config::fetch_config(&self.inner.http, &self.inner.options.server_url).await?;
        self.initialize(config).await
    }

    /// Initializes against a known config: poll for the SDK binding,
    /// construct the session, attach the relay, fire `ready` exactly once.
    pub async fn initialize(&self, config: VapiConfig) -> Result<(), BridgeError> {
        config::validate(&config)?;

        let session_config = SessionConfig::new(&config);
        *lock(&self.inner.config) = Some(config);

        let sdk = self.wait_for_sdk().await?;

        tracing::info!("initializing SDK session");
        let session = sdk.run(&session_config).map_err(BridgeError::SdkInit)?;

        attach_relay(&self.inner.shared, session.as_ref());
        *lock(&self.inner.session) = Some(session);
        tracing::info!("SDK session initialized");

        let ready = lock(&self.inner.shared.callbacks.ready).clone();
        if let Some(ready) = ready {
            ready();
        }
        Ok(())
    }

    /// Polls the provider until the SDK binding appears.
    ///
    /// The counter advances only on an absent probe, so a construction
    /// failure after a successful probe never consumes poll budget.
    async fn wait_for_sdk(&self) -> Result<Arc<dyn VapiSdk>, BridgeError> {
        let max_retries = self.inner.options.max_retries;
        lock(&self.inner.shared.state).retry_count = 0;

        loop {
            if let Some(sdk) = self.inner.provider.lookup() {
                return Ok(sdk);
            }

            let attempts = {
                let mut state = lock(&self.inner.shared.state);
                state.retry_count += 1;
                state.retry_count
            };
            if attempts >= max_retries {
                return Err(BridgeError::SdkLoadTimeout { attempts });
            }

            tracing::debug!("waiting for SDK binding (attempt {attempts}/{max_retries})");
            tokio::time::sleep(self.inner.options.poll_interval).await;
        }
    }

    // ---------------------------------------------------------------------
    // Callback registry
    // ---------------------------------------------------------------------

    /// Registers a callback. Last registration for a variant wins.
    pub fn on(&self, callback: Callback) {
        let callbacks = &self.inner.shared.callbacks;
        match callback {
            Callback::Ready(f) => *lock(&callbacks.ready) = Some(Arc::from(f)),
            Callback::CallStart(f) => *lock(&callbacks.call_start) = Some(Arc::from(f)),
            Callback::CallEnd(f) => *lock(&callbacks.call_end) = Some(Arc::from(f)),
            Callback::Transcript(f) => *lock(&callbacks.transcript) = Some(Arc::from(f)),
            Callback::FunctionCall(f) => *lock(&callbacks.function_call) = Some(Arc::from(f)),
            Callback::Error(f) => *lock(&callbacks.error) = Some(Arc::from(f)),
        }
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Whether a voice call is currently in progress.
    pub fn is_active(&self) -> bool {
        lock(&self.inner.shared.state).call_active
    }

    /// Number of readiness probes that found the SDK absent.
    pub fn retry_count(&self) -> u32 {
        lock(&self.inner.shared.state).retry_count
    }

    /// Owned snapshot of the stored config; `None` before initialization.
    pub fn config(&self) -> Option<VapiConfig> {
        lock(&self.inner.config).clone()
    }

    // ---------------------------------------------------------------------
    // Session control surface
    // ---------------------------------------------------------------------

    /// Starts a voice call. The SDK contract does not guarantee a `start`
    /// capability; without one this is a logged no-op.
    pub fn start_call(&self) -> Result<(), BridgeError> {
        let session = self.session()?;
        if !session.start() {
            tracing::debug!("call start requested; session exposes no start capability");
        }
        Ok(())
    }

    /// Ends the current call, if the session exposes `stop`.
    pub fn end_call(&self) -> Result<(), BridgeError> {
        let session = self.session()?;
        if !session.stop() {
            tracing::debug!("call stop requested; session exposes no stop capability");
        }
        Ok(())
    }

    /// Sends a payload to the assistant unmodified, if the session exposes
    /// `send`.
    pub fn send_message(&self, payload: Value) -> Result<(), BridgeError> {
        let session = self.session()?;
        if !session.send(payload) {
            tracing::debug!("message send requested; session exposes no send capability");
        }
        Ok(())
    }

    fn session(&self) -> Result<Arc<dyn VapiSession>, BridgeError> {
        lock(&self.inner.session)
            .clone()
            .ok_or(BridgeError::NotInitialized)
    }
}

// ---------------------------------------------------------------------------
// Event relay
// ---------------------------------------------------------------------------

/// Subscribes the five native events exactly once on a fresh session.
/// Handlers never fail on their own behalf: unregistered callbacks and
/// unrecognized message payloads are silent no-ops.
fn attach_relay(shared: &Arc<Shared>, session: &dyn VapiSession) {
    let s = shared.clone();
    session.on(
        NativeEvent::CallStart,
        Box::new(move |_| {
            lock(&s.state).call_active = true;
            tracing::info!("call started");
            let cb = lock(&s.callbacks.call_start).clone();
            if let Some(cb) = cb {
                cb();
            }
        }),
    );

    let s = shared.clone();
    session.on(
        NativeEvent::CallEnd,
        Box::new(move |_| {
            lock(&s.state).call_active = false;
            tracing::info!("call ended");
            let cb = lock(&s.callbacks.call_end).clone();
            if let Some(cb) = cb {
                cb();
            }
        }),
    );

    let s = shared.clone();
    session.on(
        NativeEvent::Message,
        Box::new(move |payload| {
            if let Some((role, text)) = parse_transcript(payload) {
                let entry = TranscriptEntry::now(role, text);
                tracing::debug!("{}: {}", entry.role.as_str(), entry.text);
                let cb = lock(&s.callbacks.transcript).clone();
                if let Some(cb) = cb {
                    cb(entry);
                }
            }
        }),
    );

    let s = shared.clone();
    session.on(
        NativeEvent::FunctionCall,
        Box::new(move |payload| {
            let name = payload
                .pointer("/functionCall/name")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            tracing::debug!("function call: {name}");
            let cb = lock(&s.callbacks.function_call).clone();
            if let Some(cb) = cb {
                cb(payload);
            }
        }),
    );

    // Informational only: forwarded, no state change, no retry.
    let s = shared.clone();
    session.on(
        NativeEvent::Error,
        Box::new(move |payload| {
            tracing::warn!("SDK error event: {payload}");
            let cb = lock(&s.callbacks.error).clone();
            if let Some(cb) = cb {
                cb(payload);
            }
        }),
    );
}
