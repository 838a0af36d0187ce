//! SDK abstraction seam.
//!
//! The real assistant SDK is loaded out-of-band and announces itself by
//! appearing at a well-known binding with no completion signal. Rather than
//! probing ambient global state, the client takes an [`SdkProvider`] and
//! asks it; tests substitute fakes, production code plugs in whatever
//! discovers the real binding.

use std::sync::Arc;

use serde_json::Value;
use voxbridge_core::SessionConfig;

/// Handler for one native event, invoked with the raw event payload.
/// Events that carry no payload (`call-start`, `call-end`) pass `Null`.
pub type NativeHandler = Box<dyn Fn(&Value) + Send + Sync>;

/// The five event names defined by the SDK's own contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEvent {
    CallStart,
    CallEnd,
    Message,
    FunctionCall,
    Error,
}

impl NativeEvent {
    /// The SDK's wire name for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeEvent::CallStart => "call-start",
            NativeEvent::CallEnd => "call-end",
            NativeEvent::Message => "message",
            NativeEvent::FunctionCall => "function-call",
            NativeEvent::Error => "error",
        }
    }
}

/// Lookup for the asynchronously-loaded SDK binding.
///
/// Returns `None` while the binding has not appeared yet. The client polls
/// this once per readiness attempt.
pub trait SdkProvider: Send + Sync {
    fn lookup(&self) -> Option<Arc<dyn VapiSdk>>;
}

impl<F> SdkProvider for F
where
    F: Fn() -> Option<Arc<dyn VapiSdk>> + Send + Sync,
{
    fn lookup(&self) -> Option<Arc<dyn VapiSdk>> {
        self()
    }
}

/// The SDK binding's entry point.
pub trait VapiSdk: Send + Sync {
    /// Constructs a live session. An `Err` models a construction exception
    /// thrown by the SDK.
    fn run(&self, config: &SessionConfig) -> Result<Arc<dyn VapiSession>, String>;
}

/// A live assistant session.
///
/// `on` is guaranteed by the SDK contract; the control methods are not.
/// Each control method returns `true` when the capability exists and was
/// invoked, `false` when the session does not expose it. The defaults model
/// a session with no control surface.
pub trait VapiSession: Send + Sync {
    /// Subscribes a handler to a native event. The bridge subscribes each
    /// event exactly once, immediately after construction.
    fn on(&self, event: NativeEvent, handler: NativeHandler);

    /// Starts a voice call, if the session exposes `start`.
    fn start(&self) -> bool {
        false
    }

    /// Stops the current call, if the session exposes `stop`.
    fn stop(&self) -> bool {
        false
    }

    /// Sends a payload to the assistant, if the session exposes `send`.
    fn send(&self, _payload: Value) -> bool {
        false
    }
}
