//! Observability sink for flow outcomes
//!
//! Every terminal outcome of a flow is handed to an [`EventSink`]. The
//! default [`LogSink`] forwards to the `log` facade; [`RecordingSink`] keeps
//! events in memory so callers can inspect them.

use log::{error, info};
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::PlatformError;
use crate::types::{HttpResponse, LoginResult};

/// Something a flow observed
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Host login primitive succeeded, with or without a code
    LoginSucceeded { result: LoginResult },
    /// A usable code was obtained and is about to be exchanged
    CodeReceived { code: String },
    /// Host login primitive failed
    LoginFailed { error: PlatformError },
    /// Backend answered the login request
    LoginResponse { response: HttpResponse },
    /// Login request never produced a response
    LoginRequestFailed { error: String },
    /// A returned session could not be written to storage
    SessionPersistFailed { error: String },
    /// Body of the authorized fetch
    FetchResponse { data: Value },
    /// Authorized fetch never produced a response
    FetchFailed { error: String },
}

impl FlowEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FlowEvent::LoginFailed { .. }
                | FlowEvent::LoginRequestFailed { .. }
                | FlowEvent::SessionPersistFailed { .. }
                | FlowEvent::FetchFailed { .. }
        )
    }
}

/// Capability receiving flow events
pub trait EventSink: Send + Sync {
    fn record(&self, event: FlowEvent);
}

/// Sink writing through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: FlowEvent) {
        match event {
            FlowEvent::LoginSucceeded { result } => {
                info!("[WechatMpClient] login succeeded: {:?}", result)
            }
            FlowEvent::CodeReceived { code } => info!("[WechatMpClient] received code: {}", code),
            FlowEvent::LoginFailed { error } => error!("[WechatMpClient] login failed: {}", error),
            FlowEvent::LoginResponse { response } => info!(
                "[WechatMpClient] login response ({}): {}",
                response.status_code, response.data
            ),
            FlowEvent::LoginRequestFailed { error } => {
                error!("[WechatMpClient] login request failed: {}", error)
            }
            FlowEvent::SessionPersistFailed { error } => {
                error!("[WechatMpClient] failed to persist session: {}", error)
            }
            FlowEvent::FetchResponse { data } => info!("[WechatMpClient] response: {}", data),
            FlowEvent::FetchFailed { error } => error!("[WechatMpClient] error: {}", error),
        }
    }
}

/// Sink keeping every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FlowEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.lock().clone()
    }

    pub fn failures(&self) -> Vec<FlowEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_failure())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: FlowEvent) {
        self.events.lock().push(event);
    }
}
