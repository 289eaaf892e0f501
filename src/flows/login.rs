//! Login handshake
//!
//! `login()` on the host, then `POST <base>/auth/login` with `{code}`.

use std::sync::Arc;

use crate::error::{ClientError, PlatformError};
use crate::flows::FlowContext;
use crate::host::{KeyValueStore, LoginPrimitive, TOKEN_KEY};
use crate::sink::FlowEvent;
use crate::types::{HttpResponse, LoginSession, RequestOptions};

/// Terminal state of one [`LoginFlow::run`]
#[derive(Debug)]
pub enum LoginOutcome {
    /// Login succeeded without a usable code; nothing was sent
    NoCode,
    /// The backend answered (any status)
    PostSucceeded(HttpResponse),
    /// The login request produced no response
    PostFailed(ClientError),
    /// The host login primitive failed; nothing was sent
    LoginFailed(PlatformError),
}

impl LoginOutcome {
    /// Whether a POST was issued
    pub fn posted(&self) -> bool {
        matches!(
            self,
            LoginOutcome::PostSucceeded(_) | LoginOutcome::PostFailed(_)
        )
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            LoginOutcome::PostSucceeded(response) => Some(response),
            _ => None,
        }
    }
}

/// One-shot code exchange against the backend
pub struct LoginFlow {
    context: Arc<FlowContext>,
    login: Arc<dyn LoginPrimitive>,
    session_store: Option<Arc<dyn KeyValueStore>>,
}

impl std::fmt::Debug for LoginFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("context", &self.context)
            .field("persists_session", &self.session_store.is_some())
            .finish_non_exhaustive()
    }
}

impl LoginFlow {
    pub fn new(context: Arc<FlowContext>, login: Arc<dyn LoginPrimitive>) -> Self {
        Self {
            context,
            login,
            session_store: None,
        }
    }

    /// Write a returned `access_token` under the `token` key
    ///
    /// Off unless set. Only a `{"status": "success", "data": {"access_token"}}`
    /// body is written; any other body leaves the store untouched.
    pub fn persist_session_to(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Run the handshake once
    ///
    /// Every outcome is reported to the sink and returned; nothing is
    /// retried.
    pub async fn run(&self) -> LoginOutcome {
        let sink = self.context.sink();

        let result = match self.login.login().await {
            Ok(result) => result,
            Err(error) => {
                sink.record(FlowEvent::LoginFailed {
                    error: error.clone(),
                });
                return LoginOutcome::LoginFailed(error);
            }
        };

        sink.record(FlowEvent::LoginSucceeded {
            result: result.clone(),
        });

        let Some(code) = result.authorization_code() else {
            return LoginOutcome::NoCode;
        };

        sink.record(FlowEvent::CodeReceived {
            code: code.as_str().to_string(),
        });

        let options = RequestOptions::post(self.context.login_url())
            .data(serde_json::json!({ "code": code.as_str() }));

        match self.context.client.request(options).await {
            Ok(response) => {
                sink.record(FlowEvent::LoginResponse {
                    response: response.clone(),
                });
                self.persist_session(&response);
                LoginOutcome::PostSucceeded(response)
            }
            Err(error) => {
                sink.record(FlowEvent::LoginRequestFailed {
                    error: error.to_string(),
                });
                LoginOutcome::PostFailed(error)
            }
        }
    }

    fn persist_session(&self, response: &HttpResponse) {
        let Some(store) = &self.session_store else {
            return;
        };
        let Some(session) = LoginSession::from_response(response) else {
            return;
        };

        if let Err(error) = store.set_item(TOKEN_KEY, &session.access_token) {
            self.context.sink().record(FlowEvent::SessionPersistFailed {
                error: error.to_string(),
            });
        }
    }
}
