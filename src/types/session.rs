use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpResponse;

const SUCCESS_STATUS: &str = "success";

/// Envelope returned by the backend's `/auth/login`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<LoginSession>,
}

/// Session credentials inside a successful login envelope
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginSession {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

impl LoginSession {
    /// Extract the session from a login response, if it carries one
    ///
    /// Requires `status == "success"` and a non-empty `access_token`.
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let envelope: LoginEnvelope = response.data_as().ok()?;
        if envelope.status != SUCCESS_STATUS {
            return None;
        }
        envelope
            .data
            .filter(|session| !session.access_token.is_empty())
    }
}
