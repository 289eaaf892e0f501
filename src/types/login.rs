use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AuthorizationCode;

/// Success payload of the host login primitive
///
/// The host reports `{code, errMsg, ...}`; only `code` is interpreted, every
/// other field is kept untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResult {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            extra: Map::new(),
        }
    }

    pub fn without_code() -> Self {
        Self::default()
    }

    /// The code, if present and non-empty
    pub fn authorization_code(&self) -> Option<AuthorizationCode> {
        self.code
            .as_deref()
            .and_then(|code| AuthorizationCode::new(code).ok())
    }
}
