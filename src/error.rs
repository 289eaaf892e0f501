use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the request primitive, the stores and configuration
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Failure reported by a host platform primitive such as `wx.login`
///
/// Mirrors the `{errMsg}` object the host hands to a `fail` callback.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{err_msg}")]
pub struct PlatformError {
    #[serde(rename = "errMsg")]
    pub err_msg: String,
}

impl PlatformError {
    pub fn new(err_msg: impl Into<String>) -> Self {
        Self {
            err_msg: err_msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_error_display() {
        let error = PlatformError::new("login:fail timeout");
        assert_eq!(error.to_string(), "login:fail timeout");
    }

    #[test]
    fn test_platform_error_uses_host_field_name() {
        let error: PlatformError = serde_json::from_str(r#"{"errMsg":"timeout"}"#).unwrap();
        assert_eq!(error.err_msg, "timeout");

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({ "errMsg": "timeout" }));
    }

    #[test]
    fn test_config_error_display() {
        let error = ClientError::Config("base_url is invalid".to_string());
        assert_eq!(error.to_string(), "Configuration error: base_url is invalid");
    }
}
