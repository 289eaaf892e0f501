use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Result of a completed request: `{statusCode, header, data}`
///
/// The body is kept untyped. JSON bodies are parsed into [`Value`], anything
/// else is carried as [`Value::String`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default)]
    pub header: HashMap<String, String>,
    #[serde(default)]
    pub data: Value,
}

impl HttpResponse {
    /// Decode the body when the caller does want a typed view
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}
