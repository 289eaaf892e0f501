use std::sync::Arc;

use crate::client::RequestClient;
use crate::sink::EventSink;

pub(crate) const LOGIN_PATH: &str = "/auth/login";

/// Shared resources for the flows
///
/// Holds the request client, the observability sink and the two endpoints.
#[derive(Clone)]
pub struct FlowContext {
    pub(crate) client: Arc<RequestClient>,
    pub(crate) sink: Arc<dyn EventSink>,
    base_url: String,
    fetch_url: String,
}

impl std::fmt::Debug for FlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowContext")
            .field("client", &self.client)
            .field("sink", &"EventSink { .. }")
            .field("base_url", &self.base_url)
            .field("fetch_url", &self.fetch_url)
            .finish()
    }
}

impl FlowContext {
    pub fn new(
        client: Arc<RequestClient>,
        sink: Arc<dyn EventSink>,
        base_url: impl Into<String>,
        fetch_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            sink,
            base_url: base_url.into(),
            fetch_url: fetch_url.into(),
        }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_url(&self) -> &str {
        &self.fetch_url
    }

    /// `<base>/auth/login`
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LOGIN_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::LogSink;

    fn context(base_url: &str) -> FlowContext {
        let client = Arc::new(RequestClient::builder().build().unwrap());
        FlowContext::new(
            client,
            Arc::new(LogSink),
            base_url,
            "http://127.0.0.1:5000/child/get",
        )
    }

    #[test]
    fn test_login_url() {
        assert_eq!(
            context("http://127.0.0.1:5000").login_url(),
            "http://127.0.0.1:5000/auth/login"
        );
    }

    #[test]
    fn test_login_url_trailing_slash() {
        assert_eq!(
            context("https://api.example.com/v1/").login_url(),
            "https://api.example.com/v1/auth/login"
        );
    }
}
