//! HTTP request primitive
//!
//! Plays the part of the host's `request` API: any response, whatever its
//! status, counts as success; only transport failures are errors.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::Method;
use reqwest::Client;
use serde_json::Value;
use tower::Service;

use crate::error::ClientError;
use crate::types::{HttpResponse, RequestOptions};

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Reusable HTTP client behind both flows
#[derive(Clone)]
pub struct RequestClient {
    http: Client,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl RequestClient {
    /// Create a new client builder
    pub fn builder() -> RequestClientBuilder {
        RequestClientBuilder::default()
    }

    /// Returns the underlying [`reqwest::Client`].
    ///
    /// Note: requests made through this client bypass the middleware pipeline.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    fn build_request(&self, options: RequestOptions) -> Result<reqwest::Request, ClientError> {
        let RequestOptions {
            url,
            method,
            header,
            data,
        } = options;

        let is_get = method == Method::GET;
        let mut builder = self.http.request(method, url);

        for (name, value) in header {
            builder = builder.header(name, value);
        }

        builder = match data {
            None => builder,
            // GET data travels in the query string, as the host does it
            Some(Value::Object(map)) if is_get => {
                let query: Vec<(String, String)> = map
                    .into_iter()
                    .map(|(key, value)| (key, query_value(value)))
                    .collect();
                builder.query(&query)
            }
            Some(data) => builder.json(&data),
        };

        Ok(builder.build()?)
    }

    /// Issue one request and collect `{statusCode, header, data}`
    ///
    /// # Errors
    /// - Returns `ClientError::Http` when the request cannot be built or no
    ///   response arrives (connect failure, timeout, broken body)
    ///
    /// Non-2xx statuses are returned as `Ok`.
    pub async fn request(&self, options: RequestOptions) -> Result<HttpResponse, ClientError> {
        let request = self.build_request(options)?;
        let response = self.send_request(request).await?;

        let status_code = response.status().as_u16();
        let header: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response.bytes().await?;
        let data = decode_body(&body);

        Ok(HttpResponse {
            status_code,
            header,
            data,
        })
    }
}

fn query_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

impl Service<reqwest::Request> for RequestClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for RequestClient
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use wechat_mp_client::client::RequestClient;
///
/// let client = RequestClient::builder()
///     .timeout(Duration::from_secs(15))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct RequestClientBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl RequestClientBuilder {
    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the RequestClient
    ///
    /// # Errors
    /// Returns an error if the underlying reqwest client cannot be created
    pub fn build(self) -> Result<RequestClient, ClientError> {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(RequestClient {
            http: client,
            middleware_executor: None,
        })
    }
}
