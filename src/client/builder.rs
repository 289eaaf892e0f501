use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::error::ClientError;
use crate::flows::FlowContext;
use crate::sink::{EventSink, LogSink};

use super::request_client::{
    MiddlewareExecutor, RequestClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use super::MiniProgram;

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub(crate) const DEFAULT_FETCH_URL: &str = "http://127.0.0.1:5000/child/get";

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>;

#[must_use]
#[derive(Default)]
pub struct MiniProgramBuilder<M = ()> {
    base_url: Option<String>,
    fetch_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    sink: Option<Arc<dyn EventSink>>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for MiniProgramBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniProgramBuilder")
            .field("base_url", &self.base_url)
            .field("fetch_url", &self.fetch_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("sink", &self.sink.as_ref().map(|_| ".."))
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> MiniProgramBuilder<M> {
    /// Backend base URL; the login request goes to `<base>/auth/login`
    ///
    /// Default: `http://127.0.0.1:5000`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Full URL of the authorized fetch
    ///
    /// Default: `http://127.0.0.1:5000/child/get`
    pub fn fetch_url(mut self, url: impl Into<String>) -> Self {
        self.fetch_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Where flow outcomes are reported. Default: [`LogSink`]
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> MiniProgramBuilder<M2>
    where
        M2: Layer<RequestClient> + Clone + Send + Sync + 'static,
    {
        MiniProgramBuilder {
            base_url: self.base_url,
            fetch_url: self.fetch_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            sink: self.sink,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<MiniProgram, ClientError>
    where
        M: Layer<RequestClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_url("base_url", &base_url)?;

        let fetch_url = self
            .fetch_url
            .unwrap_or_else(|| DEFAULT_FETCH_URL.to_string());
        validate_url("fetch_url", &fetch_url)?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let mut client = RequestClient::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(LogSink) as Arc<dyn EventSink>);
        let context = Arc::new(FlowContext::new(
            Arc::new(client),
            sink,
            base_url,
            fetch_url,
        ));

        Ok(MiniProgram::from(context))
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ClientError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::Config(format!(
            "{} must start with http:// or https://, got: {}",
            field, url
        )));
    }
    Ok(())
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| -> MiddlewareFuture {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
