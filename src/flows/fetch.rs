//! Authorized fetch
//!
//! Reads the stored token and issues one `GET` with
//! `Authorization: Bearer <token>`. A missing token is not guarded against.

use std::sync::Arc;

use http::header::AUTHORIZATION;

use crate::error::ClientError;
use crate::flows::FlowContext;
use crate::host::TokenStore;
use crate::sink::FlowEvent;
use crate::types::{BearerToken, HttpResponse, RequestOptions};

/// Terminal state of one [`AuthorizedFetch::run`]
#[derive(Debug)]
pub enum FetchOutcome {
    Succeeded(HttpResponse),
    Failed(ClientError),
}

impl FetchOutcome {
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            FetchOutcome::Succeeded(response) => Some(response),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Succeeded(_))
    }
}

pub struct AuthorizedFetch {
    context: Arc<FlowContext>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for AuthorizedFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedFetch")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl AuthorizedFetch {
    pub fn new(context: Arc<FlowContext>, store: Arc<dyn TokenStore>) -> Self {
        Self { context, store }
    }

    /// Issue the request once and report the outcome to the sink
    pub async fn run(&self) -> FetchOutcome {
        let token = BearerToken::from_stored(self.store.get());
        let options = RequestOptions::get(self.context.fetch_url())
            .header(AUTHORIZATION.as_str(), token.header_value());

        match self.context.client.request(options).await {
            Ok(response) => {
                self.context.sink().record(FlowEvent::FetchResponse {
                    data: response.data.clone(),
                });
                FetchOutcome::Succeeded(response)
            }
            Err(error) => {
                self.context.sink().record(FlowEvent::FetchFailed {
                    error: error.to_string(),
                });
                FetchOutcome::Failed(error)
            }
        }
    }
}
