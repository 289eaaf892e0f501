//! Unified entry point for both flows

use std::sync::Arc;

use crate::flows::{AuthorizedFetch, FetchOutcome, FlowContext, LoginFlow, LoginOutcome};
use crate::host::{LoginPrimitive, TokenStore};

/// Unified mini-program client
///
/// Owns the shared [`FlowContext`] and hands out flows bound to it.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use wechat_mp_client::MiniProgram;
/// use wechat_mp_client::host::StaticLogin;
/// use wechat_mp_client::storage::MemoryStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mp = MiniProgram::builder()
///         .base_url("http://127.0.0.1:5000")
///         .build()?;
///
///     let outcome = mp.login(Arc::new(StaticLogin::code("abc123"))).await;
///     println!("posted: {}", outcome.posted());
///
///     let outcome = mp.fetch(Arc::new(MemoryStore::with_token("xyz"))).await;
///     println!("fetched: {}", outcome.is_success());
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MiniProgram {
    context: Arc<FlowContext>,
}

impl MiniProgram {
    pub fn builder() -> super::builder::MiniProgramBuilder {
        super::builder::MiniProgramBuilder::default()
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    pub fn base_url(&self) -> &str {
        self.context.base_url()
    }

    pub fn fetch_url(&self) -> &str {
        self.context.fetch_url()
    }

    pub fn login_url(&self) -> String {
        self.context.login_url()
    }

    pub fn login_flow(&self, login: Arc<dyn LoginPrimitive>) -> LoginFlow {
        LoginFlow::new(self.context.clone(), login)
    }

    pub fn authorized_fetch(&self, store: Arc<dyn TokenStore>) -> AuthorizedFetch {
        AuthorizedFetch::new(self.context.clone(), store)
    }

    pub async fn login(&self, login: Arc<dyn LoginPrimitive>) -> LoginOutcome {
        self.login_flow(login).run().await
    }

    pub async fn fetch(&self, store: Arc<dyn TokenStore>) -> FetchOutcome {
        self.authorized_fetch(store).run().await
    }
}

impl From<Arc<FlowContext>> for MiniProgram {
    fn from(context: Arc<FlowContext>) -> Self {
        Self { context }
    }
}
