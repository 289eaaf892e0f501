//! Host platform capabilities
//!
//! The mini-program runtime hands scripts a `login` primitive and a
//! synchronous key-value storage. Both are modelled as traits so the flows
//! receive them explicitly instead of reaching for globals.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ClientError, PlatformError};
use crate::types::LoginResult;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

pub type LoginFuture<'a> =
    Pin<Box<dyn Future<Output = Result<LoginResult, PlatformError>> + Send + 'a>>;

/// The host's `login` primitive
///
/// Resolves once with either the success payload or the failure object. No
/// retry or timeout is layered on top.
pub trait LoginPrimitive: Send + Sync {
    fn login(&self) -> LoginFuture<'_>;
}

/// Synchronous key-value storage (`getStorageSync` and friends)
pub trait KeyValueStore: Send + Sync {
    /// Read a key. Missing keys yield `None`, never an error.
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError>;

    fn remove_item(&self, key: &str) -> Result<(), ClientError>;
}

/// Read access to the stored bearer token
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
}

impl<S> TokenStore for S
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self) -> Option<String> {
        self.get_item(TOKEN_KEY)
    }
}

/// Login primitive that always resolves to the same outcome
#[derive(Debug, Clone)]
pub struct StaticLogin {
    outcome: Result<LoginResult, PlatformError>,
}

impl StaticLogin {
    pub fn success(result: LoginResult) -> Self {
        Self {
            outcome: Ok(result),
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::success(LoginResult::with_code(code))
    }

    pub fn failure(error: PlatformError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl LoginPrimitive for StaticLogin {
    fn login(&self) -> LoginFuture<'_> {
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

/// Login primitive issuing `test_code_<n>` codes
///
/// The backend's test mode maps such a code to the test user `n`, which
/// makes it usable against a development server without a real host.
#[derive(Debug)]
pub struct TestCodeLogin {
    next: AtomicU64,
}

impl TestCodeLogin {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(user: u64) -> Self {
        Self {
            next: AtomicU64::new(user),
        }
    }
}

impl Default for TestCodeLogin {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPrimitive for TestCodeLogin {
    fn login(&self) -> LoginFuture<'_> {
        let user = self.next.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(LoginResult::with_code(format!("test_code_{user}"))) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_static_login_success() {
        let login = StaticLogin::code("abc123");
        let result = login.login().await.unwrap();
        assert_eq!(result.code.as_deref(), Some("abc123"));

        // replays on every call
        let again = login.login().await.unwrap();
        assert_eq!(again, result);
    }

    #[tokio::test]
    async fn test_static_login_failure() {
        let login = StaticLogin::failure(PlatformError::new("timeout"));
        let error = login.login().await.unwrap_err();
        assert_eq!(error.err_msg, "timeout");
    }

    #[tokio::test]
    async fn test_test_code_login_increments() {
        let login = TestCodeLogin::new();
        let first = login.login().await.unwrap();
        let second = login.login().await.unwrap();

        assert_eq!(first.code.as_deref(), Some("test_code_1"));
        assert_eq!(second.code.as_deref(), Some("test_code_2"));
    }

    #[tokio::test]
    async fn test_test_code_login_custom_start() {
        let login = TestCodeLogin::starting_at(7);
        let result = login.login().await.unwrap();
        assert_eq!(result.code.as_deref(), Some("test_code_7"));
    }

    #[test]
    fn test_token_store_reads_token_key() {
        let store = MemoryStore::new();
        assert_eq!(TokenStore::get(&store), None);

        store.set_item(TOKEN_KEY, "xyz").unwrap();
        store.set_item("other", "ignored").unwrap();
        assert_eq!(TokenStore::get(&store), Some("xyz".to_string()));
    }
}
