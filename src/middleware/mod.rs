//! Middleware components for the request client.
//!
//! Middleware follows Tower patterns and is attached with
//! [`MiniProgramBuilder::with_middleware`](crate::client::MiniProgramBuilder::with_middleware).
//!
//! - [`LoggingMiddleware`] - Logs request/response information with credentials redacted
//!
//! ## Usage
//!
//! ```ignore
//! use wechat_mp_client::MiniProgram;
//! use wechat_mp_client::middleware::LoggingMiddleware;
//!
//! let mp = MiniProgram::builder()
//!     .with_middleware(LoggingMiddleware::new())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::LoggingMiddleware;
