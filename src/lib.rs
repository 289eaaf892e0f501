//! WeChat Mini Program client flows for Rust
//!
//! Client-side counterpart of a mini-program backend: the login handshake
//! (`wx.login` code exchanged at `/auth/login`) and a bearer-authorized
//! fetch using the token kept in local storage.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wechat_mp_client::MiniProgram;
//! use wechat_mp_client::host::TestCodeLogin;
//! use wechat_mp_client::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mp = MiniProgram::builder()
//!         .base_url("http://127.0.0.1:5000")
//!         .build()?;
//!
//!     // Exchange a code for a session
//!     let store = Arc::new(MemoryStore::new());
//!     mp.login_flow(Arc::new(TestCodeLogin::new()))
//!         .persist_session_to(store.clone())
//!         .run()
//!         .await;
//!
//!     // Call an authorized endpoint with the stored token
//!     let outcome = mp.fetch(store).await;
//!     println!("{:?}", outcome.response().map(|r| &r.data));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] - HTTP request primitive and the [`MiniProgram`] facade
//! - [`flows`] - Login handshake and authorized fetch
//! - [`host`] - Host platform capabilities (login primitive, storage)
//! - [`storage`] - In-memory and file-backed key-value stores
//! - [`sink`] - Observability sink receiving flow outcomes
//! - [`middleware`] - Tower middleware for the request client
//! - [`error`] - Error types
//! - [`types`] - Codes, tokens, requests and responses
//!
//! ## Outcomes
//!
//! Flows never return `Err`. Each run ends in one terminal outcome, which is
//! both reported to the sink and returned:
//!
//! ```rust,ignore
//! use wechat_mp_client::flows::LoginOutcome;
//!
//! match outcome {
//!     LoginOutcome::PostSucceeded(response) => println!("{}", response.data),
//!     LoginOutcome::PostFailed(e) => eprintln!("request failed: {}", e),
//!     LoginOutcome::LoginFailed(e) => eprintln!("login failed: {}", e),
//!     LoginOutcome::NoCode => {}
//! }
//! ```

pub mod client;
pub mod error;
pub mod flows;
pub mod host;
pub mod middleware;
pub mod sink;
pub mod storage;
pub mod types;

pub use client::{MiniProgram, MiniProgramBuilder, RequestClient, RequestClientBuilder};
pub use error::{ClientError, PlatformError};
