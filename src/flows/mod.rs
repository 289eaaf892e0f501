//! The two client-side flows
//!
//! - [`login`] - code exchange against the backend's `/auth/login`
//! - [`fetch`] - bearer-authorized GET using the stored token
//!
//! Both flows share a [`FlowContext`] and report every terminal outcome to
//! its [`EventSink`](crate::sink::EventSink). Neither retries.

pub mod context;
pub mod fetch;
pub mod login;

pub use context::FlowContext;
pub use fetch::{AuthorizedFetch, FetchOutcome};
pub use login::{LoginFlow, LoginOutcome};
