//! HTTP client module
//!
//! This module contains the RequestClient and the MiniProgram facade.

mod request_client;
pub use request_client::{RequestClient, RequestClientBuilder};

mod mini_program;
pub use mini_program::MiniProgram;

mod builder;
pub use builder::MiniProgramBuilder;
