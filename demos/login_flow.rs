//! Login handshake example
//!
//! This example demonstrates the login flow:
//! 1. Obtain a code from the login primitive (test codes here)
//! 2. POST it to `<base>/auth/login`
//! 3. Keep the returned access token in a file-backed store
//!
//! Run with: cargo run --example login_flow

use std::sync::Arc;

use wechat_mp_client::{
    flows::LoginOutcome, host::TestCodeLogin, storage::FileStore, MiniProgram,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mp = MiniProgram::builder()
        .base_url("http://127.0.0.1:5000")
        .build()?;

    let store = Arc::new(FileStore::open("storage.json")?);

    let outcome = mp
        .login_flow(Arc::new(TestCodeLogin::new()))
        .persist_session_to(store)
        .run()
        .await;

    match outcome {
        LoginOutcome::PostSucceeded(response) => {
            println!("Login response ({}): {}", response.status_code, response.data);
        }
        LoginOutcome::PostFailed(e) => eprintln!("Login request failed: {}", e),
        LoginOutcome::LoginFailed(e) => eprintln!("Login failed: {}", e),
        LoginOutcome::NoCode => println!("No code returned, nothing sent"),
    }

    Ok(())
}
