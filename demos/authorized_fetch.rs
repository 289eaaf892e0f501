//! Authorized fetch example
//!
//! Reads the token written by the `login_flow` example and calls
//! `GET /child/get` with it.
//!
//! Run with: cargo run --example authorized_fetch

use std::sync::Arc;

use wechat_mp_client::{
    flows::FetchOutcome, middleware::LoggingMiddleware, storage::FileStore, MiniProgram,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mp = MiniProgram::builder()
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    let store = Arc::new(FileStore::open("storage.json")?);

    match mp.fetch(store).await {
        FetchOutcome::Succeeded(response) => println!("Response: {}", response.data),
        FetchOutcome::Failed(e) => eprintln!("Error: {}", e),
    }

    Ok(())
}
