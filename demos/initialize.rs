//! # Example: Initialize gate
//!
//! Calls made before `initialize` are queued, not run. Calling `initialize`
//! puts it at the front of the queue and opens the gate; a second call is rejected.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use seriate::{CallError, Emitter};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let conn: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let (c1, c2) = (Arc::clone(&conn), Arc::clone(&conn));

    let emitter = Emitter::<String, String>::builder()
        .future("initialize", move |url: String| {
            let c = Arc::clone(&c1);
            async move {
                println!("[initialize] connecting to {url}");
                tokio::time::sleep(Duration::from_millis(100)).await;
                *c.lock() = Some(url.clone());
                Ok(format!("connected to {url}"))
            }
        })
        .sync("query", move |q: String| {
            let conn = c2.lock().clone().unwrap_or_else(|| "<none>".into());
            println!("[query] {q} on {conn}");
            Ok(format!("rows for {q}"))
        })
        .build()?;

    let early = emitter.call("query", "select 1".into());
    println!(
        "before initialize: initialized={} flushing={} queued={}",
        emitter.is_initialized(),
        emitter.is_flushing(),
        emitter.queued()
    );

    println!("{}", emitter.call("initialize", "db://local".into()).await?);
    println!("{}", early.await?);

    match emitter.call("initialize", "db://other".into()).await {
        Err(CallError::AlreadyInitialized) => println!("second initialize rejected"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
