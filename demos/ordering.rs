//! # Example: Ordering
//!
//! A slow async call issued first still settles before a fast sync call issued
//! after it. Run with `RUST_LOG=seriate=debug` to watch the drain loop.

use std::time::Duration;

use seriate::{Emitter, MemberError};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let emitter = Emitter::<u64, String>::builder()
        .future("download", |ms| async move {
            println!("[download] start ({ms}ms)");
            tokio::time::sleep(Duration::from_millis(ms)).await;
            println!("[download] done");
            Ok(format!("downloaded in {ms}ms"))
        })
        .sync("checksum", |n| {
            println!("[checksum] running");
            Ok(format!("checksum {n:08x}"))
        })
        .sync("reject", |_| Err(MemberError::fail("nothing to reject")))
        .build()?;

    let download = emitter.call("download", 300);
    let checksum = emitter.call("checksum", 0xbeef);
    let reject = emitter.call("reject", 0);

    // Awaiting the later call first does not reorder execution.
    println!("checksum -> {}", checksum.await?);
    println!("download -> {}", download.await?);
    match reject.await {
        Ok(v) => println!("reject -> {v}"),
        Err(e) => println!("reject failed: {}", e.as_message()),
    }

    Ok(())
}
