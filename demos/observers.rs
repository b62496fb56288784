//! # Example: Observers
//!
//! Requires the `logging` feature:
//! `cargo run --example observers --features logging`

use std::time::Duration;

use seriate::{Emitter, LogWriter, MemberError, Subscription};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let emitter = Emitter::<u32, u32>::builder()
        .sync("square", |n| Ok(n * n))
        .future("slow_inc", |n| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(n + 1)
        })
        .sync("divide", |n| {
            if n == 0 {
                return Err(MemberError::fail("division by zero"));
            }
            Ok(100 / n)
        })
        .build()?;

    let _log = emitter.subscribe(LogWriter::new());
    let audit = emitter.subscribe(
        Subscription::new()
            .named("audit")
            .on("square", |result: &u32, args: &u32| {
                println!("[audit] square({args}) = {result}");
                Ok(())
            })
            .catch(|member: &str, error: &MemberError, args: &u32| {
                println!("[audit] {member}({args}) failed: {error}");
                Ok(())
            }),
    );

    emitter.call("square", 7).await?;
    let _ = emitter.call("divide", 0).await;

    // Silence success notifications; failures still reach `catch`.
    emitter.disable();
    emitter.call("slow_inc", 1).await?;
    let _ = emitter.call("divide", 0).await;
    emitter.enable();

    // Removal is queued behind `square(2)`: audit sees it, but not `square(3)`.
    let before = emitter.call("square", 2);
    audit.unsubscribe();
    let after = emitter.call("square", 3);
    before.await?;
    after.await?;
    emitter.idle().await;

    println!("observers left: {:?}", emitter.subscriptions());
    Ok(())
}
