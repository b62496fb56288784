use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{CallError, Emitter, MemberError, Observe, ObserverError, Subscription};

type Log = Arc<Mutex<Vec<String>>>;

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().clone()
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

/// Builds `initialize` + `first` async members that push their names to `log`.
fn gated(log: &Log) -> Emitter<(), ()> {
    let (l1, l2) = (Arc::clone(log), Arc::clone(log));
    Emitter::<(), ()>::builder()
        .future("initialize", move |_| {
            let l = Arc::clone(&l1);
            async move {
                tokio::task::yield_now().await;
                l.lock().push("init".into());
                Ok(())
            }
        })
        .future("first", move |_| {
            let l = Arc::clone(&l2);
            async move {
                l.lock().push("first".into());
                Ok(())
            }
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_sync_members_settle_in_call_order() {
    let log = log();
    let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
    let emitter = Emitter::<(), ()>::builder()
        .sync("first", move |_| {
            l1.lock().push("first".into());
            Ok(())
        })
        .sync("second", move |_| {
            l2.lock().push("second".into());
            Ok(())
        })
        .build()
        .unwrap();

    let _ = emitter.call("first", ());
    emitter.call("second", ()).await.unwrap();

    assert_eq!(entries(&log), vec!["first", "second"]);
}

#[tokio::test]
async fn test_slow_earlier_call_finishes_before_fast_later_call() {
    let log = log();
    let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
    let emitter = Emitter::<u64, u64>::builder()
        .future("slow", move |ms| {
            let l = Arc::clone(&l1);
            async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                l.lock().push(format!("slow:{ms}"));
                Ok(ms)
            }
        })
        .future("fast", move |n| {
            let l = Arc::clone(&l2);
            async move {
                l.lock().push(format!("fast:{n}"));
                Ok(n)
            }
        })
        .build()
        .unwrap();

    let slow = emitter.call("slow", 40);
    let fast = emitter.call("fast", 1);

    assert_eq!(fast.await, Ok(1));
    assert_eq!(slow.await, Ok(40));
    assert_eq!(entries(&log), vec!["slow:40", "fast:1"]);
}

#[tokio::test]
async fn test_async_calls_never_overlap() {
    let running = counter();
    let peak = counter();
    let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
    let emitter = Emitter::<u64, u64>::builder()
        .future("work", move |ms| {
            let (r, p) = (Arc::clone(&r), Arc::clone(&p));
            async move {
                let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(ms)).await;
                r.fetch_sub(1, Ordering::SeqCst);
                Ok(ms)
            }
        })
        .build()
        .unwrap();

    let calls: Vec<_> = [5, 1, 3, 0, 2].into_iter().map(|ms| emitter.call("work", ms)).collect();
    let results = futures::future::join_all(calls).await;

    assert_eq!(results, vec![Ok(5), Ok(1), Ok(3), Ok(0), Ok(2)]);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_initialize_runs_before_earlier_calls() {
    let log = log();
    let emitter = gated(&log);

    let first = emitter.call("first", ());
    assert!(!emitter.is_initialized());
    assert!(!emitter.is_flushing(), "gate holds the drain back");
    assert_eq!(emitter.queued(), 1);

    let init = emitter.call("initialize", ());
    assert!(emitter.is_initialized());
    assert!(emitter.is_flushing());

    first.await.unwrap();
    init.await.unwrap();
    assert_eq!(entries(&log), vec!["init", "first"]);
}

#[tokio::test]
async fn test_initialize_then_first_without_awaiting_initialize() {
    let log = log();
    let emitter = gated(&log);

    let _ = emitter.call("initialize", ());
    emitter.call("first", ()).await.unwrap();

    assert_eq!(entries(&log), vec!["init", "first"]);
    assert!(emitter.is_initialized());
}

#[tokio::test]
async fn test_initialize_can_only_be_called_once() {
    let log = log();
    let emitter = gated(&log);

    emitter.call("initialize", ()).await.unwrap();
    let again = emitter.call("initialize", ());
    assert!(again.is_rejected());

    let err = again.await.unwrap_err();
    assert_eq!(err, CallError::AlreadyInitialized);
    assert!(err.to_string().contains("can only be called once"));

    emitter.call("first", ()).await.unwrap();
    assert_eq!(entries(&log), vec!["init", "first"]);
    assert!(emitter.is_initialized());
}

#[tokio::test]
async fn test_without_initialize_first_call_initializes_synchronously() {
    let log = log();
    let l = Arc::clone(&log);
    let emitter = Emitter::<(), ()>::builder()
        .sync("work", move |_| {
            l.lock().push("work".into());
            Ok(())
        })
        .build()
        .unwrap();

    assert!(!emitter.is_initialized());
    let pending = emitter.call("work", ());
    assert!(emitter.is_initialized());
    assert!(emitter.is_flushing());
    assert!(entries(&log).is_empty(), "work has not run yet");

    pending.await.unwrap();
    assert_eq!(entries(&log), vec!["work"]);
}

#[tokio::test]
async fn test_initialize_value_is_not_a_gate() {
    let emitter = Emitter::<u32, u32>::builder()
        .value("initialize", 1)
        .sync("double", |n| Ok(n * 2))
        .build()
        .unwrap();

    assert_eq!(emitter.call("double", 4).await, Ok(8));
    assert_eq!(emitter.value("initialize"), Some(&1));
    assert_eq!(
        emitter.call("initialize", 0).await,
        Err(CallError::NotCallable {
            name: "initialize".into()
        })
    );
}

#[tokio::test]
async fn test_disable_suppresses_success_notifications_only() {
    let seen = counter();
    let caught = counter();
    let (s, c) = (Arc::clone(&seen), Arc::clone(&caught));
    let emitter = Emitter::<u32, u32>::builder()
        .sync("ok", |n| Ok(n))
        .sync("bad", |_| Err(MemberError::fail("bad")))
        .build()
        .unwrap();
    let _sub = emitter.subscribe(
        Subscription::new()
            .all(move |_: &str, _: &u32, _: &u32| {
                s.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .catch(move |_: &str, _: &MemberError, _: &u32| {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
    );

    emitter.disable();
    assert!(!emitter.is_enabled());
    assert_eq!(emitter.call("ok", 1).await, Ok(1));
    assert!(emitter.call("bad", 1).await.is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert_eq!(caught.load(Ordering::SeqCst), 1, "failures are reported while disabled");

    emitter.enable();
    assert_eq!(emitter.call("ok", 2).await, Ok(2));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unsubscribe_while_idle_is_immediate() {
    let emitter = Emitter::<(), ()>::builder().sync("m", |_| Ok(())).build().unwrap();
    let sub = emitter.subscribe(Subscription::new());
    let id = sub.id();
    assert_eq!(emitter.subscriptions(), vec![id]);

    sub.unsubscribe();
    assert!(!emitter.is_subscribed(id));
    assert!(emitter.subscriptions().is_empty());
}

#[tokio::test]
async fn test_unsubscribe_while_flushing_waits_for_queued_work() {
    let seen = counter();
    let s = Arc::clone(&seen);
    let emitter = Emitter::<u64, u64>::builder()
        .future("slow", |ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(ms)
        })
        .build()
        .unwrap();
    let sub = emitter.subscribe(Subscription::new().on("slow", move |_: &u64, _: &u64| {
        s.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));
    let id = sub.id();

    let before = emitter.call("slow", 10);
    assert!(emitter.is_flushing());
    sub.unsubscribe();
    assert!(emitter.is_subscribed(id), "removal is deferred while flushing");
    let after = emitter.call("slow", 1);

    before.await.unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1, "call queued before removal is observed");

    after.await.unwrap();
    emitter.idle().await;
    assert!(!emitter.is_subscribed(id));
    assert!(!emitter.is_flushing());
    assert_eq!(seen.load(Ordering::SeqCst), 1, "call queued after removal is not observed");
}

#[tokio::test]
async fn test_failure_reaches_catch_but_not_success_hooks() {
    let on_member = counter();
    let on_all = counter();
    let failures: Arc<Mutex<Vec<(String, MemberError, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let (m, a, f) = (Arc::clone(&on_member), Arc::clone(&on_all), Arc::clone(&failures));

    let emitter = Emitter::<String, String>::builder()
        .sync("save", |path: String| Err(MemberError::fail(format!("cannot write {path}"))))
        .sync("echo", |s| Ok(s))
        .build()
        .unwrap();
    let _sub = emitter.subscribe(
        Subscription::new()
            .on("save", move |_: &String, _: &String| {
                m.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .all(move |member: &str, _: &String, _: &String| {
                if member == "save" {
                    a.fetch_add(1, Ordering::SeqCst);
                }
                Ok(())
            })
            .catch(move |member: &str, error: &MemberError, args: &String| {
                f.lock().push((member.to_string(), error.clone(), args.clone()));
                Ok(())
            }),
    );

    let err = emitter.call("save", "a.txt".to_string()).await.unwrap_err();
    assert_eq!(err, CallError::Member(MemberError::fail("cannot write a.txt")));
    assert_eq!(
        *failures.lock(),
        vec![(
            "save".to_string(),
            MemberError::fail("cannot write a.txt"),
            "a.txt".to_string()
        )]
    );
    assert_eq!(on_member.load(Ordering::SeqCst), 0);
    assert_eq!(on_all.load(Ordering::SeqCst), 0);

    assert_eq!(emitter.call("echo", "hi".to_string()).await, Ok("hi".to_string()));
}

#[tokio::test]
async fn test_member_panic_becomes_error_and_queue_continues() {
    let emitter = Emitter::<u32, u32>::builder()
        .sync("explode", |_| -> Result<u32, MemberError> { panic!("kaboom") })
        .sync("inc", |n| Ok(n + 1))
        .build()
        .unwrap();

    let exploded = emitter.call("explode", 0);
    let next = emitter.call("inc", 1);

    assert_eq!(
        exploded.await,
        Err(CallError::Member(MemberError::Panicked {
            info: "kaboom".into()
        }))
    );
    assert_eq!(next.await, Ok(2));
}

struct Panicky;

#[async_trait]
impl Observe<u32, u32> for Panicky {
    async fn on_all(&self, _: &str, _: &u32, _: &u32) -> Result<(), ObserverError> {
        panic!("observer exploded");
    }

    fn name(&self) -> &'static str {
        "panicky"
    }
}

#[tokio::test]
async fn test_observer_failures_are_isolated() {
    let seen = counter();
    let s = Arc::clone(&seen);
    let emitter = Emitter::<u32, u32>::builder().sync("id", |n| Ok(n)).build().unwrap();

    let _failing = emitter.subscribe(
        Subscription::new()
            .named("failing")
            .on("id", |_: &u32, _: &u32| Err(ObserverError::new("member hook")))
            .all(|_: &str, _: &u32, _: &u32| Err(ObserverError::new("all hook"))),
    );
    let _panicky = emitter.subscribe(Panicky);
    let _counting = emitter.subscribe(Subscription::new().all(move |_: &str, _: &u32, _: &u32| {
        s.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    assert_eq!(emitter.call("id", 7).await, Ok(7));
    assert_eq!(emitter.call("id", 8).await, Ok(8));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

struct SlowRecorder {
    log: Log,
}

#[async_trait]
impl Observe<(), ()> for SlowRecorder {
    async fn on_member(&self, member: &str, _: &(), _: &()) -> Result<(), ObserverError> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.log.lock().push(format!("observed:{member}"));
        Ok(())
    }
}

#[tokio::test]
async fn test_async_observers_finish_before_the_call_resolves() {
    let log = log();
    let l = Arc::clone(&log);
    let emitter = Emitter::<(), ()>::builder()
        .sync("a", move |_| {
            l.lock().push("ran:a".into());
            Ok(())
        })
        .build()
        .unwrap();
    let _sub = emitter.subscribe(SlowRecorder {
        log: Arc::clone(&log),
    });

    emitter.call("a", ()).await.unwrap();
    log.lock().push("resolved".into());

    assert_eq!(entries(&log), vec!["ran:a", "observed:a", "resolved"]);
}

#[tokio::test]
async fn test_observers_receive_result_and_args() {
    let seen: Arc<Mutex<Vec<(u32, u32)>>> = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let emitter = Emitter::<u32, u32>::builder().sync("square", |n| Ok(n * n)).build().unwrap();
    let _sub = emitter.subscribe(Subscription::new().on("square", move |result: &u32, args: &u32| {
        s.lock().push((*args, *result));
        Ok(())
    }));

    emitter.call("square", 3).await.unwrap();
    emitter.call("square", 4).await.unwrap();
    assert_eq!(*seen.lock(), vec![(3, 9), (4, 16)]);
}

#[tokio::test]
async fn test_unknown_member_is_rejected() {
    let emitter = Emitter::<(), ()>::builder().build().unwrap();
    let pending = emitter.call("missing", ());
    assert!(pending.is_rejected());
    assert_eq!(
        pending.await,
        Err(CallError::UnknownMember {
            name: "missing".into()
        })
    );
    assert!(!emitter.is_initialized(), "rejected lookups do not open the gate");
}

#[tokio::test]
async fn test_queued_calls_close_when_emitter_dropped() {
    let log = log();
    let emitter = gated(&log);
    let pending = emitter.call("first", ());
    drop(emitter);

    assert_eq!(pending.await, Err(CallError::Closed));
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_unsubscribe_after_drop_is_noop() {
    let emitter = Emitter::<(), ()>::builder().build().unwrap();
    let sub = emitter.subscribe(Subscription::new());
    drop(emitter);
    sub.unsubscribe();
}

#[tokio::test]
async fn test_idle_returns_when_not_flushing() {
    let emitter = Emitter::<(), ()>::builder().sync("m", |_| Ok(())).build().unwrap();
    emitter.idle().await;

    let _ = emitter.call("m", ());
    let _ = emitter.call("m", ());
    emitter.idle().await;
    assert!(!emitter.is_flushing());
    assert_eq!(emitter.queued(), 0);
}

#[tokio::test]
async fn test_clones_share_one_queue() {
    let log = log();
    let l = Arc::clone(&log);
    let emitter = Emitter::<u32, u32>::builder()
        .future("push", move |n| {
            let l = Arc::clone(&l);
            async move {
                tokio::time::sleep(Duration::from_millis(u64::from(3 - n))).await;
                l.lock().push(n.to_string());
                Ok(n)
            }
        })
        .build()
        .unwrap();
    let other = emitter.clone();

    let a = emitter.call("push", 0);
    let b = other.call("push", 1);
    let c = emitter.call("push", 2);
    let _ = futures::join!(c, b, a);

    assert_eq!(entries(&log), vec!["0", "1", "2"]);
}
