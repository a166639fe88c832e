//! Integration tests for concurrent first access.
//!
//! Many threads hit an empty holder at once; exactly one of them must run the
//! initializer and all of them must walk away with the same instance.

use lazy_singleton::{BoxError, Singleton};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const CALLERS: usize = 100;

#[derive(Debug)]
struct Connection {
    host: String,
    port: u16,
}

#[test]
fn test_hundred_callers_share_one_instance() {
    let builds = AtomicUsize::new(0);
    let holder = Singleton::new(|| {
        builds.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        Ok(vec![1u8, 2, 3])
    });

    let instances: Vec<Arc<Vec<u8>>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| s.spawn(|| holder.get_instance().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(instances.len(), CALLERS);
    let first = &instances[0];
    assert!(instances.iter().all(|i| Arc::ptr_eq(first, i)));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_barrier_released_callers_construct_once() {
    let builds = AtomicUsize::new(0);
    let barrier = Barrier::new(CALLERS);
    let holder = Singleton::new(|| {
        builds.fetch_add(1, Ordering::SeqCst);
        Ok(String::from("contended"))
    });

    let instances: Vec<Arc<String>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    holder.get_instance().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &instances[0];
    assert!(instances.iter().all(|i| Arc::ptr_eq(first, i)));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_no_caller_sees_half_built_instance() {
    let holder = Singleton::new(|| {
        let mut conn = Connection {
            host: String::new(),
            port: 0,
        };
        conn.host = "db.internal".to_string();
        // widen the window between the two writes
        thread::sleep(Duration::from_millis(20));
        conn.port = 5432;
        Ok(conn)
    });

    thread::scope(|s| {
        for _ in 0..32 {
            s.spawn(|| {
                let conn = holder.get_instance().unwrap();
                assert_eq!(conn.host, "db.internal");
                assert_eq!(conn.port, 5432);
            });
        }
        // readers that only peek must see all or nothing
        for _ in 0..32 {
            s.spawn(|| {
                if let Some(conn) = holder.get() {
                    assert_eq!(conn.host, "db.internal");
                    assert_eq!(conn.port, 5432);
                }
            });
        }
    });
}

static STATIC_BUILDS: AtomicUsize = AtomicUsize::new(0);

fn build_static() -> Result<Connection, BoxError> {
    STATIC_BUILDS.fetch_add(1, Ordering::SeqCst);
    Ok(Connection {
        host: "cache.internal".to_string(),
        port: 6379,
    })
}

static STATIC_CONNECTION: Singleton<Connection> = Singleton::new(build_static);

#[test]
fn test_static_holder_across_spawned_threads() {
    let handles: Vec<_> = (0..CALLERS)
        .map(|_| thread::spawn(|| STATIC_CONNECTION.get_instance().unwrap()))
        .collect();

    let instances: Vec<Arc<Connection>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let first = &instances[0];
    assert!(instances.iter().all(|i| Arc::ptr_eq(first, i)));
    assert_eq!(first.port, 6379);
    assert_eq!(STATIC_BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_initialized_holder_serves_reads_in_parallel() {
    let holder: Singleton<u64> = Singleton::new(|| Ok(17));
    let expected = holder.get_instance().unwrap();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..1_000 {
                    assert!(Arc::ptr_eq(&expected, &holder.get_instance().unwrap()));
                }
            });
        }
    });
}
