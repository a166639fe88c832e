//! Configuration singleton example for lazy-singleton.
//!
//! Demonstrates:
//! - An application context that owns its holders
//! - Services depending on `InstanceProvider` instead of a global
//! - Concurrent first access resolving to one construction
//! - The retry and poison failure policies
//!
//! Run with: `cargo run --example config_singleton`

use lazy_singleton::{BoxError, FailurePolicy, InstanceProvider, Singleton};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

static LOADS: AtomicUsize = AtomicUsize::new(0);

/// Application configuration that is expensive to load.
#[derive(Debug, Clone)]
struct AppSettings {
    api_endpoint: String,
    timeout_ms: u64,
}

fn load_settings() -> Result<AppSettings, BoxError> {
    LOADS.fetch_add(1, Ordering::SeqCst);
    // Simulate reading and validating a config file
    thread::sleep(Duration::from_millis(50));
    Ok(AppSettings {
        api_endpoint: "https://api.example.com".to_string(),
        timeout_ms: 5000,
    })
}

struct AppContext {
    settings: Singleton<AppSettings>,
    license: Singleton<String>,
}

fn describe(settings: &impl InstanceProvider<AppSettings>) -> String {
    match settings.instance() {
        Ok(s) => format!("{} (timeout: {}ms)", s.api_endpoint, s.timeout_ms),
        Err(e) => format!("unavailable: {e}"),
    }
}

fn main() {
    println!("=== lazy-singleton: Configuration Singleton ===\n");

    // -------------------------------------------------------------------------
    // 1. Build the context; nothing is loaded yet
    // -------------------------------------------------------------------------
    println!("1. Creating application context...");

    let ctx = AppContext {
        settings: Singleton::new(load_settings),
        license: Singleton::with_policy(
            || Err("license server unreachable".into()),
            FailurePolicy::Poison,
        ),
    };
    println!("   {:?}", ctx.settings);

    // -------------------------------------------------------------------------
    // 2. Many threads ask for the settings at once
    // -------------------------------------------------------------------------
    println!("\n2. Spawning 8 workers that all need the settings...");

    let seen: Vec<Arc<AppSettings>> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let settings = &ctx.settings;
                s.spawn(move || {
                    let instance = settings.get_instance().unwrap();
                    println!("   [worker {i}] got {:p}", Arc::as_ptr(&instance));
                    instance
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let all_same = seen.iter().all(|i| Arc::ptr_eq(i, &seen[0]));
    println!("   All workers share one instance? {all_same}");
    println!("   Loads performed: {}", LOADS.load(Ordering::SeqCst));

    // -------------------------------------------------------------------------
    // 3. Services depend on the seam, tests can pass their own instance
    // -------------------------------------------------------------------------
    println!("\n3. Describing settings through InstanceProvider...");

    println!("   production: {}", describe(&ctx.settings));
    let fixture = Arc::new(AppSettings {
        api_endpoint: "http://localhost:8080".to_string(),
        timeout_ms: 10,
    });
    println!("   fixture:    {}", describe(&fixture));

    // -------------------------------------------------------------------------
    // 4. A poisoned holder keeps reporting the first failure
    // -------------------------------------------------------------------------
    println!("\n4. Requesting a license twice from a poisoning holder...");

    for attempt in 1..=2 {
        match ctx.license.get_instance() {
            Ok(key) => println!("   attempt {attempt}: {key}"),
            Err(e) => println!("   attempt {attempt}: {e}"),
        }
    }

    println!("\n=== Example Complete ===");
}
