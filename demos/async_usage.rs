//! Async usage examples for warmpool

use std::convert::Infallible;
use std::time::Duration;

use tokio::time::sleep;
use warmpool::{Pool, PoolConfiguration, ResourceHandler};

struct SessionHandler;

impl ResourceHandler for SessionHandler {
    type Resource = u64;
    type Error = Infallible;

    fn make_object(&self) -> Result<u64, Infallible> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Ok(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[tokio::main]
async fn main() {
    println!("=== warmpool - Async Examples ===\n");

    // Example 1: Async borrow
    async_borrow().await;

    // Example 2: Borrow timeout
    async_with_timeout().await;

    // Example 3: Concurrent tasks sharing a small pool
    concurrent_access().await;
}

async fn async_borrow() {
    println!("1. Async Borrow:");
    let pool = Pool::new(SessionHandler, PoolConfiguration::default()).unwrap();

    {
        let session = pool.borrow_async().await.unwrap();
        println!("   Borrowed session asynchronously: {}", *session);
    }

    pool.shutdown();
    println!();
}

async fn async_with_timeout() {
    println!("2. Borrow Timeout:");

    let config = PoolConfiguration::new()
        .with_max_objects(1)
        .with_max_idle(1)
        .with_max_wait(Duration::from_millis(100));

    let pool = Pool::new(SessionHandler, config).unwrap();

    // Take the only slot
    let _held = pool.borrow().unwrap();

    // A second borrow waits 100ms, then gives up
    match pool.borrow_async().await {
        Ok(_) => println!("   Got a session"),
        Err(e) => println!("   Error: {}", e),
    }

    println!();
}

async fn concurrent_access() {
    println!("3. Concurrent Access:");

    let config = PoolConfiguration::new()
        .with_max_objects(3)
        .with_max_idle(3)
        .with_max_wait(Duration::from_secs(1));

    let pool = Pool::new(SessionHandler, config).unwrap();

    let mut handles = vec![];

    for i in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            match pool.borrow_async().await {
                Ok(session) => {
                    println!("   Task {} got session {}", i, *session);
                    sleep(Duration::from_millis(50)).await;
                }
                Err(e) => println!("   Task {} failed: {}", i, e),
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let stats = pool.get_statistics();
    println!("   Final idle: {}", stats.num_idle);
    pool.shutdown();
}
