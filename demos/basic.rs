//! Basic usage examples for warmpool

use std::convert::Infallible;
use std::time::Duration;

use warmpool::{Pool, PoolConfiguration, ResourceHandler};

/// A stand-in for an expensive backend handle.
struct Connection {
    id: u64,
}

struct ConnectionHandler;

impl ResourceHandler for ConnectionHandler {
    type Resource = Connection;
    type Error = Infallible;

    fn make_object(&self) -> Result<Connection, Infallible> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        let id = NEXT.fetch_add(1, Ordering::Relaxed);
        println!("   Opening connection {id}...");
        Ok(Connection { id })
    }

    fn test_object(&self, conn: &Connection) -> Result<(), Infallible> {
        println!("   Validating connection {}", conn.id);
        Ok(())
    }

    fn dispose_object(&self, conn: Connection) -> Result<(), Infallible> {
        println!("   Closing connection {}", conn.id);
        Ok(())
    }
}

fn main() {
    println!("=== warmpool - Basic Examples ===\n");

    // Example 1: Simple borrow and return
    simple_pool();

    // Example 2: Pool with eviction configuration
    configured_pool();

    // Example 3: Try methods
    try_methods();

    // Example 4: Statistics and metrics
    statistics_and_metrics();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = Pool::new(ConnectionHandler, PoolConfiguration::default()).unwrap();

    {
        let conn = pool.borrow().unwrap();
        println!("   Borrowed connection: {}", conn.id);
        // Connection automatically returned when dropped
    }

    println!("   Idle after return: {}\n", pool.get_statistics().num_idle);
    pool.shutdown();
}

fn configured_pool() {
    println!("2. Configured Pool:");

    let config = PoolConfiguration::new()
        .with_max_objects(4)
        .with_max_idle(2)
        .with_min_idle(1)
        .with_max_wait(Duration::from_secs(5))
        .with_min_evictable_idle_time(Duration::from_secs(60));

    let pool = Pool::new(ConnectionHandler, config).unwrap();

    {
        let c1 = pool.borrow().unwrap();
        let c2 = pool.borrow().unwrap();
        let c3 = pool.borrow().unwrap();
        println!("   Active connections: {}", pool.get_statistics().num_active);
        drop(c1);
        drop(c2);
        drop(c3);
    }

    // Only two stay idle; the one that idled longest was closed
    println!("   Idle after returns: {}\n", pool.get_statistics().num_idle);
    pool.shutdown();
}

fn try_methods() {
    println!("3. Try Methods:");
    let config = PoolConfiguration::new().with_max_objects(1).with_max_idle(1);
    let pool = Pool::new(ConnectionHandler, config).unwrap();

    // Take the only slot
    let first = pool.try_borrow();
    assert!(first.is_some());
    println!("   First try: Success");

    // Try again while the slot is taken
    let second = pool.try_borrow();
    assert!(second.is_none());
    println!("   Second try: None (pool exhausted)");

    drop(first); // return the connection

    let third = pool.try_borrow();
    assert!(third.is_some());
    println!("   Third try: Success\n");

    drop(third);
    pool.shutdown();
}

fn statistics_and_metrics() {
    println!("4. Statistics and Metrics:");
    let pool = Pool::new(ConnectionHandler, PoolConfiguration::default()).unwrap();

    {
        let _c1 = pool.borrow().unwrap();
        let _c2 = pool.borrow().unwrap();

        let stats = pool.get_statistics();
        println!("   Active: {}, Idle: {}", stats.num_active, stats.num_idle);
        println!("   Utilization: {:.1}%", pool.get_metrics().utilization * 100.0);
    }

    println!("\n   Metrics:");
    for (key, value) in pool.export_metrics() {
        println!("     {}: {}", key, value);
    }

    println!("\n   Prometheus:");
    print!("{}", pool.export_metrics_prometheus("demo", None));

    pool.shutdown();
}
