// warmpool - bounded, thread-safe resource pool
//
// This is just a binary wrapper - the actual library is in lib.rs
// Run the demos with: cargo run --example basic

use std::convert::Infallible;

use warmpool::{Pool, PoolConfiguration, ResourceHandler};

struct DemoHandler;

impl ResourceHandler for DemoHandler {
    type Resource = u32;
    type Error = Infallible;

    fn make_object(&self) -> Result<u32, Infallible> {
        Ok(42)
    }
}

fn main() {
    println!("=== warmpool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let pool = Pool::new(DemoHandler, PoolConfiguration::default()).unwrap();

    {
        let handle = pool.borrow().unwrap();
        println!("  Borrowed resource: {}", *handle);
    }

    println!("  Idle after return: {}", pool.get_statistics().num_idle);
    pool.shutdown();
}
