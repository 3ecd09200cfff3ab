//! # warmpool
//!
//! Bounded, thread-safe resource pool with validation-on-borrow, idle
//! eviction, and graceful shutdown.
//!
//! The pool manages expensive-to-create resources (backend connections,
//! session handles) on behalf of many concurrent callers. Resources are
//! opaque to the pool; their whole lifecycle is driven through the
//! [`ResourceHandler`] capability trait. Idle resources are reused in LIFO
//! order, so borrows land on "warm" handles while the cold end of the idle
//! queue ages out.
//!
//! ## Features
//!
//! - Single-lock bookkeeping with a condition-variable acquisition gate
//! - Blocking borrows with a configurable wait budget
//! - Validation on borrow, with transparent recovery of stale idle resources
//! - Capacity eviction (idle ceiling) and age eviction (idle floor)
//! - Automatic return of resources via RAII (Drop trait)
//! - Graceful, idempotent shutdown that wakes blocked borrowers
//! - Async borrows
//! - Metrics with Prometheus export
//!
//! ## Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//! use warmpool::{Pool, PoolConfiguration, ResourceHandler};
//!
//! struct Greeter;
//!
//! impl ResourceHandler for Greeter {
//!     type Resource = String;
//!     type Error = Infallible;
//!
//!     fn make_object(&self) -> Result<String, Infallible> {
//!         Ok("hello".to_string())
//!     }
//! }
//!
//! let pool = Pool::new(Greeter, PoolConfiguration::default()).unwrap();
//! {
//!     let greeting = pool.borrow().unwrap();
//!     println!("Got: {}", *greeting);
//!     // returned to the pool when `greeting` goes out of scope
//! }
//! pool.shutdown();
//! ```

mod pool;
mod config;
mod handler;
mod metrics;
mod eviction;
mod errors;

pub use pool::{Pool, PoolStatistics, PooledResource};
pub use config::PoolConfiguration;
pub use handler::ResourceHandler;
pub use metrics::{MetricsExporter, PoolMetrics};
pub use errors::{ConfigError, PoolError, PoolResult};
