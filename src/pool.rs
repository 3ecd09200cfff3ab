//! The pool facade: borrow/return coordination, blocking, and shutdown

use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
use crate::eviction::{self, IdleEntry};
use crate::handler::ResourceHandler;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};

use log::{debug, warn};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

/// A borrowed resource that automatically returns to the pool when dropped
pub struct PooledResource<H: ResourceHandler> {
    resource: Option<H::Resource>,
    pool: Arc<PoolInner<H>>,
}

impl<H: ResourceHandler> PooledResource<H> {
    fn new(resource: H::Resource, pool: Arc<PoolInner<H>>) -> Self {
        Self {
            resource: Some(resource),
            pool,
        }
    }

    /// Dispose of the resource instead of returning it to the pool.
    ///
    /// For borrowers that already know the resource has gone bad and do not
    /// want the next borrow to trip over it.
    pub fn discard(mut self) {
        if let Some(resource) = self.resource.take() {
            self.pool.discard_active(resource);
        }
    }
}

impl<H: ResourceHandler> Deref for PooledResource<H> {
    type Target = H::Resource;

    fn deref(&self) -> &Self::Target {
        self.resource.as_ref().expect("resource already taken")
    }
}

impl<H: ResourceHandler> DerefMut for PooledResource<H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resource.as_mut().expect("resource already taken")
    }
}

impl<H: ResourceHandler> Drop for PooledResource<H> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            self.pool.return_resource(resource);
        }
    }
}

/// Point-in-time occupancy snapshot, taken atomically under the pool lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolStatistics {
    /// Resources currently borrowed
    pub num_active: usize,

    /// Resources currently idle
    pub num_idle: usize,
}

/// The one coherent unit of mutable bookkeeping, guarded by a single mutex.
///
/// Invariants between operations: `active + idle.len() <= max_objects`,
/// `idle.len() <= max_idle`, and once `shutdown` is set the idle queue is
/// empty and stays empty. A slot reserved for an in-flight creation counts
/// as active, so the capacity bound also covers resources under
/// construction.
struct PoolState<R> {
    idle: VecDeque<IdleEntry<R>>,
    active: usize,
    shutdown: bool,
}

struct PoolInner<H: ResourceHandler> {
    handler: H,
    config: PoolConfiguration,
    state: Mutex<PoolState<H::Resource>>,
    gate: Condvar,
    metrics: MetricsTracker,
}

/// Bounded, thread-safe pool of handler-managed resources.
///
/// Idle resources are reused most-recent-first, so borrows land on "warm"
/// handles while the cold end of the idle queue ages out. Cloning the pool
/// is cheap and shares the same underlying state.
pub struct Pool<H: ResourceHandler> {
    inner: Arc<PoolInner<H>>,
}

impl<H: ResourceHandler> Clone for Pool<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: ResourceHandler> Pool<H> {
    /// Create a pool serving resources from `handler`.
    ///
    /// The configuration is validated here, and the handler gets a chance
    /// to clamp or reject it, before the pool serves its first borrow.
    pub fn new(handler: H, config: PoolConfiguration) -> PoolResult<Self, H::Error> {
        config.validate()?;
        let config = handler.validate(config).map_err(PoolError::Handler)?;
        // the handler may have rewritten the limits
        config.validate()?;

        Ok(Self {
            inner: Arc::new(PoolInner {
                handler,
                config,
                state: Mutex::new(PoolState {
                    idle: VecDeque::new(),
                    active: 0,
                    shutdown: false,
                }),
                gate: Condvar::new(),
                metrics: MetricsTracker::new(),
            }),
        })
    }

    /// Borrow a resource, blocking up to `max_wait` when the pool is at
    /// capacity with nothing idle.
    pub fn borrow(&self) -> PoolResult<PooledResource<H>, H::Error> {
        let resource = self.inner.borrow(self.inner.config.max_wait)?;
        Ok(PooledResource::new(resource, Arc::clone(&self.inner)))
    }

    /// Borrow without blocking; `None` when nothing can be had right now
    pub fn try_borrow(&self) -> Option<PooledResource<H>> {
        let resource = self.inner.borrow(Duration::ZERO).ok()?;
        Some(PooledResource::new(resource, Arc::clone(&self.inner)))
    }

    /// Point-in-time occupancy snapshot
    pub fn get_statistics(&self) -> PoolStatistics {
        let state = self.inner.state.lock();
        PoolStatistics {
            num_active: state.active,
            num_idle: state.idle.len(),
        }
    }

    /// Cumulative counters plus current occupancy
    pub fn get_metrics(&self) -> PoolMetrics {
        let (num_active, num_idle) = {
            let state = self.inner.state.lock();
            (state.active, state.idle.len())
        };
        self.inner
            .metrics
            .snapshot(num_active, num_idle, self.inner.config.max_objects)
    }

    /// Export metrics as a string map
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.get_metrics().export()
    }

    /// Export metrics in Prometheus exposition format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.get_metrics(), pool_name, tags)
    }

    /// Shut the pool down. Idempotent.
    ///
    /// Disposes every idle resource, invokes the handler's shutdown hook
    /// exactly once, and wakes all blocked borrowers so they fail with
    /// [`PoolError::Closed`]. Resources currently borrowed are not
    /// reclaimed; returning one after shutdown disposes it immediately.
    pub fn shutdown(&self) {
        let drained: Vec<H::Resource> = {
            let mut state = self.inner.state.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
            state.idle.drain(..).map(|entry| entry.resource).collect()
        };

        for resource in drained {
            self.inner.dispose(resource);
        }
        self.inner.handler.shutdown();
        // waiters wake, observe the shutdown flag, and fail closed
        self.inner.gate.notify_all();
    }

    /// True once [`shutdown`](Pool::shutdown) has run
    pub fn is_shutdown(&self) -> bool {
        self.inner.state.lock().shutdown
    }
}

impl<H> Pool<H>
where
    H: ResourceHandler + 'static,
    H::Resource: 'static,
{
    /// Borrow on a blocking worker thread, for use from async contexts.
    ///
    /// The wait budget is still `max_wait`, enforced by the blocking
    /// borrow itself.
    pub async fn borrow_async(&self) -> PoolResult<PooledResource<H>, H::Error> {
        let pool = self.clone();
        tokio::task::spawn_blocking(move || pool.borrow())
            .await
            .map_err(|_| PoolError::Cancelled)?
    }

    /// Async counterpart of [`try_borrow`](Pool::try_borrow)
    pub async fn try_borrow_async(&self) -> Option<PooledResource<H>> {
        self.borrow_async().await.ok()
    }
}

impl<H: ResourceHandler> PoolInner<H> {
    /// The acquisition loop.
    ///
    /// Runs under the pool lock, releasing it around every handler call
    /// with the slot reserved in the bookkeeping so the capacity bound
    /// holds while the handler works.
    fn borrow(&self, max_wait: Duration) -> Result<H::Resource, PoolError<H::Error>> {
        let deadline = Instant::now() + max_wait;
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return Err(PoolError::Closed);
            }

            // age out stale idle entries before considering reuse
            let victims = eviction::sweep_expired(
                &mut state.idle,
                self.config.min_idle,
                self.config.min_evictable_idle_time,
                Instant::now(),
            );
            if !victims.is_empty() {
                debug!("evicting {} idle resource(s) past the age threshold", victims.len());
                MutexGuard::unlocked(&mut state, || {
                    for victim in victims {
                        self.dispose(victim);
                    }
                });
                // the lock was released; shutdown may have raced in
                continue;
            }

            // reuse the warmest idle resource
            if let Some(entry) = state.idle.pop_back() {
                state.active += 1;
                let resource = entry.resource;
                let tested = MutexGuard::unlocked(&mut state, || {
                    match self.handler.test_object(&resource) {
                        Ok(()) => Ok(resource),
                        Err(err) => {
                            self.dispose(resource);
                            Err(err)
                        }
                    }
                });
                match tested {
                    Ok(resource) => {
                        self.metrics.total_borrowed.fetch_add(1, Ordering::Relaxed);
                        return Ok(resource);
                    }
                    Err(_) => {
                        // stale handle: recover transparently without giving
                        // up this borrower's place in line
                        state.active -= 1;
                        self.metrics.validation_failures.fetch_add(1, Ordering::Relaxed);
                        continue;
                    }
                }
            }

            // room to grow: create a fresh resource
            if state.active + state.idle.len() < self.config.max_objects {
                state.active += 1;
                let created = MutexGuard::unlocked(&mut state, || {
                    let resource = self.handler.make_object().map_err(PoolError::Handler)?;
                    self.metrics.total_created.fetch_add(1, Ordering::Relaxed);
                    if let Err(err) = self.handler.test_object(&resource) {
                        // a fresh resource that fails validation is never
                        // retried; that way a handler unable to produce
                        // valid resources cannot induce a creation loop
                        self.dispose(resource);
                        return Err(PoolError::Handler(err));
                    }
                    Ok(resource)
                });
                match created {
                    Ok(resource) => {
                        self.metrics.total_borrowed.fetch_add(1, Ordering::Relaxed);
                        return Ok(resource);
                    }
                    Err(err) => {
                        state.active -= 1;
                        drop(state);
                        // the reserved slot is free again; a waiter can take it
                        self.gate.notify_one();
                        return Err(err);
                    }
                }
            }

            // at capacity with nothing idle: wait at the gate
            if max_wait.is_zero() {
                self.metrics.borrow_timeouts.fetch_add(1, Ordering::Relaxed);
                return Err(PoolError::Exhausted(max_wait));
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || self.gate.wait_for(&mut state, remaining).timed_out() {
                self.metrics.borrow_timeouts.fetch_add(1, Ordering::Relaxed);
                return Err(PoolError::Exhausted(max_wait));
            }
            // woken by a return or a freed slot; another waiter may have won
            // the race, so everything is re-evaluated from the top
        }
    }

    fn return_resource(&self, resource: H::Resource) {
        let mut state = self.state.lock();
        state.active = state.active.saturating_sub(1);
        self.metrics.total_returned.fetch_add(1, Ordering::Relaxed);

        if state.shutdown {
            drop(state);
            self.dispose(resource);
            return;
        }

        if self.config.max_idle == 0 {
            // idle retention is disabled outright; the freed slot still
            // lets a waiter create
            drop(state);
            self.dispose(resource);
            self.gate.notify_one();
            return;
        }

        let victim = eviction::capacity_victim(&mut state.idle, self.config.max_idle);
        state.idle.push_back(IdleEntry::new(resource));
        drop(state);

        if let Some(victim) = victim {
            debug!("evicting the oldest idle resource to stay within the idle ceiling");
            self.dispose(victim);
        }
        self.gate.notify_one();
    }

    fn discard_active(&self, resource: H::Resource) {
        {
            let mut state = self.state.lock();
            state.active = state.active.saturating_sub(1);
        }
        self.dispose(resource);
        self.gate.notify_one();
    }

    fn dispose(&self, resource: H::Resource) {
        self.metrics.total_destroyed.fetch_add(1, Ordering::Relaxed);
        if let Err(err) = self.handler.dispose_object(resource) {
            warn!("failed to dispose pooled resource: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use std::collections::HashSet;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::thread;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("backend rejected the handle")]
    struct BackendError;

    /// Hands out sequential ids and records every lifecycle event.
    #[derive(Default)]
    struct TestHandler {
        next_id: AtomicUsize,
        disposed: Mutex<Vec<usize>>,
        broken: Mutex<HashSet<usize>>,
        fail_make: AtomicBool,
        reject_fresh: AtomicBool,
        shutdown_calls: AtomicUsize,
    }

    impl TestHandler {
        fn mark_broken(&self, id: usize) {
            self.broken.lock().insert(id);
        }

        fn disposed(&self) -> Vec<usize> {
            self.disposed.lock().clone()
        }

        fn created(&self) -> usize {
            self.next_id.load(Ordering::Relaxed)
        }
    }

    impl ResourceHandler for Arc<TestHandler> {
        type Resource = usize;
        type Error = BackendError;

        fn make_object(&self) -> Result<usize, BackendError> {
            if self.fail_make.load(Ordering::Relaxed) {
                return Err(BackendError);
            }
            Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
        }

        fn test_object(&self, resource: &usize) -> Result<(), BackendError> {
            if self.reject_fresh.load(Ordering::Relaxed) || self.broken.lock().contains(resource) {
                Err(BackendError)
            } else {
                Ok(())
            }
        }

        fn dispose_object(&self, resource: usize) -> Result<(), BackendError> {
            self.disposed.lock().push(resource);
            Ok(())
        }

        fn shutdown(&self) {
            self.shutdown_calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn test_config() -> PoolConfiguration {
        PoolConfiguration::new()
            .with_max_objects(10)
            .with_max_idle(10)
            .with_min_idle(0)
            .with_max_wait(Duration::from_secs(5))
            .with_min_evictable_idle_time(Duration::ZERO)
    }

    fn test_pool(config: PoolConfiguration) -> (Arc<TestHandler>, Pool<Arc<TestHandler>>) {
        let handler = Arc::new(TestHandler::default());
        let pool = Pool::new(Arc::clone(&handler), config).unwrap();
        (handler, pool)
    }

    #[test]
    fn test_borrow_and_return() {
        let (_, pool) = test_pool(test_config());

        {
            let resource = pool.borrow().unwrap();
            assert_eq!(*resource, 0);
            let stats = pool.get_statistics();
            assert_eq!(stats.num_active, 1);
            assert_eq!(stats.num_idle, 0);
        }

        let stats = pool.get_statistics();
        assert_eq!(stats.num_active, 0);
        assert_eq!(stats.num_idle, 1);
    }

    #[test]
    fn test_lifo_reuse() {
        let (_, pool) = test_pool(test_config());

        let a = pool.borrow().unwrap();
        let b = pool.borrow().unwrap();
        let c = pool.borrow().unwrap();
        assert_eq!((*a, *b, *c), (0, 1, 2));

        drop(a);
        drop(b);
        drop(c);

        // most recently returned comes back first
        let next = pool.borrow().unwrap();
        assert_eq!(*next, 2);
    }

    #[test]
    fn test_capacity_eviction_disposes_oldest() {
        let config = test_config().with_max_idle(2);
        let (handler, pool) = test_pool(config);

        let a = pool.borrow().unwrap();
        let b = pool.borrow().unwrap();
        let c = pool.borrow().unwrap();
        drop(a);
        drop(b);
        drop(c);

        // returning the third evicted the first, which had idled longest
        assert_eq!(handler.disposed(), vec![0]);
        let stats = pool.get_statistics();
        assert_eq!(stats.num_idle, 2);
        assert_eq!(*pool.borrow().unwrap(), 2);
    }

    #[test]
    fn test_age_eviction_on_borrow() {
        let config = test_config()
            .with_min_idle(1)
            .with_min_evictable_idle_time(Duration::from_millis(50));
        let (handler, pool) = test_pool(config);

        let older = pool.borrow().unwrap();
        let newer = pool.borrow().unwrap();
        drop(older);
        thread::sleep(Duration::from_millis(10));
        drop(newer);

        thread::sleep(Duration::from_millis(80));

        // both entries are past the threshold, but the floor keeps one:
        // the oldest goes, the survivor is handed out
        let next = pool.borrow().unwrap();
        assert_eq!(*next, 1);
        assert_eq!(handler.disposed(), vec![0]);
    }

    #[test]
    fn test_bad_idle_resource_recovered() {
        let (handler, pool) = test_pool(test_config());

        drop(pool.borrow().unwrap());
        handler.mark_broken(0);

        // the stale handle is disposed and a fresh one takes its place
        let next = pool.borrow().unwrap();
        assert_eq!(*next, 1);
        assert_eq!(handler.disposed(), vec![0]);
        assert_eq!(handler.created(), 2);
        assert_eq!(pool.get_metrics().validation_failures, 1);
    }

    #[test]
    fn test_bad_creation_fails_fast() {
        let (handler, pool) = test_pool(test_config());
        handler.reject_fresh.store(true, Ordering::Relaxed);

        let result = pool.borrow();

        assert!(matches!(result, Err(PoolError::Handler(_))));
        // exactly one creation attempt, no retry loop
        assert_eq!(handler.created(), 1);
        assert_eq!(handler.disposed().len(), 1);
        assert_eq!(pool.get_statistics().num_active, 0);
    }

    #[test]
    fn test_make_object_failure_propagates() {
        let (handler, pool) = test_pool(test_config());
        handler.fail_make.store(true, Ordering::Relaxed);

        assert!(matches!(pool.borrow(), Err(PoolError::Handler(_))));
        assert_eq!(handler.created(), 0);
        assert_eq!(pool.get_statistics().num_active, 0);
    }

    #[test]
    fn test_borrow_blocks_until_return() {
        let config = test_config().with_max_objects(1).with_max_idle(1);
        let (_, pool) = test_pool(config);

        let guard = pool.borrow().unwrap();
        let waiter = {
            let pool = pool.clone();
            thread::spawn(move || pool.borrow().map(|resource| *resource))
        };

        thread::sleep(Duration::from_millis(50));
        drop(guard);

        assert_eq!(waiter.join().unwrap().unwrap(), 0);
    }

    #[test]
    fn test_borrow_timeout_when_saturated() {
        let config = test_config()
            .with_max_objects(1)
            .with_max_idle(1)
            .with_max_wait(Duration::from_millis(50));
        let (_, pool) = test_pool(config);

        let _held = pool.borrow().unwrap();
        let start = Instant::now();
        let result = pool.borrow();

        assert!(matches!(result, Err(PoolError::Exhausted(_))));
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(pool.get_metrics().borrow_timeouts, 1);
    }

    #[test]
    fn test_zero_max_wait_fails_immediately() {
        let config = test_config()
            .with_max_objects(1)
            .with_max_idle(1)
            .with_max_wait(Duration::ZERO);
        let (_, pool) = test_pool(config);

        let _held = pool.borrow().unwrap();

        assert!(matches!(pool.borrow(), Err(PoolError::Exhausted(_))));
    }

    #[test]
    fn test_try_borrow() {
        let config = test_config().with_max_objects(1).with_max_idle(1);
        let (_, pool) = test_pool(config);

        let first = pool.try_borrow();
        assert!(first.is_some());
        assert!(pool.try_borrow().is_none());

        drop(first);
        assert!(pool.try_borrow().is_some());
    }

    #[test]
    fn test_bounded_creation_under_contention() {
        let config = test_config()
            .with_max_objects(3)
            .with_max_idle(3)
            .with_max_wait(Duration::from_secs(10));
        let (handler, pool) = test_pool(config);

        // saturate once so all three slots exist up front
        let seed: Vec<_> = (0..3).map(|_| pool.borrow().unwrap()).collect();
        drop(seed);

        let barrier = Barrier::new(8);
        crossbeam::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|_| {
                    barrier.wait();
                    for _ in 0..20 {
                        let guard = pool.borrow().unwrap();
                        let stats = pool.get_statistics();
                        assert!(stats.num_active + stats.num_idle <= 3);
                        assert!(stats.num_idle <= 3);
                        thread::sleep(Duration::from_millis(1));
                        drop(guard);
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(handler.created(), 3);
        let stats = pool.get_statistics();
        assert_eq!(stats.num_active, 0);
        assert_eq!(stats.num_idle, 3);
    }

    #[test]
    fn test_shutdown() {
        let (handler, pool) = test_pool(test_config());

        drop(pool.borrow().unwrap());
        pool.shutdown();

        assert!(pool.is_shutdown());
        assert_eq!(handler.disposed(), vec![0]);
        assert_eq!(handler.shutdown_calls.load(Ordering::Relaxed), 1);
        let stats = pool.get_statistics();
        assert_eq!(stats.num_active, 0);
        assert_eq!(stats.num_idle, 0);
        assert!(matches!(pool.borrow(), Err(PoolError::Closed)));
    }

    #[test]
    fn test_shutdown_idempotent() {
        let (handler, pool) = test_pool(test_config());

        pool.shutdown();
        pool.shutdown();

        assert_eq!(handler.shutdown_calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_return_after_shutdown_disposes() {
        let (handler, pool) = test_pool(test_config());

        let guard = pool.borrow().unwrap();
        pool.shutdown();
        assert_eq!(pool.get_statistics().num_active, 1);

        drop(guard);

        assert!(handler.disposed().contains(&0));
        let stats = pool.get_statistics();
        assert_eq!(stats.num_active, 0);
        assert_eq!(stats.num_idle, 0);
    }

    #[test]
    fn test_shutdown_wakes_blocked_borrowers() {
        let config = test_config().with_max_objects(1).with_max_idle(1);
        let (_, pool) = test_pool(config);

        let _held = pool.borrow().unwrap();
        let waiter = {
            let pool = pool.clone();
            thread::spawn(move || pool.borrow().map(|_| ()))
        };

        thread::sleep(Duration::from_millis(50));
        pool.shutdown();

        assert!(matches!(waiter.join().unwrap(), Err(PoolError::Closed)));
    }

    #[test]
    fn test_discard_disposes_without_repooling() {
        let (handler, pool) = test_pool(test_config());

        let guard = pool.borrow().unwrap();
        guard.discard();

        assert_eq!(handler.disposed(), vec![0]);
        let stats = pool.get_statistics();
        assert_eq!(stats.num_active, 0);
        assert_eq!(stats.num_idle, 0);

        assert_eq!(*pool.borrow().unwrap(), 1);
    }

    #[test]
    fn test_max_idle_zero_never_parks() {
        let config = test_config().with_max_idle(0);
        let (handler, pool) = test_pool(config);

        drop(pool.borrow().unwrap());

        assert_eq!(handler.disposed(), vec![0]);
        assert_eq!(pool.get_statistics().num_idle, 0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = PoolConfiguration::new().with_max_idle(5).with_min_idle(6);
        let result = Pool::new(Arc::new(TestHandler::default()), config);

        assert!(matches!(
            result,
            Err(PoolError::Configuration(
                ConfigError::MinIdleGreaterThanMaxIdle
            ))
        ));
    }

    #[test]
    fn test_handler_validate_clamps() {
        struct ClampingHandler;

        impl ResourceHandler for ClampingHandler {
            type Resource = u8;
            type Error = BackendError;

            fn make_object(&self) -> Result<u8, BackendError> {
                Ok(1)
            }

            fn validate(&self, config: PoolConfiguration) -> Result<PoolConfiguration, BackendError> {
                Ok(config.with_max_objects(1).with_max_idle(1).with_min_idle(0))
            }
        }

        let config = PoolConfiguration::new().with_max_wait(Duration::ZERO);
        let pool = Pool::new(ClampingHandler, config).unwrap();

        let _held = pool.borrow().unwrap();
        // the handler clamped the pool down to a single resource
        assert!(matches!(pool.borrow(), Err(PoolError::Exhausted(_))));
    }

    #[test]
    fn test_handler_validate_rejects() {
        struct RejectingHandler;

        impl ResourceHandler for RejectingHandler {
            type Resource = u8;
            type Error = BackendError;

            fn make_object(&self) -> Result<u8, BackendError> {
                Ok(1)
            }

            fn validate(&self, _config: PoolConfiguration) -> Result<PoolConfiguration, BackendError> {
                Err(BackendError)
            }
        }

        let result = Pool::new(RejectingHandler, PoolConfiguration::default());
        assert!(matches!(result, Err(PoolError::Handler(_))));
    }

    #[test]
    fn test_metrics_counters() {
        let (_, pool) = test_pool(test_config());

        drop(pool.borrow().unwrap());

        let metrics = pool.get_metrics();
        assert_eq!(metrics.total_created, 1);
        assert_eq!(metrics.total_borrowed, 1);
        assert_eq!(metrics.total_returned, 1);
        assert_eq!(metrics.num_idle, 1);
        assert_eq!(metrics.num_active, 0);
    }

    #[tokio::test]
    async fn test_borrow_async() {
        let (_, pool) = test_pool(test_config());

        {
            let resource = pool.borrow_async().await.unwrap();
            assert_eq!(*resource, 0);
        }

        assert_eq!(pool.get_statistics().num_idle, 1);
    }

    #[tokio::test]
    async fn test_try_borrow_async_exhausted() {
        let config = test_config()
            .with_max_objects(1)
            .with_max_idle(1)
            .with_max_wait(Duration::from_millis(10));
        let (_, pool) = test_pool(config);

        let _held = pool.borrow().unwrap();
        assert!(pool.try_borrow_async().await.is_none());
    }
}
