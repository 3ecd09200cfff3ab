//! Metrics collection and export for resource pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cumulative counters plus a point-in-time occupancy snapshot
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use warmpool::{Pool, PoolConfiguration, ResourceHandler};
///
/// struct Numbers;
///
/// impl ResourceHandler for Numbers {
///     type Resource = u32;
///     type Error = Infallible;
///
///     fn make_object(&self) -> Result<u32, Infallible> {
///         Ok(7)
///     }
/// }
///
/// let pool = Pool::new(Numbers, PoolConfiguration::default()).unwrap();
///
/// {
///     let _obj = pool.borrow().unwrap();
///     let metrics = pool.get_metrics();
///     assert_eq!(metrics.total_borrowed, 1);
///     assert_eq!(metrics.num_active, 1);
/// }
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Total resources created by the handler
    pub total_created: usize,

    /// Total resources disposed (eviction, failed validation, shutdown)
    pub total_destroyed: usize,

    /// Total successful borrows
    pub total_borrowed: usize,

    /// Total resources returned to the pool
    pub total_returned: usize,

    /// Borrows that timed out waiting at capacity
    pub borrow_timeouts: usize,

    /// Idle resources that failed validation on borrow
    pub validation_failures: usize,

    /// Resources currently borrowed
    pub num_active: usize,

    /// Resources currently idle
    pub num_idle: usize,

    /// Ceiling on active + idle
    pub max_objects: usize,

    /// Pool utilization ratio (0.0 to 1.0)
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_created".to_string(), self.total_created.to_string());
        metrics.insert("total_destroyed".to_string(), self.total_destroyed.to_string());
        metrics.insert("total_borrowed".to_string(), self.total_borrowed.to_string());
        metrics.insert("total_returned".to_string(), self.total_returned.to_string());
        metrics.insert("borrow_timeouts".to_string(), self.borrow_timeouts.to_string());
        metrics.insert(
            "validation_failures".to_string(),
            self.validation_failures.to_string(),
        );
        metrics.insert("num_active".to_string(), self.num_active.to_string());
        metrics.insert("num_idle".to_string(), self.num_idle.to_string());
        metrics.insert("max_objects".to_string(), self.max_objects.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Metrics exporter for Prometheus format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use std::convert::Infallible;
    /// use warmpool::{MetricsExporter, Pool, PoolConfiguration, ResourceHandler};
    ///
    /// struct Numbers;
    ///
    /// impl ResourceHandler for Numbers {
    ///     type Resource = u32;
    ///     type Error = Infallible;
    ///
    ///     fn make_object(&self) -> Result<u32, Infallible> {
    ///         Ok(7)
    ///     }
    /// }
    ///
    /// let pool = Pool::new(Numbers, PoolConfiguration::default()).unwrap();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "directory".to_string());
    ///
    /// let output = MetricsExporter::export_prometheus(&pool.get_metrics(), "backends", Some(&tags));
    /// assert!(output.contains("warmpool_resources_active"));
    /// assert!(output.contains("service=\"directory\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        output.push_str("# HELP warmpool_resources_active Resources currently borrowed\n");
        output.push_str("# TYPE warmpool_resources_active gauge\n");
        output.push_str(&format!(
            "warmpool_resources_active{{{}}} {}\n",
            labels, metrics.num_active
        ));

        output.push_str("# HELP warmpool_resources_idle Resources currently idle\n");
        output.push_str("# TYPE warmpool_resources_idle gauge\n");
        output.push_str(&format!(
            "warmpool_resources_idle{{{}}} {}\n",
            labels, metrics.num_idle
        ));

        output.push_str("# HELP warmpool_utilization Pool utilization ratio\n");
        output.push_str("# TYPE warmpool_utilization gauge\n");
        output.push_str(&format!(
            "warmpool_utilization{{{}}} {:.2}\n",
            labels, metrics.utilization
        ));

        // Counter metrics
        output.push_str("# HELP warmpool_resources_created_total Resources created\n");
        output.push_str("# TYPE warmpool_resources_created_total counter\n");
        output.push_str(&format!(
            "warmpool_resources_created_total{{{}}} {}\n",
            labels, metrics.total_created
        ));

        output.push_str("# HELP warmpool_resources_destroyed_total Resources disposed\n");
        output.push_str("# TYPE warmpool_resources_destroyed_total counter\n");
        output.push_str(&format!(
            "warmpool_resources_destroyed_total{{{}}} {}\n",
            labels, metrics.total_destroyed
        ));

        output.push_str("# HELP warmpool_borrows_total Successful borrows\n");
        output.push_str("# TYPE warmpool_borrows_total counter\n");
        output.push_str(&format!(
            "warmpool_borrows_total{{{}}} {}\n",
            labels, metrics.total_borrowed
        ));

        output.push_str("# HELP warmpool_returns_total Resources returned\n");
        output.push_str("# TYPE warmpool_returns_total counter\n");
        output.push_str(&format!(
            "warmpool_returns_total{{{}}} {}\n",
            labels, metrics.total_returned
        ));

        output.push_str("# HELP warmpool_borrow_timeouts_total Borrows that timed out\n");
        output.push_str("# TYPE warmpool_borrow_timeouts_total counter\n");
        output.push_str(&format!(
            "warmpool_borrow_timeouts_total{{{}}} {}\n",
            labels, metrics.borrow_timeouts
        ));

        output.push_str("# HELP warmpool_validation_failures_total Idle resources that failed validation\n");
        output.push_str("# TYPE warmpool_validation_failures_total counter\n");
        output.push_str(&format!(
            "warmpool_validation_failures_total{{{}}} {}\n",
            labels, metrics.validation_failures
        ));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal counters, bumped with relaxed atomics on the pool's hot paths
pub(crate) struct MetricsTracker {
    pub total_created: AtomicUsize,
    pub total_destroyed: AtomicUsize,
    pub total_borrowed: AtomicUsize,
    pub total_returned: AtomicUsize,
    pub borrow_timeouts: AtomicUsize,
    pub validation_failures: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            total_created: AtomicUsize::new(0),
            total_destroyed: AtomicUsize::new(0),
            total_borrowed: AtomicUsize::new(0),
            total_returned: AtomicUsize::new(0),
            borrow_timeouts: AtomicUsize::new(0),
            validation_failures: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self, num_active: usize, num_idle: usize, max_objects: usize) -> PoolMetrics {
        let utilization = if max_objects > 0 {
            num_active as f64 / max_objects as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_created: self.total_created.load(Ordering::Relaxed),
            total_destroyed: self.total_destroyed.load(Ordering::Relaxed),
            total_borrowed: self.total_borrowed.load(Ordering::Relaxed),
            total_returned: self.total_returned.load(Ordering::Relaxed),
            borrow_timeouts: self.borrow_timeouts.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            num_active,
            num_idle,
            max_objects,
            utilization,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}
