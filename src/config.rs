//! Pool configuration options

use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::errors::ConfigError;

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use warmpool::PoolConfiguration;
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new()
///     .with_max_objects(20)
///     .with_max_idle(5)
///     .with_max_wait(Duration::from_secs(30));
///
/// assert_eq!(config.max_objects, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfiguration {
    /// Ceiling on the total number of resources (active + idle)
    pub max_objects: usize,

    /// Ceiling on the number of idle resources kept for reuse
    pub max_idle: usize,

    /// Floor that age-based eviction never goes below
    pub min_idle: usize,

    /// How long a borrow may block when the pool is at capacity.
    /// Zero means fail immediately without waiting.
    pub max_wait: Duration,

    /// Minimum time a resource must sit idle before it is eligible for
    /// age-based eviction. Zero disables age-based eviction.
    pub min_evictable_idle_time: Duration,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            max_objects: 10,
            max_idle: 10,
            min_idle: 1,
            max_wait: Duration::from_millis(150_000),
            min_evictable_idle_time: Duration::from_millis(120_000),
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ceiling on total resources
    ///
    /// # Examples
    ///
    /// ```
    /// use warmpool::PoolConfiguration;
    ///
    /// let config = PoolConfiguration::new().with_max_objects(50);
    ///
    /// assert_eq!(config.max_objects, 50);
    /// ```
    pub fn with_max_objects(mut self, count: usize) -> Self {
        self.max_objects = count;
        self
    }

    /// Set the ceiling on idle resources
    pub fn with_max_idle(mut self, count: usize) -> Self {
        self.max_idle = count;
        self
    }

    /// Set the idle floor respected by age-based eviction
    pub fn with_min_idle(mut self, count: usize) -> Self {
        self.min_idle = count;
        self
    }

    /// Set the maximum time a borrow may block
    pub fn with_max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = wait;
        self
    }

    /// Set the minimum idle age for age-based eviction
    pub fn with_min_evictable_idle_time(mut self, age: Duration) -> Self {
        self.min_evictable_idle_time = age;
        self
    }

    /// Check the configuration invariants, reporting the first violation.
    ///
    /// The idle-floor ordering is checked before the idle-ceiling ordering,
    /// so when both are wrong the error names the min-idle violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_idle > self.max_idle {
            return Err(ConfigError::MinIdleGreaterThanMaxIdle);
        }
        if self.max_idle > self.max_objects {
            return Err(ConfigError::MaxIdleGreaterThanMaxObjects);
        }
        Ok(())
    }
}

// Hashes the wrapping sum of the fields, so equal configurations hash equal.
impl Hash for PoolConfiguration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = (self.max_objects as u128)
            .wrapping_add(self.max_idle as u128)
            .wrapping_add(self.min_idle as u128)
            .wrapping_add(self.max_wait.as_millis())
            .wrapping_add(self.min_evictable_idle_time.as_millis());
        sum.hash(state);
    }
}
