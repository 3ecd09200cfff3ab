//! Idle-entry bookkeeping and eviction policy

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// An unborrowed resource tagged with the time of its return.
///
/// Fresh entries go to the back of the idle queue and reuse pops from the
/// back, so the front always holds the entry that has been idle longest.
/// Both eviction policies work from the front.
#[derive(Debug)]
pub(crate) struct IdleEntry<R> {
    pub resource: R,
    pub returned_at: Instant,
}

impl<R> IdleEntry<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            returned_at: Instant::now(),
        }
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.returned_at)
    }
}

/// Remove every entry that has sat idle for at least `threshold`, oldest
/// first, keeping at least `min_idle` entries. A zero threshold disables
/// age eviction entirely.
///
/// Victims are handed back to the caller so disposal can happen without
/// holding the pool lock.
pub(crate) fn sweep_expired<R>(
    idle: &mut VecDeque<IdleEntry<R>>,
    min_idle: usize,
    threshold: Duration,
    now: Instant,
) -> Vec<R> {
    let mut victims = Vec::new();
    if threshold.is_zero() {
        return victims;
    }
    while idle.len() > min_idle
        && idle
            .front()
            .is_some_and(|oldest| oldest.idle_for(now) >= threshold)
    {
        if let Some(entry) = idle.pop_front() {
            victims.push(entry.resource);
        }
    }
    victims
}

/// The oldest idle entry, removed to make room when the idle ceiling is hit.
pub(crate) fn capacity_victim<R>(
    idle: &mut VecDeque<IdleEntry<R>>,
    max_idle: usize,
) -> Option<R> {
    if idle.len() >= max_idle {
        idle.pop_front().map(|entry| entry.resource)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Observation points sit in the future so entry timestamps never reach
    // back past the monotonic clock's origin.
    fn observed() -> Instant {
        Instant::now() + Duration::from_secs(7200)
    }

    fn entry(resource: u32, idle_for: Duration, now: Instant) -> IdleEntry<u32> {
        IdleEntry {
            resource,
            returned_at: now - idle_for,
        }
    }

    #[test]
    fn test_sweep_evicts_oldest_first() {
        let now = observed();
        let mut idle = VecDeque::from([
            entry(1, Duration::from_secs(30), now),
            entry(2, Duration::from_secs(20), now),
            entry(3, Duration::from_secs(1), now),
        ]);

        let victims = sweep_expired(&mut idle, 0, Duration::from_secs(10), now);

        assert_eq!(victims, vec![1, 2]);
        assert_eq!(idle.len(), 1);
        assert_eq!(idle.front().map(|e| e.resource), Some(3));
    }

    #[test]
    fn test_sweep_respects_min_idle_floor() {
        let now = observed();
        let mut idle = VecDeque::from([
            entry(1, Duration::from_secs(30), now),
            entry(2, Duration::from_secs(30), now),
            entry(3, Duration::from_secs(30), now),
        ]);

        let victims = sweep_expired(&mut idle, 2, Duration::from_secs(10), now);

        assert_eq!(victims, vec![1]);
        assert_eq!(idle.len(), 2);
    }

    #[test]
    fn test_sweep_disabled_by_zero_threshold() {
        let now = observed();
        let mut idle = VecDeque::from([entry(1, Duration::from_secs(3600), now)]);

        let victims = sweep_expired(&mut idle, 0, Duration::ZERO, now);

        assert!(victims.is_empty());
        assert_eq!(idle.len(), 1);
    }

    #[test]
    fn test_sweep_stops_at_first_young_entry() {
        // a young entry at the front shields newer entries behind it
        let now = observed();
        let mut idle = VecDeque::from([
            entry(1, Duration::from_secs(1), now),
            entry(2, Duration::from_secs(30), now),
        ]);

        let victims = sweep_expired(&mut idle, 0, Duration::from_secs(10), now);

        assert!(victims.is_empty());
        assert_eq!(idle.len(), 2);
    }

    #[test]
    fn test_capacity_victim_pops_oldest() {
        let now = observed();
        let mut idle = VecDeque::from([
            entry(1, Duration::from_secs(3), now),
            entry(2, Duration::from_secs(2), now),
        ]);

        assert_eq!(capacity_victim(&mut idle, 2), Some(1));
        assert_eq!(capacity_victim(&mut idle, 2), None);
        assert_eq!(idle.len(), 1);
    }

    #[test]
    fn test_idle_for_saturates() {
        let earlier = Instant::now();
        let entry = IdleEntry::new(0u32);

        // asking about a moment before the return reads as zero idle time
        assert_eq!(entry.idle_for(earlier), Duration::ZERO);
    }
}
