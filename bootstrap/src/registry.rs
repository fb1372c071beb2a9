//! # Metrics Registry Handle
//!
//! A cheap, clonable handle to an in-memory metrics registry. Clones share the
//! same underlying storage, and two handles compare equal only when they point
//! at the same registry.

use metrics::Key;
use metrics_util::registry::{AtomicStorage, Registry};
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[derive(Clone)]
pub struct MetricsRegistry {
    inner: Arc<Registry<Key, AtomicStorage>>
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Registry::atomic())
        }
    }

    pub fn increment_counter(&self, name: &str, value: u64) {
        let key = Key::from_name(name.to_string());
        self.inner.get_or_create_counter(&key, |counter| {
            counter.fetch_add(value, Ordering::Relaxed);
        });
    }

    pub fn set_gauge(&self, name: &str, value: f64) {
        let key = Key::from_name(name.to_string());
        self.inner.get_or_create_gauge(&key, |gauge| {
            gauge.store(value.to_bits(), Ordering::Relaxed);
        });
    }

    pub fn counter_value(&self, name: &str) -> Option<u64> {
        let key = Key::from_name(name.to_string());
        self.inner
            .get_counter_handles()
            .get(&key)
            .map(|counter| counter.load(Ordering::Relaxed))
    }

    pub fn gauge_value(&self, name: &str) -> Option<f64> {
        let key = Key::from_name(name.to_string());
        self.inner
            .get_gauge_handles()
            .get(&key)
            .map(|gauge| f64::from_bits(gauge.load(Ordering::Relaxed)))
    }

    /// Names of every counter and gauge registered so far, sorted.
    pub fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .get_counter_handles()
            .into_keys()
            .chain(self.inner.get_gauge_handles().into_keys())
            .map(|key| key.name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Whether both handles share the same underlying registry.
    pub fn same_registry(&self, other: &MetricsRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for MetricsRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.same_registry(other)
    }
}

impl Eq for MetricsRegistry {}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("metrics", &self.metric_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates() {
        let registry = MetricsRegistry::new();
        registry.increment_counter("EventsPersisted", 2);
        registry.increment_counter("EventsPersisted", 3);
        assert_eq!(registry.counter_value("EventsPersisted"), Some(5));
        assert_eq!(registry.counter_value("Missing"), None);
    }

    #[test]
    fn test_gauge_overwrites() {
        let registry = MetricsRegistry::new();
        registry.set_gauge("QueueDepth", 4.0);
        registry.set_gauge("QueueDepth", 1.5);
        assert_eq!(registry.gauge_value("QueueDepth"), Some(1.5));
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = MetricsRegistry::new();
        let clone = registry.clone();
        clone.increment_counter("EventsSent", 1);

        assert_eq!(registry.counter_value("EventsSent"), Some(1));
        assert_eq!(registry, clone);
        assert_ne!(registry, MetricsRegistry::new());
    }

    #[test]
    fn test_metric_names_sorted() {
        let registry = MetricsRegistry::new();
        registry.set_gauge("b_gauge", 1.0);
        registry.increment_counter("a_counter", 1);
        assert_eq!(registry.metric_names(), vec!["a_counter", "b_gauge"]);
    }
}
