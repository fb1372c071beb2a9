use bootstrap::{MetricTags, MetricsRegistry, MetricsReporter};
use errors::ReporterError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Operation name scripted behaviours are registered under.
pub const REPORT: &str = "Report";

pub type ReportFn =
    Arc<dyn Fn(&MetricsRegistry, &MetricTags) -> Result<(), ReporterError> + Send + Sync>;

/// What a scripted `report` call returns.
#[derive(Clone)]
pub enum ReportBehavior {
    /// Return a fixed result
    Return(Result<(), ReporterError>),

    /// Compute the result from the call arguments
    With(ReportFn)
}

/// A single recorded `report` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCall {
    pub registry: MetricsRegistry,
    pub metric_tags: MetricTags
}

/// Recording [`MetricsReporter`] whose results are scripted by the test.
///
/// Every call is recorded in order. Without a script, `report` returns
/// `Ok(())`. The double never validates its arguments; assertions are left to
/// the test through [`calls`](Self::calls) and the `assert_*` helpers.
#[derive(Default)]
pub struct MockMetricsReporter {
    calls: Mutex<Vec<ReportCall>>,
    behaviors: Mutex<HashMap<&'static str, ReportBehavior>>
}

impl MockMetricsReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `report` call return `result`.
    pub fn with_report_result(self, result: Result<(), ReporterError>) -> Self {
        self.on_report(ReportBehavior::Return(result));
        self
    }

    /// Makes every `report` call return `report_fn(registry, metric_tags)`.
    pub fn with_report_fn<F>(self, report_fn: F) -> Self
    where
        F: Fn(&MetricsRegistry, &MetricTags) -> Result<(), ReporterError> + Send + Sync + 'static
    {
        self.on_report(ReportBehavior::With(Arc::new(report_fn)));
        self
    }

    /// Replaces the scripted behaviour of `report`.
    pub fn on_report(&self, behavior: ReportBehavior) {
        self.behaviors.lock().insert(REPORT, behavior);
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> Vec<ReportCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forgets recorded calls; scripted behaviour is kept.
    pub fn reset_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn assert_called_times(&self, expected: usize) {
        let actual = self.call_count();
        assert!(
            actual == expected,
            "expected {} call(s) to {}, got {}",
            expected,
            REPORT,
            actual
        );
    }

    /// Asserts that at least one recorded call used exactly these arguments.
    pub fn assert_called_with(&self, registry: &MetricsRegistry, metric_tags: &MetricTags) {
        let calls = self.calls.lock();
        assert!(
            calls
                .iter()
                .any(|call| call.registry == *registry && call.metric_tags == *metric_tags),
            "no call to {} with tags {:?}, recorded calls: {:?}",
            REPORT,
            metric_tags,
            *calls
        );
    }
}

impl MetricsReporter for MockMetricsReporter {
    fn report(
        &self,
        registry: &MetricsRegistry,
        metric_tags: &MetricTags
    ) -> Result<(), ReporterError> {
        self.calls.lock().push(ReportCall {
            registry: registry.clone(),
            metric_tags: metric_tags.clone()
        });
        tracing::trace!(metrics = metric_tags.len(), "Recorded {} call", REPORT);

        // Released before running the closure so it may call back into the mock.
        let behavior = self.behaviors.lock().get(REPORT).cloned();
        match behavior {
            Some(ReportBehavior::Return(result)) => result,
            Some(ReportBehavior::With(report_fn)) => report_fn(registry, metric_tags),
            None => Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(metric: &str, key: &str, value: &str) -> MetricTags {
        HashMap::from([(
            metric.to_string(),
            HashMap::from([(key.to_string(), value.to_string())])
        )])
    }

    #[test]
    fn test_unscripted_report_returns_ok() {
        let reporter = MockMetricsReporter::new();
        let registry = MetricsRegistry::new();

        assert_eq!(reporter.report(&registry, &MetricTags::new()), Ok(()));
        reporter.assert_called_times(1);
    }

    #[test]
    fn test_calls_recorded_in_order() {
        let reporter = MockMetricsReporter::new();
        let registry = MetricsRegistry::new();
        let first = tags("EventsPersisted", "service", "app-a");
        let second = tags("ReadingsPersisted", "service", "app-b");

        reporter.report(&registry, &first).unwrap();
        reporter.report(&registry, &second).unwrap();

        let calls = reporter.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].metric_tags, first);
        assert_eq!(calls[1].metric_tags, second);
        assert!(calls[0].registry.same_registry(&registry));
    }

    #[test]
    fn test_scripted_error_returned_verbatim() {
        let err = ReporterError::TransportUnavailable {
            reason: "broker unreachable".to_string()
        };
        let reporter = MockMetricsReporter::new().with_report_result(Err(err.clone()));

        let result = reporter.report(&MetricsRegistry::new(), &MetricTags::new());
        assert_eq!(result, Err(err));
    }

    #[test]
    fn test_report_fn_receives_arguments() {
        let reporter = MockMetricsReporter::new().with_report_fn(|registry, metric_tags| {
            if metric_tags.is_empty() || registry.metric_names().is_empty() {
                return Err(ReporterError::Other {
                    message: "nothing to report".to_string()
                });
            }
            Ok(())
        });

        let registry = MetricsRegistry::new();
        assert!(reporter.report(&registry, &MetricTags::new()).is_err());

        registry.increment_counter("EventsPersisted", 1);
        let metric_tags = tags("EventsPersisted", "gateway", "store-1");
        assert!(reporter.report(&registry, &metric_tags).is_ok());
        reporter.assert_called_with(&registry, &metric_tags);
    }

    #[test]
    fn test_on_report_replaces_script() {
        let reporter = MockMetricsReporter::new().with_report_result(Err(ReporterError::Other {
            message: "first".to_string()
        }));
        reporter.on_report(ReportBehavior::Return(Ok(())));

        assert!(reporter.report(&MetricsRegistry::new(), &MetricTags::new()).is_ok());
    }

    #[test]
    fn test_report_fn_may_inspect_mock() {
        let reporter = Arc::new(MockMetricsReporter::new());
        let inner = Arc::downgrade(&reporter);
        reporter.on_report(ReportBehavior::With(Arc::new(
            move |_: &MetricsRegistry, _: &MetricTags| {
                let calls = inner.upgrade().map_or(0, |mock| mock.call_count());
                if calls > 1 {
                    Err(ReporterError::Other {
                        message: "second call".to_string()
                    })
                } else {
                    Ok(())
                }
            }
        )));

        let registry = MetricsRegistry::new();
        assert!(reporter.report(&registry, &MetricTags::new()).is_ok());
        assert!(reporter.report(&registry, &MetricTags::new()).is_err());
    }

    #[test]
    fn test_reset_calls_keeps_script() {
        let err = ReporterError::Other {
            message: "down".to_string()
        };
        let reporter = MockMetricsReporter::new().with_report_result(Err(err.clone()));
        let _ = reporter.report(&MetricsRegistry::new(), &MetricTags::new());

        reporter.reset_calls();
        reporter.assert_called_times(0);
        assert_eq!(
            reporter.report(&MetricsRegistry::new(), &MetricTags::new()),
            Err(err)
        );
    }

    #[test]
    #[should_panic(expected = "expected 2 call(s) to Report, got 0")]
    fn test_assert_called_times_panics_on_mismatch() {
        MockMetricsReporter::new().assert_called_times(2);
    }
}
