//! Routing metrics and observability.
//!
//! Counters are owned by the application state rather than a global, so each
//! server (and each test) gets its own set.

use crate::routing::RouteDecision;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Requests served without locale processing (API, assets, files)
    excluded: AtomicUsize,

    /// Requests served in their resolved locale
    passthroughs: AtomicUsize,

    /// Locale redirects issued
    redirects: AtomicUsize,

    /// Studio subdomain rewrites
    rewrites: AtomicUsize,

    /// Requests rejected by the rate limiter
    rate_limited: AtomicUsize,

    /// Content reloads that failed
    content_failures: AtomicUsize,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a routing decision.
    pub fn record_decision(&self, decision: &RouteDecision) {
        let counter = match decision {
            RouteDecision::PassThrough { locale: None } => &self.excluded,
            RouteDecision::PassThrough { locale: Some(_) } => &self.passthroughs,
            RouteDecision::Redirect { .. } => &self.redirects,
            RouteDecision::Rewrite { .. } => &self.rewrites,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_content_failure(&self) {
        self.content_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn rewrites(&self) -> usize {
        self.rewrites.load(Ordering::Relaxed)
    }

    pub fn rate_limited(&self) -> usize {
        self.rate_limited.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let excluded = self.excluded.load(Ordering::Relaxed);
        let passthroughs = self.passthroughs.load(Ordering::Relaxed);
        let redirects = self.redirects();
        let rewrites = self.rewrites();
        let routed = passthroughs + redirects;

        let redirect_rate = if routed > 0 {
            (redirects as f64 / routed as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            excluded,
            passthroughs,
            redirects,
            rewrites,
            redirect_rate,
            rate_limited: self.rate_limited(),
            content_failures: self.content_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the routing counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub excluded: usize,
    pub passthroughs: usize,
    pub redirects: usize,
    pub rewrites: usize,

    /// Share of locale-processed requests that were redirected (0-100)
    pub redirect_rate: f64,

    pub rate_limited: usize,
    pub content_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_decisions() {
        let metrics = RoutingMetrics::new();
        metrics.record_decision(&RouteDecision::PassThrough { locale: None });
        metrics.record_decision(&RouteDecision::PassThrough {
            locale: Some(Locale::ENGLISH),
        });
        metrics.record_decision(&RouteDecision::Redirect {
            location: "/en".into(),
        });
        metrics.record_decision(&RouteDecision::Rewrite {
            path: "/studio".into(),
        });

        let report = metrics.report();
        assert_eq!(report.excluded, 1);
        assert_eq!(report.passthroughs, 1);
        assert_eq!(report.redirects, 1);
        assert_eq!(report.rewrites, 1);
    }

    #[test]
    fn test_record_rate_limited() {
        let metrics = RoutingMetrics::new();
        metrics.record_rate_limited();
        metrics.record_rate_limited();
        assert_eq!(metrics.rate_limited(), 2);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = RoutingMetrics::new().report();
        assert_eq!(report.redirects, 0);
        assert_eq!(report.redirect_rate, 0.0);
        assert_eq!(report.content_failures, 0);
    }

    #[test]
    fn test_report_redirect_rate() {
        let metrics = RoutingMetrics::new();
        // 1 redirect, 3 pass-throughs = 25%
        metrics.record_decision(&RouteDecision::Redirect {
            location: "/".into(),
        });
        for _ in 0..3 {
            metrics.record_decision(&RouteDecision::PassThrough {
                locale: Some(Locale::DUTCH),
            });
        }
        assert_eq!(metrics.report().redirect_rate, 25.0);
    }

    #[test]
    fn test_excluded_not_counted_in_redirect_rate() {
        let metrics = RoutingMetrics::new();
        metrics.record_decision(&RouteDecision::PassThrough { locale: None });
        metrics.record_decision(&RouteDecision::Redirect {
            location: "/".into(),
        });
        assert_eq!(metrics.report().redirect_rate, 100.0);
    }

    #[test]
    fn test_instances_are_independent() {
        let a = RoutingMetrics::new();
        let b = RoutingMetrics::new();
        a.record_rate_limited();
        assert_eq!(b.rate_limited(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(RoutingMetrics::new().report()).unwrap();
        assert!(json.get("redirect_rate").is_some());
    }
}
