//! Prometheus metrics for header sealing and verification.
//!
//! [`EngineMetrics`] owns its own [`Registry`] so the embedding process can
//! merge or expose it however it serves metrics.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry, Histogram,
    HistogramOpts, IntCounter, Opts, Registry,
};

pub struct EngineMetrics {
    pub registry: Registry,

    /// Headers that passed every check.
    pub headers_verified: IntCounter,
    /// Headers rejected by any check.
    pub headers_rejected: IntCounter,
    pub leader_seals: IntCounter,
    /// Aggregate validator seals written into headers.
    pub quorum_certificates: IntCounter,

    /// Time spent verifying one header, in milliseconds.
    pub verify_time_ms: Histogram,
}

impl EngineMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let headers_verified = register_int_counter_with_registry!(
            Opts::new(
                "hotstuff_headers_verified_total",
                "Total headers that passed verification"
            ),
            registry
        )
        .expect("failed to register headers_verified counter");

        let headers_rejected = register_int_counter_with_registry!(
            Opts::new(
                "hotstuff_headers_rejected_total",
                "Total headers rejected by verification"
            ),
            registry
        )
        .expect("failed to register headers_rejected counter");

        let leader_seals = register_int_counter_with_registry!(
            Opts::new(
                "hotstuff_leader_seals_total",
                "Total leader seals produced by this node"
            ),
            registry
        )
        .expect("failed to register leader_seals counter");

        let quorum_certificates = register_int_counter_with_registry!(
            Opts::new(
                "hotstuff_quorum_certificates_total",
                "Total aggregate validator seals assembled by this node"
            ),
            registry
        )
        .expect("failed to register quorum_certificates counter");

        let verify_time_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "hotstuff_header_verify_time_ms",
                "Header verification time in milliseconds"
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
            registry
        )
        .expect("failed to register verify_time_ms histogram");

        Self {
            registry,
            headers_verified,
            headers_rejected,
            leader_seals,
            quorum_certificates,
            verify_time_ms,
        }
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_metrics_registered() {
        let metrics = EngineMetrics::new();
        metrics.headers_verified.inc();
        metrics.verify_time_ms.observe(1.5);
        let names: Vec<String> = metrics
            .registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"hotstuff_headers_verified_total".to_string()));
        assert!(names.contains(&"hotstuff_header_verify_time_ms".to_string()));
    }
}
