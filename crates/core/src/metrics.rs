//! Prometheus metrics for the routing engine.
//!
//! This module provides metrics for:
//! - Path search (candidate attempts, outcomes)
//! - Chain execution (hops executed, prefix-cache reuse)
//! - Path store (recall hits, misses, stale evictions)

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

/// Candidate chains handed to the executor.
pub static CANDIDATE_ATTEMPTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "convoy_candidate_attempts_total",
        "Total candidate chains attempted during search",
    )
    .unwrap()
});

/// Search outcomes by result.
pub static SEARCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("convoy_search_outcomes_total", "Total path searches"),
        &["result"], // "converted", "partial", "timeout", "no_route"
    )
    .unwrap()
});

/// Individual convert calls executed.
pub static HOPS_EXECUTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("convoy_hops_executed_total", "Total conversion hops executed").unwrap()
});

/// Hops skipped thanks to the executor prefix cache.
pub static PREFIX_HOPS_REUSED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "convoy_prefix_hops_reused_total",
        "Total hops resumed from the prefix cache instead of re-executed",
    )
    .unwrap()
});

/// Path store recall results.
pub static PATH_RECALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("convoy_path_recalls_total", "Total path store recalls"),
        &["result"], // "hit", "stale", "miss"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CANDIDATE_ATTEMPTS.clone()),
        Box::new(SEARCH_OUTCOMES.clone()),
        Box::new(HOPS_EXECUTED.clone()),
        Box::new(PREFIX_HOPS_REUSED.clone()),
        Box::new(PATH_RECALLS.clone()),
    ]
}
