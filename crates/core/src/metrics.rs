//! Prometheus metrics for the post-processing pipeline.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Post-process runs by processor and result.
pub static POST_PROCESS_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "pixcache_post_process_runs_total",
            "Total post-process runs",
        ),
        &["processor", "result"], // "ok", "skipped", "failed"
    )
    .unwrap()
});

/// Post-process run duration in seconds.
pub static POST_PROCESS_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "pixcache_post_process_duration_seconds",
            "Duration of post-process runs",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["processor"],
    )
    .unwrap()
});

/// Temporary files acquired.
pub static TEMP_FILES_ACQUIRED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "pixcache_temp_files_acquired_total",
        "Total temporary files acquired for post-processing",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(POST_PROCESS_RUNS.clone()),
        Box::new(POST_PROCESS_DURATION.clone()),
        Box::new(TEMP_FILES_ACQUIRED.clone()),
    ]
}
