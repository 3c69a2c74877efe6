//! Opt-in timing hooks for the strip computations.
//!
//! Timing is only collected when the `mobius_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable there). In every
//! other build the calls compile down to running the closure.
//!
//! ```ignore
//! use mobius_engine::geom::{GeomMetrics, TimingBucket};
//!
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let area = metrics.time(TimingBucket::SurfaceArea, || strip.surface_area(14));
//! if let Some(report) = metrics.end() {
//!     println!("area took {} ns", report.surface_area_ns);
//! }
//! ```

/// Categories for timing the phases of a strip evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Building the `u`/`v` samples and the paired parameter grid.
    Sampling,
    /// Evaluating the parametric mapping over the grid.
    MeshGeneration,
    /// Surface area integration.
    SurfaceArea,
    /// Edge tracing and arc-length summation.
    EdgeLength,
    /// Edge diagnostics.
    Diagnostics,
}

/// Cumulative timings in nanoseconds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub sampling_ns: u64,
    pub mesh_generation_ns: u64,
    pub surface_area_ns: u64,
    pub edge_length_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.sampling_ns
            .saturating_add(self.mesh_generation_ns)
            .saturating_add(self.surface_area_ns)
            .saturating_add(self.edge_length_ns)
            .saturating_add(self.diagnostics_ns)
    }

    /// Total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    #[cfg_attr(
        not(all(feature = "mobius_metrics", not(target_arch = "wasm32"))),
        allow(dead_code)
    )]
    fn bucket_mut(&mut self, bucket: TimingBucket) -> &mut u64 {
        match bucket {
            TimingBucket::Sampling => &mut self.sampling_ns,
            TimingBucket::MeshGeneration => &mut self.mesh_generation_ns,
            TimingBucket::SurfaceArea => &mut self.surface_area_ns,
            TimingBucket::EdgeLength => &mut self.edge_length_ns,
            TimingBucket::Diagnostics => &mut self.diagnostics_ns,
        }
    }
}

/// Accumulator for timing strip operations.
///
/// When metrics are disabled all methods are no-ops and [`end`](Self::end)
/// returns `None`.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "mobius_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "mobius_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// The accumulated report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "mobius_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "mobius_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Runs `f` and adds its elapsed time to `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "mobius_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            let slot = self.report.bucket_mut(bucket);
            *slot = slot.saturating_add(nanos);
            result
        }

        #[cfg(not(all(feature = "mobius_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let report = GeomTimingReport {
            mesh_generation_ns: 1000,
            surface_area_ns: 2000,
            edge_length_ns: 3000,
            ..GeomTimingReport::default()
        };
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_mut_targets_matching_field() {
        let mut report = GeomTimingReport::default();
        *report.bucket_mut(TimingBucket::Diagnostics) += 7;
        *report.bucket_mut(TimingBucket::Sampling) += 5;
        assert_eq!(report.diagnostics_ns, 7);
        assert_eq!(report.sampling_ns, 5);
        assert_eq!(report.total_ns(), 12);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::SurfaceArea, || 42);
        assert_eq!(result, 42);
        let _ = metrics.end();
    }
}
