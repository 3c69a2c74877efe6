//! Edge diagnostics for the strip's traced boundary.
//!
//! The boundary is stitched together from two sampled rims, so the numbers
//! worth checking are the joints: the gap bridged at the seam where the second
//! rim is attached and the gap left between the end of the path and its start.
//!
//! # Example
//!
//! ```ignore
//! use mobius_engine::geom::{EdgeStitching, MobiusParams, MobiusStrip};
//!
//! let strip = MobiusStrip::new(MobiusParams::default())?;
//! let diag = strip.edge_diagnostics(EdgeStitching::Continuous);
//! if !diag.is_closed_loop() {
//!     eprintln!("edge does not close: {}", diag.summary());
//! }
//! ```

use std::fmt;

use serde::Serialize;

use super::core::Tolerance;
use super::edge::{EdgeStitching, EdgeTrace};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDiagnostics {
    pub stitching: EdgeStitching,

    /// Points per rim (the strip resolution).
    pub rim_point_count: usize,

    /// Segments in the traced path (`2 * rim_point_count - 1`).
    pub segment_count: usize,

    /// Unrounded polyline length.
    pub length: f64,

    /// Distance between the last top-rim point and the first point of the second rim.
    pub seam_gap: f64,

    /// Distance between the last and the first point of the path.
    pub closure_gap: f64,

    /// Segments shorter than [`Tolerance::ZERO_LENGTH`], typically the seam joint.
    pub degenerate_segment_count: usize,

    pub shortest_segment: Option<(usize, f64)>,
    pub longest_segment: Option<(usize, f64)>,

    /// Human readable findings, empty for a clean trace.
    pub warnings: Vec<String>,
}

impl EdgeDiagnostics {
    /// Collects diagnostics for a traced edge. `width` is the strip width the
    /// gaps are compared against.
    #[must_use]
    pub fn from_trace(trace: &EdgeTrace, width: f64) -> Self {
        let segments = trace.segments();
        let seam_gap = trace.seam_gap();
        let closure_gap = trace.closure_gap();
        let degenerate_segment_count = segments
            .lengths
            .iter()
            .filter(|len| Tolerance::ZERO_LENGTH.is_zero_length(**len))
            .count();

        let mut warnings = Vec::new();
        let tol = Tolerance::DEFAULT.eps.max(Tolerance::DEFAULT.relative_to(width));
        if seam_gap > tol {
            warnings.push(format!(
                "seam jumps {seam_gap:.6} between rims (strip width {width:.6})"
            ));
        }
        if closure_gap > tol {
            warnings.push(format!("path does not close: end is {closure_gap:.6} from start"));
        }

        Self {
            stitching: trace.stitching(),
            rim_point_count: trace.top_rim().len(),
            segment_count: segments.segment_count(),
            length: segments.total_length,
            seam_gap,
            closure_gap,
            degenerate_segment_count,
            shortest_segment: segments.shortest,
            longest_segment: segments.longest,
            warnings,
        }
    }

    #[must_use]
    pub fn is_closed_loop(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "stitching={} segments={} length={:.6} seam_gap={:.6} closure_gap={:.6} warnings={}",
            self.stitching.name(),
            self.segment_count,
            self.length,
            self.seam_gap,
            self.closure_gap,
            self.warnings.len()
        )
    }
}

impl fmt::Display for EdgeDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for warning in &self.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        Ok(())
    }
}
