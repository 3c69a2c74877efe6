//! Boundary tracing for the Möbius strip.
//!
//! The strip has a single boundary curve. In parameter space it shows up as
//! two rims, `v = +w/2` and `v = -w/2`, which only join up because the
//! half-twist maps `(2π, v)` onto `(0, -v)`. A traced edge is therefore the
//! top rim followed by a second rim of `n` points; how that second rim is
//! produced is selected by [`EdgeStitching`].

use serde::{Deserialize, Serialize};

use super::core::Point3;
use super::curve::{SegmentLengthAnalysis, analyze_polyline_segments, polyline_length};
use super::surface::{MobiusSurface, Surface};

/// How the second rim is appended to the top rim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStitching {
    /// Top rim with its `z` negated, traversed in reverse.
    ///
    /// Shares the top rim's radial offset, so it starts exactly where the top
    /// rim ends and finishes on the top rim's first point. The loop is the
    /// mirror image of the physical second lap and has the same length. This
    /// reproduces the reference measurements.
    #[default]
    MirroredRim,
    /// The `v = -w/2` rim of the parametrization, traversed in reverse.
    ///
    /// Jumps across the strip at the seam (`u = 2π`) and again on closing, so
    /// its length exceeds the edge by one strip width.
    ReversedRim,
    /// The `v = -w/2` rim traversed forward.
    ///
    /// Follows the physical edge through the half-twist: the second rim
    /// starts at the top rim's last point and ends at its first point.
    Continuous,
}

impl EdgeStitching {
    pub const ALL: &'static [Self] = &[Self::MirroredRim, Self::ReversedRim, Self::Continuous];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MirroredRim => "mirrored",
            Self::ReversedRim => "reversed",
            Self::Continuous => "continuous",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|stitching| stitching.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Samples the rim at lateral offset `v` for every angular sample in `u`.
#[must_use]
pub fn sample_rim(surface: &MobiusSurface, u: &[f64], v: f64) -> Vec<Point3> {
    u.iter().map(|&t| surface.point_at(t, v)).collect()
}

fn mirrored_rim(top: &[Point3]) -> Vec<Point3> {
    top.iter().map(|p| Point3::new(p.x, p.y, -p.z)).collect()
}

/// A traced boundary path: `rim_len` top-rim points followed by `rim_len`
/// points of the second rim.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTrace {
    stitching: EdgeStitching,
    rim_len: usize,
    points: Vec<Point3>,
}

impl EdgeTrace {
    /// Traces the boundary of `surface` over the angular samples `u`.
    #[must_use]
    pub fn trace(surface: &MobiusSurface, u: &[f64], stitching: EdgeStitching) -> Self {
        let half = surface.half_width();
        let top = sample_rim(surface, u, half);

        let second: Vec<Point3> = match stitching {
            EdgeStitching::MirroredRim => mirrored_rim(&top).into_iter().rev().collect(),
            EdgeStitching::ReversedRim => sample_rim(surface, u, -half).into_iter().rev().collect(),
            EdgeStitching::Continuous => sample_rim(surface, u, -half),
        };

        let rim_len = top.len();
        let mut points = top;
        points.extend(second);

        log::trace!(
            "traced {} edge with {} points per rim",
            stitching.name(),
            rim_len
        );

        Self {
            stitching,
            rim_len,
            points,
        }
    }

    #[must_use]
    pub const fn stitching(&self) -> EdgeStitching {
        self.stitching
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn top_rim(&self) -> &[Point3] {
        &self.points[..self.rim_len]
    }

    #[must_use]
    pub fn second_rim(&self) -> &[Point3] {
        &self.points[self.rim_len..]
    }

    /// Polyline arc length of the whole path.
    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }

    #[must_use]
    pub fn segments(&self) -> SegmentLengthAnalysis {
        analyze_polyline_segments(&self.points)
    }

    /// Distance bridged where the second rim is attached to the top rim.
    #[must_use]
    pub fn seam_gap(&self) -> f64 {
        match (self.top_rim().last(), self.second_rim().first()) {
            (Some(a), Some(b)) => a.distance_to(*b),
            _ => 0.0,
        }
    }

    /// Distance between the path's last and first points.
    #[must_use]
    pub fn closure_gap(&self) -> f64 {
        match (self.points.last(), self.points.first()) {
            (Some(a), Some(b)) => a.distance_to(*b),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::grid::linspace;
    use std::f64::consts::TAU;

    fn trace(stitching: EdgeStitching) -> EdgeTrace {
        let surface = MobiusSurface::new(1.0, 0.4);
        let u = linspace(0.0, TAU, 32);
        EdgeTrace::trace(&surface, &u, stitching)
    }

    #[test]
    fn every_stitching_produces_two_rims() {
        for &stitching in EdgeStitching::ALL {
            let edge = trace(stitching);
            assert_eq!(edge.points().len(), 64);
            assert_eq!(edge.top_rim().len(), 32);
            assert_eq!(edge.second_rim().len(), 32);
            assert_eq!(edge.stitching(), stitching);
        }
    }

    #[test]
    fn mirrored_and_continuous_paths_are_closed_without_seam_jump() {
        for stitching in [EdgeStitching::MirroredRim, EdgeStitching::Continuous] {
            let edge = trace(stitching);
            assert!(edge.seam_gap() < 1e-12, "{stitching:?} seam {}", edge.seam_gap());
            assert!(edge.closure_gap() < 1e-12, "{stitching:?} closure {}", edge.closure_gap());
        }
    }

    #[test]
    fn reversed_rim_jumps_across_the_strip_at_the_seam() {
        let edge = trace(EdgeStitching::ReversedRim);
        assert!((edge.seam_gap() - 0.4).abs() < 1e-12);
        assert!((edge.closure_gap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn stitching_names_round_trip() {
        for &stitching in EdgeStitching::ALL {
            assert_eq!(EdgeStitching::from_name(stitching.name()), Some(stitching));
        }
        assert_eq!(EdgeStitching::from_name(" Continuous "), Some(EdgeStitching::Continuous));
        assert_eq!(EdgeStitching::from_name("twisted"), None);
        assert_eq!(EdgeStitching::default(), EdgeStitching::MirroredRim);
    }
}
