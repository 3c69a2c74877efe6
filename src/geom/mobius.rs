//! The Möbius strip model: parameters, sampled mesh and the two measurements.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::core::{BBox, Point3};
use super::diagnostics::EdgeDiagnostics;
use super::edge::{EdgeStitching, EdgeTrace};
use super::grid::{ParameterGrid, ScalarGrid, linspace};
use super::mesh::GeomMesh;
use super::metrics::{GeomMetrics, TimingBucket};
use super::rounding::{DEFAULT_PRECISION, round_to_precision};
use super::surface::{MobiusSurface, Surface};
use crate::render::{DEFAULT_COLOR_SCHEME, SurfacePlot};

pub const DEFAULT_CENTRAL_RADIUS: f64 = 1.0;
pub const DEFAULT_WIDTH: f64 = 0.3;
pub const DEFAULT_RESOLUTION: usize = 200;
/// Fewer samples leave no spacing to integrate or trace over.
pub const MIN_RESOLUTION: usize = 2;

pub type MobiusResult<T> = Result<T, MobiusError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MobiusError {
    #[error("invalid parameter `{name}` = {value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        constraint: &'static str,
    },
}

impl MobiusError {
    fn invalid(name: &'static str, value: impl ToString, constraint: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            constraint,
        }
    }
}

/// Shape parameters of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobiusParams {
    /// Distance from the strip's centerline to the twist axis.
    pub central_radius: f64,
    /// Full width of the strip; samples span `[-width/2, width/2]`.
    pub width: f64,
    /// Samples along each parametric axis.
    pub resolution: usize,
}

impl Default for MobiusParams {
    fn default() -> Self {
        Self {
            central_radius: DEFAULT_CENTRAL_RADIUS,
            width: DEFAULT_WIDTH,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl MobiusParams {
    #[must_use]
    pub const fn new(central_radius: f64, width: f64, resolution: usize) -> Self {
        Self {
            central_radius,
            width,
            resolution,
        }
    }

    #[must_use]
    pub const fn with_central_radius(mut self, central_radius: f64) -> Self {
        self.central_radius = central_radius;
        self
    }

    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Checks the construction invariants.
    ///
    /// A zero width is accepted: the strip collapses onto its centerline.
    pub fn validate(&self) -> MobiusResult<()> {
        if !self.central_radius.is_finite() || self.central_radius <= 0.0 {
            return Err(MobiusError::invalid(
                "central_radius",
                self.central_radius,
                "must be finite and > 0",
            ));
        }
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(MobiusError::invalid(
                "width",
                self.width,
                "must be finite and >= 0",
            ));
        }
        if self.resolution < MIN_RESOLUTION {
            return Err(MobiusError::invalid(
                "resolution",
                self.resolution,
                "must be at least 2",
            ));
        }
        Ok(())
    }
}

/// The sampled strip: three `resolution x resolution` coordinate arrays.
///
/// Cell `(i, j)` holds the point for `(u[j], v[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct MobiusMesh {
    x: ScalarGrid,
    y: ScalarGrid,
    z: ScalarGrid,
}

impl MobiusMesh {
    /// Evaluates `surface` at every cell of `grid`.
    #[must_use]
    pub fn from_grid(surface: &MobiusSurface, grid: &ParameterGrid) -> Self {
        let (rows, cols) = grid.u_grid().shape();
        let points: Vec<Point3> = grid
            .cells()
            .map(|(_, _, u, v)| surface.point_at(u, v))
            .collect();

        Self {
            x: ScalarGrid::from_fn(rows, cols, |i, j| points[i * cols + j].x),
            y: ScalarGrid::from_fn(rows, cols, |i, j| points[i * cols + j].y),
            z: ScalarGrid::from_fn(rows, cols, |i, j| points[i * cols + j].z),
        }
    }

    #[must_use]
    pub const fn x(&self) -> &ScalarGrid {
        &self.x
    }

    #[must_use]
    pub const fn y(&self) -> &ScalarGrid {
        &self.y
    }

    #[must_use]
    pub const fn z(&self) -> &ScalarGrid {
        &self.z
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> Option<Point3> {
        Some(Point3::new(
            self.x.get(row, col)?,
            self.y.get(row, col)?,
            self.z.get(row, col)?,
        ))
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.x
            .as_slice()
            .iter()
            .zip(self.y.as_slice())
            .zip(self.z.as_slice())
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    #[must_use]
    pub fn is_all_finite(&self) -> bool {
        self.x.is_all_finite() && self.y.is_all_finite() && self.z.is_all_finite()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(self.points())
    }
}

/// Options for [`MobiusStrip::measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureOptions {
    /// Decimal digits kept in the reported values.
    pub precision: u32,
    pub stitching: EdgeStitching,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            stitching: EdgeStitching::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurements {
    pub surface_area: f64,
    pub edge_length: f64,
    pub precision: u32,
    pub stitching: EdgeStitching,
}

/// A Möbius strip sampled at a fixed resolution.
///
/// Everything is computed eagerly in [`MobiusStrip::new`]; the instance is
/// immutable afterwards. Changing a parameter means building a new strip.
#[derive(Debug, Clone, PartialEq)]
pub struct MobiusStrip {
    params: MobiusParams,
    surface: MobiusSurface,
    grid: ParameterGrid,
    mesh: MobiusMesh,
}

impl Default for MobiusStrip {
    fn default() -> Self {
        Self::build(MobiusParams::default(), &mut GeomMetrics::default())
    }
}

impl MobiusStrip {
    pub fn new(params: MobiusParams) -> MobiusResult<Self> {
        Self::new_with_metrics(params, &mut GeomMetrics::default())
    }

    /// Strip with the default parameters (R = 1, w = 0.3, n = 200).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn new_with_metrics(params: MobiusParams, metrics: &mut GeomMetrics) -> MobiusResult<Self> {
        params.validate()?;
        Ok(Self::build(params, metrics))
    }

    fn build(params: MobiusParams, metrics: &mut GeomMetrics) -> Self {
        let surface = MobiusSurface::new(params.central_radius, params.width);
        let grid = metrics.time(TimingBucket::Sampling, || {
            let half = surface.half_width();
            ParameterGrid::new(
                linspace(0.0, TAU, params.resolution),
                linspace(-half, half, params.resolution),
            )
        });
        let mesh = metrics.time(TimingBucket::MeshGeneration, || {
            MobiusMesh::from_grid(&surface, &grid)
        });

        log::debug!(
            "built mobius strip R={} w={} n={} ({}x{} mesh)",
            params.central_radius,
            params.width,
            params.resolution,
            mesh.shape().0,
            mesh.shape().1
        );

        Self {
            params,
            surface,
            grid,
            mesh,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &MobiusParams {
        &self.params
    }

    #[must_use]
    pub const fn central_radius(&self) -> f64 {
        self.params.central_radius
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.params.width
    }

    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.params.resolution
    }

    #[must_use]
    pub const fn surface(&self) -> &MobiusSurface {
        &self.surface
    }

    #[must_use]
    pub const fn parameter_grid(&self) -> &ParameterGrid {
        &self.grid
    }

    #[must_use]
    pub fn u(&self) -> &[f64] {
        self.grid.u()
    }

    #[must_use]
    pub fn v(&self) -> &[f64] {
        self.grid.v()
    }

    /// The mesh computed at construction.
    #[must_use]
    pub const fn mesh(&self) -> &MobiusMesh {
        &self.mesh
    }

    #[must_use]
    pub const fn x(&self) -> &ScalarGrid {
        self.mesh.x()
    }

    #[must_use]
    pub const fn y(&self) -> &ScalarGrid {
        self.mesh.y()
    }

    #[must_use]
    pub const fn z(&self) -> &ScalarGrid {
        self.mesh.z()
    }

    /// Re-evaluates the parametric mapping over the stored grid.
    #[must_use]
    pub fn generate_mesh(&self) -> MobiusMesh {
        MobiusMesh::from_grid(&self.surface, &self.grid)
    }

    /// `Σ |∂r/∂u × ∂r/∂v| · du · dv` over every grid cell, unrounded.
    ///
    /// Every one of the `n²` samples is weighted by a full cell, endpoints
    /// included, so the sum approaches the true area from above.
    #[must_use]
    pub fn raw_surface_area(&self) -> f64 {
        let du = self.grid.du();
        let dv = self.grid.dv();
        let sum: f64 = self
            .grid
            .cells()
            .map(|(_, _, u, v)| self.surface.area_element_at(u, v))
            .sum();
        sum * du * dv
    }

    /// Approximate surface area rounded to `precision` decimals.
    #[must_use]
    pub fn surface_area(&self, precision: u32) -> f64 {
        let area = self.raw_surface_area();
        log::debug!("surface area {area} (n={})", self.params.resolution);
        round_to_precision(area, precision)
    }

    #[must_use]
    pub fn surface_area_default(&self) -> f64 {
        self.surface_area(DEFAULT_PRECISION)
    }

    /// Traces the boundary with the given stitching.
    #[must_use]
    pub fn trace_edge(&self, stitching: EdgeStitching) -> EdgeTrace {
        EdgeTrace::trace(&self.surface, self.grid.u(), stitching)
    }

    /// Approximate edge length rounded to `precision` decimals, traced with
    /// the default [`EdgeStitching`].
    #[must_use]
    pub fn edge_length(&self, precision: u32) -> f64 {
        self.edge_length_with(EdgeStitching::default(), precision)
    }

    #[must_use]
    pub fn edge_length_default(&self) -> f64 {
        self.edge_length(DEFAULT_PRECISION)
    }

    #[must_use]
    pub fn edge_length_with(&self, stitching: EdgeStitching, precision: u32) -> f64 {
        let length = self.trace_edge(stitching).length();
        log::debug!(
            "edge length {length} ({} stitching, n={})",
            stitching.name(),
            self.params.resolution
        );
        round_to_precision(length, precision)
    }

    #[must_use]
    pub fn edge_diagnostics(&self, stitching: EdgeStitching) -> EdgeDiagnostics {
        let diagnostics = EdgeDiagnostics::from_trace(&self.trace_edge(stitching), self.params.width);
        for warning in &diagnostics.warnings {
            log::debug!("edge diagnostics: {warning}");
        }
        diagnostics
    }

    /// Both measurements in one pass, timed into `metrics`.
    #[must_use]
    pub fn measure(&self, options: MeasureOptions, metrics: &mut GeomMetrics) -> Measurements {
        let surface_area = metrics.time(TimingBucket::SurfaceArea, || {
            self.surface_area(options.precision)
        });
        let edge_length = metrics.time(TimingBucket::EdgeLength, || {
            self.edge_length_with(options.stitching, options.precision)
        });
        Measurements {
            surface_area,
            edge_length,
            precision: options.precision,
            stitching: options.stitching,
        }
    }

    /// Render payload for an external surface renderer.
    ///
    /// `color_scheme` is passed through untouched; `None` selects
    /// [`DEFAULT_COLOR_SCHEME`].
    #[must_use]
    pub fn plot(&self, color_scheme: Option<&str>) -> SurfacePlot<'_> {
        SurfacePlot::new(
            self.mesh.x(),
            self.mesh.y(),
            self.mesh.z(),
            color_scheme.unwrap_or(DEFAULT_COLOR_SCHEME),
        )
    }

    /// Triangulated copy of the mesh, two triangles per grid cell.
    #[must_use]
    pub fn to_geom_mesh(&self) -> GeomMesh {
        GeomMesh::from_mobius_mesh(&self.mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let params = MobiusParams::default();
        assert_eq!(params.central_radius, 1.0);
        assert_eq!(params.width, 0.3);
        assert_eq!(params.resolution, 200);
        assert!(params.validate().is_ok());

        let strip = MobiusStrip::default();
        assert_eq!(strip.mesh().shape(), (200, 200));
    }

    #[test]
    fn builder_overrides_fields() {
        let params = MobiusParams::default()
            .with_central_radius(2.0)
            .with_width(0.4)
            .with_resolution(150);
        assert_eq!(params, MobiusParams::new(2.0, 0.4, 150));
    }

    #[test]
    fn validation_names_the_offending_parameter() {
        let err = MobiusParams::new(1.0, 0.3, 1).validate().unwrap_err();
        assert!(matches!(
            err,
            MobiusError::InvalidParameter { name: "resolution", .. }
        ));
        assert!(err.to_string().contains("at least 2"));

        let err = MobiusParams::new(0.0, 0.3, 10).validate().unwrap_err();
        assert!(err.to_string().contains("central_radius"));

        let err = MobiusParams::new(1.0, f64::NAN, 10).validate().unwrap_err();
        assert!(err.to_string().contains("width"));

        let err = MobiusParams::new(f64::INFINITY, 0.3, 10).validate().unwrap_err();
        assert!(err.to_string().contains("central_radius"));

        assert!(MobiusParams::new(1.0, -0.1, 10).validate().is_err());
        assert!(MobiusParams::new(1.0, 0.0, 10).validate().is_ok());
    }

    #[test]
    fn params_deserialize_with_defaults_for_missing_fields() {
        let params: MobiusParams = serde::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                [("width", 0.4_f64)].into_iter(),
            ),
        )
        .unwrap();
        assert_eq!(params, MobiusParams::default().with_width(0.4));
    }

    #[test]
    fn generate_mesh_reproduces_stored_mesh() {
        let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.4, 12)).unwrap();
        assert_eq!(&strip.generate_mesh(), strip.mesh());
    }

    #[test]
    fn measure_matches_individual_calls() {
        let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.4, 40)).unwrap();
        let mut metrics = GeomMetrics::default();
        let options = MeasureOptions {
            precision: 8,
            stitching: EdgeStitching::Continuous,
        };
        let m = strip.measure(options, &mut metrics);
        assert_eq!(m.surface_area, strip.surface_area(8));
        assert_eq!(m.edge_length, strip.edge_length_with(EdgeStitching::Continuous, 8));
        assert_eq!(m.precision, 8);
    }

    #[test]
    fn mesh_bounds_span_the_strip() {
        let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.4, 81)).unwrap();
        let bounds = strip.mesh().bounds().unwrap();
        assert!(bounds.max.x <= 1.2 + 1e-12);
        assert!(bounds.min.x >= -1.2 - 1e-12);
        assert!(bounds.max.z <= 0.2 + 1e-12);
        assert!(bounds.min.z >= -0.2 - 1e-12);
        assert!((bounds.max.x - 1.2).abs() < 1e-12);
    }
}
