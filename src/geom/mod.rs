mod core;
mod curve;
mod diagnostics;
mod edge;
mod grid;
mod mesh;
mod metrics;
mod mobius;
mod rounding;
mod surface;

pub use self::core::{BBox, Point3, Tolerance, Vec3};
pub use curve::{SegmentLengthAnalysis, analyze_polyline_segments, polyline_length};
pub use diagnostics::EdgeDiagnostics;
pub use edge::{EdgeStitching, EdgeTrace, sample_rim};
pub use grid::{ParameterGrid, ScalarGrid, linspace};
pub use mesh::{GeomMesh, triangulate_grid};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use mobius::{
    DEFAULT_CENTRAL_RADIUS, DEFAULT_RESOLUTION, DEFAULT_WIDTH, MIN_RESOLUTION, MeasureOptions,
    Measurements, MobiusError, MobiusMesh, MobiusParams, MobiusResult, MobiusStrip,
};
pub use rounding::{DEFAULT_PRECISION, round_to_precision};
pub use surface::{MobiusSurface, Surface};

#[cfg(test)]
mod tests;
