//! Render hand-off for the sampled strip.
//!
//! Drawing happens outside this crate. [`SurfacePlot`] bundles the three
//! coordinate grids with the presentation settings a surface plot needs, and
//! [`SurfaceRenderer`] is the seam a host implements to consume it.

use serde::Serialize;

use crate::geom::ScalarGrid;

pub const DEFAULT_COLOR_SCHEME: &str = "Greys";
pub const PLOT_TITLE: &str = "Interactive 3D Möbius Strip";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub ambient: f64,
    pub diffuse: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            diffuse: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisTitles {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
}

impl Default for AxisTitles {
    fn default() -> Self {
        Self {
            x: "X",
            y: "Y",
            z: "Z",
        }
    }
}

/// Borrowed render payload; serializes each grid as nested rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfacePlot<'a> {
    pub x: &'a ScalarGrid,
    pub y: &'a ScalarGrid,
    pub z: &'a ScalarGrid,
    /// Passed through as given; unknown names are the renderer's problem.
    pub color_scheme: String,
    pub show_scale: bool,
    pub lighting: Lighting,
    pub opacity: f64,
    pub title: &'static str,
    pub aspect_mode: &'static str,
    pub axis_titles: AxisTitles,
}

impl<'a> SurfacePlot<'a> {
    #[must_use]
    pub fn new(x: &'a ScalarGrid, y: &'a ScalarGrid, z: &'a ScalarGrid, color_scheme: &str) -> Self {
        Self {
            x,
            y,
            z,
            color_scheme: color_scheme.to_string(),
            show_scale: false,
            lighting: Lighting::default(),
            opacity: 0.9,
            title: PLOT_TITLE,
            aspect_mode: "data",
            axis_titles: AxisTitles::default(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }
}

/// Consumer of a [`SurfacePlot`], e.g. a plotting backend or a JS bridge.
pub trait SurfaceRenderer {
    type Error;

    fn render(&mut self, plot: &SurfacePlot<'_>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{MobiusParams, MobiusStrip};

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<(String, (usize, usize))>,
    }

    impl SurfaceRenderer for RecordingRenderer {
        type Error = String;

        fn render(&mut self, plot: &SurfacePlot<'_>) -> Result<(), Self::Error> {
            if plot.color_scheme.is_empty() {
                return Err("empty color scheme".to_string());
            }
            self.calls.push((plot.color_scheme.clone(), plot.shape()));
            Ok(())
        }
    }

    #[test]
    fn plot_defaults() {
        let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.4, 8)).unwrap();
        let plot = strip.plot(None);
        assert_eq!(plot.color_scheme, DEFAULT_COLOR_SCHEME);
        assert!(!plot.show_scale);
        assert_eq!(plot.lighting, Lighting { ambient: 0.6, diffuse: 0.8 });
        assert_eq!(plot.opacity, 0.9);
        assert_eq!(plot.title, "Interactive 3D Möbius Strip");
        assert_eq!(plot.aspect_mode, "data");
        assert_eq!(plot.axis_titles.z, "Z");
        assert!(std::ptr::eq(plot.x, strip.x()));
    }

    #[test]
    fn color_scheme_is_passed_through_unvalidated() {
        let strip = MobiusStrip::new(MobiusParams::new(1.0, 0.4, 8)).unwrap();
        let mut renderer = RecordingRenderer::default();
        renderer.render(&strip.plot(Some("NotARealScheme"))).unwrap();
        renderer.render(&strip.plot(Some("Viridis"))).unwrap();
        assert_eq!(
            renderer.calls,
            vec![
                ("NotARealScheme".to_string(), (8, 8)),
                ("Viridis".to_string(), (8, 8)),
            ]
        );
        assert!(renderer.render(&strip.plot(Some(""))).is_err());
    }
}
