#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod render;

use std::fmt;

use geom::{DEFAULT_PRECISION, EdgeStitching, MobiusParams, MobiusStrip};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize()` finds the logger already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for JavaScript hosts.
///
/// Holds at most one strip; `configure` replaces it.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    strip: Option<MobiusStrip>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            strip: None,
        }
    }

    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Builds a new strip; the previous one is kept if validation fails.
    #[wasm_bindgen]
    pub fn configure(&mut self, radius: f64, width: f64, resolution: u32) -> Result<(), JsValue> {
        let resolution = usize::try_from(resolution).map_err(to_js_error)?;
        let strip = MobiusStrip::new(MobiusParams::new(radius, width, resolution)).map_err(to_js_error)?;
        debug_log!("engine configured: R={radius} w={width} n={resolution}");
        self.strip = Some(strip);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_configured(&self) -> bool {
        self.strip.is_some()
    }

    #[wasm_bindgen]
    pub fn surface_area(&self, precision: Option<u32>) -> Result<f64, JsValue> {
        let strip = self.require_strip()?;
        Ok(strip.surface_area(precision.unwrap_or(DEFAULT_PRECISION)))
    }

    /// Edge length with the default stitching, or the named one
    /// (`mirrored`, `reversed`, `continuous`).
    #[wasm_bindgen]
    pub fn edge_length(&self, precision: Option<u32>, stitching: Option<String>) -> Result<f64, JsValue> {
        let strip = self.require_strip()?;
        let stitching = parse_stitching(stitching.as_deref())?;
        Ok(strip.edge_length_with(stitching, precision.unwrap_or(DEFAULT_PRECISION)))
    }

    #[wasm_bindgen]
    pub fn resolution(&self) -> Result<u32, JsValue> {
        let strip = self.require_strip()?;
        u32::try_from(strip.resolution()).map_err(to_js_error)
    }

    /// Serialized render payload for the current strip.
    #[wasm_bindgen]
    pub fn get_surface(&self, color_scheme: Option<String>) -> Result<JsValue, JsValue> {
        let strip = self.require_strip()?;
        let plot = strip.plot(color_scheme.as_deref());
        serde_wasm_bindgen::to_value(&plot).map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn get_edge_diagnostics(&self, stitching: Option<String>) -> Result<JsValue, JsValue> {
        let strip = self.require_strip()?;
        let stitching = parse_stitching(stitching.as_deref())?;
        let diagnostics = strip.edge_diagnostics(stitching);
        serde_wasm_bindgen::to_value(&diagnostics).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    /// The current strip, if `configure` has succeeded at least once.
    #[must_use]
    pub fn strip(&self) -> Option<&MobiusStrip> {
        self.strip.as_ref()
    }

    fn require_strip(&self) -> Result<&MobiusStrip, JsValue> {
        self.strip
            .as_ref()
            .ok_or_else(|| js_error("engine is not configured; call configure() first"))
    }
}

fn parse_stitching(name: Option<&str>) -> Result<EdgeStitching, JsValue> {
    match name {
        None => Ok(EdgeStitching::default()),
        Some(name) => EdgeStitching::from_name(name)
            .ok_or_else(|| js_error(&format!("unknown edge stitching `{name}`"))),
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("engine error: {message}");
        JsValue::NULL
    }
}
