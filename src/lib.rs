#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{CurveParameters, TessellationOptions, VertexBuffer};
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
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

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

/// Weaver vertex buffer handed to the host.
///
/// The host reads `len()` floats starting at `ptr()` straight out of linear
/// memory and must call `free()` once it is done; the view is invalid after
/// that.
#[wasm_bindgen]
pub struct WeaverGeometry {
    params: CurveParameters,
    buffer: VertexBuffer,
}

#[wasm_bindgen]
impl WeaverGeometry {
    #[wasm_bindgen(constructor)]
    pub fn new(
        detail: i32,
        radius: f32,
        tube: f32,
        p: i32,
        q: i32,
    ) -> Result<WeaverGeometry, JsValue> {
        Self::from_params(CurveParameters::new(detail, radius, tube, p, q))
    }

    /// Pointer to the first float of the buffer.
    #[wasm_bindgen]
    pub fn ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Number of floats (not points) behind `ptr()`.
    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.buffer.count()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[wasm_bindgen]
    pub fn point_count(&self) -> usize {
        self.buffer.point_count()
    }

    /// Copy of the buffer as a `Float32Array`.
    #[wasm_bindgen]
    pub fn vertices(&self) -> Vec<f32> {
        self.buffer.as_slice().to_vec()
    }

    /// The parameters this geometry was generated from.
    #[wasm_bindgen]
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.params).map_err(to_js_error)
    }
}

impl WeaverGeometry {
    fn from_params(params: CurveParameters) -> Result<WeaverGeometry, JsValue> {
        let buffer = geom::generate(&params).map_err(to_js_error)?;
        debug_log!(
            "weaver geometry: {} points, {} floats",
            buffer.point_count(),
            buffer.count()
        );
        Ok(WeaverGeometry { params, buffer })
    }

    #[must_use]
    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn into_buffer(self) -> VertexBuffer {
        self.buffer
    }
}

/// Generates the weaver vertices and returns them as a `Float32Array`.
#[wasm_bindgen]
pub fn create_weaver_geometry(
    detail: i32,
    radius: f32,
    tube: f32,
    p: i32,
    q: i32,
) -> Result<Vec<f32>, JsValue> {
    let params = CurveParameters::new(detail, radius, tube, p, q);
    geom::generate(&params)
        .map(VertexBuffer::into_vec)
        .map_err(to_js_error)
}

/// Same as [`create_weaver_geometry`], for a `{ detail, radius, tube, p, q }` object.
#[wasm_bindgen]
pub fn create_weaver_geometry_from(params: JsValue) -> Result<WeaverGeometry, JsValue> {
    let params: CurveParameters = serde_wasm_bindgen::from_value(params).map_err(to_js_error)?;
    WeaverGeometry::from_params(params)
}

/// Segments generated per unit of `detail`.
#[wasm_bindgen]
pub fn segments_per_detail() -> usize {
    TessellationOptions::default().segments_per_detail
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
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{WeaverGeometry, create_weaver_geometry, segments_per_detail};
    use crate::geom::{CurveParameters, generate};

    #[test]
    fn handle_exposes_buffer_and_count() {
        let geometry = WeaverGeometry::new(2, 1.5, 0.1, 5, 7).expect("valid detail");

        assert_eq!(geometry.len(), 3 * (2 * 100 + 1));
        assert_eq!(geometry.point_count(), 201);
        assert!(!geometry.is_empty());
        assert_eq!(geometry.ptr(), geometry.buffer().as_slice().as_ptr());
        assert_eq!(geometry.vertices().len(), geometry.len());
    }

    #[test]
    fn one_shot_matches_handle() {
        let copied = create_weaver_geometry(1, 1.0, 0.25, 2, 3).expect("valid detail");
        let reference = generate(&CurveParameters::new(1, 1.0, 0.25, 2, 3)).expect("valid detail");
        assert_eq!(copied, reference.into_vec());
    }

    #[test]
    fn zero_detail_is_an_error() {
        assert!(WeaverGeometry::new(0, 1.5, 0.1, 5, 7).is_err());
        assert!(create_weaver_geometry(-2, 1.5, 0.1, 5, 7).is_err());
    }

    #[test]
    fn exposes_segment_density() {
        assert_eq!(segments_per_detail(), 100);
    }
}
