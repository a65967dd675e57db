//! WASM bindings for the pure geometry operations.
//!
//! These are stateless: the host passes a geometry object and gets a new one
//! back. Use [`crate::JsEditSession`] when draft/commit semantics are needed.

use retouch_core::transform::{self, AspectConstraint, Orientation, Rectangle};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::types::flip_axis_from_u8;

/// Orientation, crop rectangle and aspect constraint as one JS object.
///
/// ```typescript
/// {
///   orientation: { rotation: "Clockwise90", flip: "None" },
///   rectangle: { x: 0, y: 0, width: 1, height: 1 },
///   aspect: "Custom"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JsGeometry {
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub rectangle: Rectangle,
    #[serde(default)]
    pub aspect: AspectConstraint,
}

impl JsGeometry {
    pub(crate) fn from_js(value: JsValue) -> Result<Self, JsValue> {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid geometry: {}", e)))
    }

    pub(crate) fn to_js(self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn rotated(self) -> Self {
        let (orientation, rectangle, aspect) =
            transform::rotate_clockwise(self.orientation, self.rectangle, self.aspect);
        Self {
            orientation,
            rectangle,
            aspect,
        }
    }

    fn flipped(self, axis: u8) -> Self {
        let (orientation, rectangle) =
            transform::flip(self.orientation, flip_axis_from_u8(axis), self.rectangle);
        Self {
            orientation,
            rectangle,
            ..self
        }
    }

    fn modified(&self) -> bool {
        transform::is_modified(self.orientation, &self.rectangle, self.aspect)
    }
}

/// Rotate a geometry a quarter turn clockwise.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const next = rotate_clockwise(geometry);
/// ```
#[wasm_bindgen]
pub fn rotate_clockwise(geometry: JsValue) -> Result<JsValue, JsValue> {
    JsGeometry::from_js(geometry)?.rotated().to_js()
}

/// Mirror a geometry. `axis`: 0 = horizontal, 1 = vertical.
#[wasm_bindgen]
pub fn flip(geometry: JsValue, axis: u8) -> Result<JsValue, JsValue> {
    JsGeometry::from_js(geometry)?.flipped(axis).to_js()
}

/// Whether a geometry differs from the untouched image.
#[wasm_bindgen]
pub fn is_modified(geometry: JsValue) -> Result<bool, JsValue> {
    Ok(JsGeometry::from_js(geometry)?.modified())
}
