//! WASM bindings for [`EditSession`].
//!
//! The session lives in WASM memory; the host drives it with pointer and
//! button events and reads plain JS objects back for rendering.

use std::cell::RefCell;
use std::rc::Rc;

use retouch_core::{
    EditSession, EditState, PencilStore, PencilStyle, Point, Rectangle, SessionConfig,
    StrokeColor,
};
use wasm_bindgen::prelude::*;

use crate::transform::JsGeometry;
use crate::types::{aspect_from_u8, aspect_to_u8, flip_axis_from_u8, tool_mode_from_u8, tool_mode_to_u8};

/// Pencil store shared between the session and its JS wrapper, so the host
/// can read the style back and persist it.
#[derive(Clone, Default)]
struct SharedPencil(Rc<RefCell<Option<PencilStyle>>>);

impl PencilStore for SharedPencil {
    fn load(&self) -> Option<PencilStyle> {
        *self.0.borrow()
    }

    fn store(&mut self, style: PencilStyle) {
        *self.0.borrow_mut() = Some(style);
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js_or_default<T>(value: JsValue, what: &str) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// An edit session for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsEditSession(state, undefined, savedPencil);
/// session.begin_crop();
/// session.rotate_clockwise();
/// session.commit_crop();
/// const committed = session.state();
/// ```
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
    pencil: SharedPencil,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session.
    ///
    /// # Arguments
    /// * `state` - Serialized `EditState`
    /// * `config` - Serialized `SessionConfig`, or `undefined` for defaults
    /// * `pencil` - Previously stored pencil style, or `undefined`
    #[wasm_bindgen(constructor)]
    pub fn new(state: JsValue, config: JsValue, pencil: JsValue) -> Result<JsEditSession, JsValue> {
        let state: EditState = serde_wasm_bindgen::from_value(state)
            .map_err(|e| JsValue::from_str(&format!("Invalid edit state: {}", e)))?;
        let config: SessionConfig = from_js_or_default(config, "session config")?;
        let pencil: Option<PencilStyle> = from_js_or_default(pencil, "pencil")?;
        Ok(Self::from_parts(state, config, pencil))
    }

    /// "viewing", "cropping" or "drawing".
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_cropped(&self) -> bool {
        self.inner.is_cropped()
    }

    #[wasm_bindgen(getter)]
    pub fn has_drawing(&self) -> bool {
        self.inner.has_drawing()
    }

    /// True between `begin_export` and `finish_export`; edits are refused meanwhile.
    #[wasm_bindgen(getter)]
    pub fn is_export_pending(&self) -> bool {
        self.inner.is_export_pending()
    }

    #[wasm_bindgen(getter)]
    pub fn preview_revision(&self) -> u64 {
        self.inner.preview_revision()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Aspect code of the displayed geometry (see `available_aspects`).
    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> u8 {
        aspect_to_u8(self.inner.geometry().2)
    }

    /// Committed `EditState` as a JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.state())
    }

    /// Displayed geometry: the draft while cropping, otherwise the committed one.
    pub fn geometry(&self) -> Result<JsValue, JsValue> {
        let (orientation, rectangle, aspect) = self.inner.geometry();
        JsGeometry {
            orientation,
            rectangle,
            aspect,
        }
        .to_js()
    }

    /// Displayed strokes: the draft while drawing, otherwise the committed ones.
    pub fn strokes(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.strokes())
    }

    /// Smoothed segments of the stroke under the pointer, scaled to canvas pixels.
    pub fn active_path(&self, canvas_width: f32, canvas_height: f32) -> Result<JsValue, JsValue> {
        let scale = Point::new(canvas_width, canvas_height);
        match self.inner.active_stroke() {
            Some(active) => to_js(&active.smoother().to_path(scale)),
            None => Ok(JsValue::NULL),
        }
    }

    /// Pencil style last written by a committed drawing.
    pub fn stored_pencil(&self) -> Result<JsValue, JsValue> {
        to_js(&*self.pencil.0.borrow())
    }

    pub fn begin_crop(&mut self) -> bool {
        self.inner.begin_crop()
    }

    pub fn commit_crop(&mut self) -> bool {
        self.inner.commit_crop()
    }

    pub fn cancel_crop(&mut self) -> bool {
        self.inner.cancel_crop()
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.inner.rotate_clockwise()
    }

    /// `axis`: 0 = horizontal, 1 = vertical.
    pub fn flip(&mut self, axis: u8) -> bool {
        self.inner.flip(flip_axis_from_u8(axis))
    }

    pub fn set_aspect(&mut self, code: u8) -> bool {
        self.inner.set_aspect(aspect_from_u8(code))
    }

    /// Replace the draft rectangle. Errors if it leaves the unit square.
    pub fn set_crop_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<bool, JsValue> {
        let rect = Rectangle::try_new(x, y, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.set_crop_rectangle(rect))
    }

    pub fn begin_draw(&mut self) -> bool {
        self.inner.begin_draw()
    }

    pub fn end_draw(&mut self, committed: bool) -> bool {
        self.inner.end_draw(committed)
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32) -> bool {
        self.inner.begin_stroke(Point::new(x, y))
    }

    pub fn extend_stroke(&mut self, x: f32, y: f32) -> bool {
        self.inner.extend_stroke(Point::new(x, y))
    }

    pub fn end_stroke(&mut self, x: f32, y: f32) -> bool {
        self.inner.end_stroke(Point::new(x, y))
    }

    pub fn cancel_stroke(&mut self) -> bool {
        self.inner.cancel_stroke()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    /// `mode`: 0 = draw, 1 = erase.
    pub fn set_tool_mode(&mut self, mode: u8) -> bool {
        self.inner.set_tool_mode(tool_mode_from_u8(mode))
    }

    /// Current tool mode code, or `undefined` when not drawing.
    pub fn tool_mode(&self) -> Option<u8> {
        self.inner.tool_mode().map(tool_mode_to_u8)
    }

    pub fn set_pencil(&mut self, r: u8, g: u8, b: u8, a: u8, thickness: f32) -> bool {
        self.inner.set_pencil(PencilStyle {
            color: StrokeColor::rgba(r, g, b, a),
            thickness,
        })
    }

    pub fn begin_export(&mut self) -> bool {
        self.inner.begin_export()
    }

    pub fn finish_export(&mut self) -> bool {
        self.inner.finish_export()
    }

    /// Self-destruct timer in seconds; `undefined` or 0 clears it.
    pub fn set_ttl(&mut self, seconds: Option<u32>) -> bool {
        self.inner.set_ttl(seconds)
    }

    pub fn set_muted(&mut self, muted: bool) -> bool {
        self.inner.set_muted(muted)
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.inner.toggle_mute()
    }
}

impl JsEditSession {
    pub(crate) fn from_parts(
        state: EditState,
        config: SessionConfig,
        pencil: Option<PencilStyle>,
    ) -> Self {
        let store = SharedPencil(Rc::new(RefCell::new(pencil)));
        let inner = EditSession::new(state, config).with_pencil_store(Box::new(store.clone()));
        Self {
            inner,
            pencil: store,
        }
    }
}
