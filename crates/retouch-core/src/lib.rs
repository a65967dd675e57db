//! Retouch Core - Non-destructive media edit state
//!
//! This crate tracks what a user did to a photo or video before sending it:
//! quarter-turn rotation, mirroring, an aspect-constrained crop rectangle and
//! freehand strokes. Nothing is rasterized here; the host renders previews
//! and applies the committed [`EditState`] at export time.

pub mod arena;
pub mod config;
pub mod drawer;
pub mod error;
pub mod history;
pub mod session;
pub mod state;
pub mod stroke;
pub mod transform;

pub use arena::SessionArena;
pub use config::{DrawerConfig, SessionConfig};
pub use drawer::{Animation, AnimationCollection, AnimationDrawer, AnimationSearch, AnimationSet};
pub use error::EditError;
pub use history::UndoRedoStack;
pub use session::{EditSession, MemoryPencilStore, PencilStore, SessionMode};
pub use state::{EditState, MediaKind, MediaRef};
pub use stroke::{
    ActiveStroke, PencilStyle, Point, Stroke, StrokeColor, StrokeSmoother, ToolMode,
};
pub use transform::{
    flip, is_modified, rotate_clockwise, AspectConstraint, Flip, FlipAxis, Orientation,
    Rectangle, Rotation,
};
