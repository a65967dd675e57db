//! The committed edit state of one piece of media.

use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;
use crate::transform::{is_modified_with_tolerance, AspectConstraint, Orientation, Rectangle};

/// What kind of media is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaKind {
    #[default]
    Photo,
    /// A video; edits apply to its poster frame.
    Video,
}

/// Opaque reference to the media being edited.
///
/// The handle is never interpreted. The pixel size, when known, is only used
/// to fit crop rectangles to aspect constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MediaRef {
    pub handle: String,
    pub kind: MediaKind,
    /// Source pixel size (width, height), before rotation
    #[serde(default)]
    pub size: Option<(u32, u32)>,
}

impl MediaRef {
    pub fn photo(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            kind: MediaKind::Photo,
            size: None,
        }
    }

    pub fn video(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            kind: MediaKind::Video,
            size: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    #[inline]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Non-destructive edits applied to one piece of media.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditState {
    pub orientation: Orientation,
    pub aspect: AspectConstraint,
    pub rectangle: Rectangle,
    pub strokes: Vec<Stroke>,
    pub media: MediaRef,
    /// Self-destruct timer in seconds
    #[serde(default)]
    pub ttl: Option<u32>,
    /// Send without sound (videos only)
    #[serde(default)]
    pub muted: bool,
}

impl EditState {
    /// Untouched state for `media`.
    pub fn new(media: MediaRef) -> Self {
        Self {
            media,
            ..Self::default()
        }
    }

    /// True if the geometry differs from the untouched image.
    pub fn is_cropped(&self, tolerance: f64) -> bool {
        is_modified_with_tolerance(self.orientation, &self.rectangle, self.aspect, tolerance)
    }

    pub fn has_drawing(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Source pixel size in the current orientation.
    pub fn oriented_size(&self) -> Option<(u32, u32)> {
        self.media.size.map(|size| self.orientation.oriented_size(size))
    }
}
