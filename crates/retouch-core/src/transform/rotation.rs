//! Quarter-turn rotation and mirroring of the edit orientation.
//!
//! The orientation is stored as two fields, a clockwise quarter-turn count
//! and a single flip axis. Together they name one of the eight symmetries of
//! a rectangle, but every transform treats the pair as one unit: which flip
//! axis a gesture toggles depends on the current rotation.
//!
//! # Algorithm
//!
//! For a quarter turn clockwise, a crop rectangle `(x, y, w, h)` expressed in
//! the pre-rotation frame maps into the rotated frame as:
//! ```text
//! x' = 1 - (y + h)
//! y' = x
//! w' = h
//! h' = w
//! ```
//!
//! A horizontal mirror maps `x' = 1 - (x + w)`, a vertical mirror maps
//! `y' = 1 - (y + h)`.

use serde::{Deserialize, Serialize};

use super::crop::{AspectConstraint, Rectangle};

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Advance by 90 degrees, wrapping 270 to 0.
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::None => Rotation::Clockwise90,
            Rotation::Clockwise90 => Rotation::Clockwise180,
            Rotation::Clockwise180 => Rotation::Clockwise270,
            Rotation::Clockwise270 => Rotation::None,
        }
    }

    /// Advance by 180 degrees.
    pub fn half_turn(self) -> Self {
        self.clockwise().clockwise()
    }

    /// True for 90 and 270 degrees, where width and height trade places.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}

/// Stored flip state. At most one axis is ever flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// The visual axis a flip gesture mirrors along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl FlipAxis {
    /// The other axis.
    pub fn transposed(self) -> Self {
        match self {
            FlipAxis::Horizontal => FlipAxis::Vertical,
            FlipAxis::Vertical => FlipAxis::Horizontal,
        }
    }

    fn as_flip(self) -> Flip {
        match self {
            FlipAxis::Horizontal => Flip::Horizontal,
            FlipAxis::Vertical => Flip::Vertical,
        }
    }
}

/// Rotation and flip of an image view, composed as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: Rotation,
    pub flip: Flip,
}

impl Orientation {
    /// No rotation, no flip.
    pub const IDENTITY: Orientation = Orientation {
        rotation: Rotation::None,
        flip: Flip::None,
    };

    pub fn new(rotation: Rotation, flip: Flip) -> Self {
        Self { rotation, flip }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.rotation == Rotation::None && self.flip == Flip::None
    }

    /// Pixel size of the source after this orientation is applied.
    pub fn oriented_size(&self, (width, height): (u32, u32)) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Validate a transformed rectangle, keeping `previous` if it degenerated.
fn checked(previous: Rectangle, x: f64, y: f64, width: f64, height: f64) -> Rectangle {
    match Rectangle::try_new(x, y, width, height) {
        Ok(rect) => rect,
        Err(err) => {
            log::warn!("{}; keeping previous crop rectangle", err);
            previous
        }
    }
}

/// Rotate the orientation, crop rectangle and aspect constraint a quarter
/// turn clockwise.
///
/// Directional aspect constraints are transposed (3:2 becomes 2:3). An empty
/// rectangle stays empty.
///
/// # Example
///
/// ```ignore
/// let (o, r, a) = rotate_clockwise(Orientation::IDENTITY, rect, AspectConstraint::ThreeTwo);
/// assert_eq!(o.rotation, Rotation::Clockwise90);
/// assert_eq!(a, AspectConstraint::TwoThree);
/// ```
pub fn rotate_clockwise(
    orientation: Orientation,
    rect: Rectangle,
    aspect: AspectConstraint,
) -> (Orientation, Rectangle, AspectConstraint) {
    let rotated = Orientation {
        rotation: orientation.rotation.clockwise(),
        flip: orientation.flip,
    };

    let rect = if rect.is_empty() {
        rect
    } else {
        checked(
            rect,
            1.0 - (rect.y() + rect.height()),
            rect.x(),
            rect.height(),
            rect.width(),
        )
    };

    (rotated, rect, aspect.transposed())
}

/// Mirror the orientation and crop rectangle along a visual axis.
///
/// After an odd number of quarter turns the visual and stored axes disagree,
/// so the gesture toggles the other stored flip. Flipping an axis while the
/// opposite one is already flipped clears the flip and adds a half turn
/// instead, so both axes are never flipped at once.
pub fn flip(orientation: Orientation, axis: FlipAxis, rect: Rectangle) -> (Orientation, Rectangle) {
    let stored = if orientation.rotation.swaps_dimensions() {
        axis.transposed()
    } else {
        axis
    }
    .as_flip();

    let mut rotation = orientation.rotation;
    let flip = match orientation.flip {
        Flip::None => stored,
        current if current == stored => Flip::None,
        _ => {
            rotation = rotation.half_turn();
            Flip::None
        }
    };

    let rect = if rect.is_empty() {
        rect
    } else {
        match axis {
            FlipAxis::Horizontal => checked(
                rect,
                1.0 - (rect.x() + rect.width()),
                rect.y(),
                rect.width(),
                rect.height(),
            ),
            FlipAxis::Vertical => checked(
                rect,
                rect.x(),
                1.0 - (rect.y() + rect.height()),
                rect.width(),
                rect.height(),
            ),
        }
    };

    (Orientation { rotation, flip }, rect)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
