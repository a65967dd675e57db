//! Crop rectangles and aspect-ratio constraints.
//!
//! Crop rectangles live in normalized image space: every coordinate is in the
//! range 0.0 to 1.0 relative to the (rotated) image, independent of its pixel
//! dimensions.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner
//! - width/height are relative to the full frame
//!
//! # Exactness
//!
//! Every constructor snaps coordinates to a dyadic grid of 2^-32. Sums and
//! differences of grid values inside the unit square are exact in `f64`, so
//! the rotate and mirror maps in [`super::rotation`] compose without drift:
//! four quarter turns reproduce the original rectangle bit-for-bit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rotation::Orientation;
use crate::error::EditError;

/// Grid resolution for normalized coordinates.
const GRID: f64 = 4_294_967_296.0;

/// Slack accepted by [`Rectangle::try_new`] for inputs that overshoot the
/// unit square through decimal round-off (e.g. `0.1 + 0.9`).
const BOUNDS_EPSILON: f64 = 1e-9;

/// Default threshold below which a near-full-frame crop is not an edit.
pub const MODIFIED_TOLERANCE: f64 = 0.1;

#[inline]
fn snap(value: f64) -> f64 {
    (value * GRID).round() / GRID
}

/// A crop rectangle in normalized image space.
///
/// The all-zero [`Rectangle::EMPTY`] sentinel means "no crop applied".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectangleFields")]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Wire shape of a rectangle; deserialization re-snaps through `Rectangle::new`.
#[derive(Deserialize)]
struct RectangleFields {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RectangleFields> for Rectangle {
    fn from(f: RectangleFields) -> Self {
        Rectangle::new(f.x, f.y, f.width, f.height)
    }
}

impl Rectangle {
    /// No crop applied.
    pub const EMPTY: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// The whole frame.
    pub const FULL: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Create a rectangle, clamping it into the unit square.
    ///
    /// Non-finite input, or a rectangle with no area after clamping, yields
    /// [`Rectangle::EMPTY`].
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Self::EMPTY;
        }
        if width <= 0.0 || height <= 0.0 {
            return Self::EMPTY;
        }

        let left = snap(x.clamp(0.0, 1.0));
        let top = snap(y.clamp(0.0, 1.0));
        let right = snap((x + width).clamp(0.0, 1.0));
        let bottom = snap((y + height).clamp(0.0, 1.0));

        if right <= left || bottom <= top {
            return Self::EMPTY;
        }

        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Create a rectangle, rejecting anything outside the unit square.
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, EditError> {
        let degenerate = EditError::DegenerateGeometry {
            x,
            y,
            width,
            height,
        };

        let finite = [x, y, width, height].iter().all(|v| v.is_finite());
        if !finite
            || width <= 0.0
            || height <= 0.0
            || x < -BOUNDS_EPSILON
            || y < -BOUNDS_EPSILON
            || x + width > 1.0 + BOUNDS_EPSILON
            || y + height > 1.0 + BOUNDS_EPSILON
        {
            return Err(degenerate);
        }

        let rect = Self::new(x, y, width, height);
        if rect.is_empty() {
            return Err(degenerate);
        }
        Ok(rect)
    }

    /// Left edge (0.0 to 1.0)
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge (0.0 to 1.0)
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True for the "no crop" sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// True if this rectangle differs from the full frame by more than `tolerance`.
    pub fn is_cropped(&self, tolerance: f64) -> bool {
        !self.is_empty()
            && (self.x > 0.0
                || self.y > 0.0
                || (self.width - 1.0).abs() > tolerance
                || (self.height - 1.0).abs() > tolerance)
    }
}

/// Width:height constraint for the crop rectangle.
///
/// Directional ratios come in transposed pairs so that a quarter turn can
/// swap a portrait constraint for its landscape counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectConstraint {
    /// Free-form; the rectangle's own ratio is authoritative.
    #[default]
    Custom,
    /// The source media's own pixel ratio.
    Original,
    Square,
    // Portrait
    TwoThree,
    ThreeFive,
    ThreeFour,
    FourFive,
    FiveSeven,
    NineSixteen,
    // Landscape
    ThreeTwo,
    FiveThree,
    FourThree,
    FiveFour,
    SevenFive,
    SixteenNine,
}

impl AspectConstraint {
    /// Every non-custom constraint, in menu order.
    pub const ALL: [AspectConstraint; 14] = [
        AspectConstraint::Original,
        AspectConstraint::Square,
        AspectConstraint::TwoThree,
        AspectConstraint::ThreeFive,
        AspectConstraint::ThreeFour,
        AspectConstraint::FourFive,
        AspectConstraint::FiveSeven,
        AspectConstraint::NineSixteen,
        AspectConstraint::ThreeTwo,
        AspectConstraint::FiveThree,
        AspectConstraint::FourThree,
        AspectConstraint::FiveFour,
        AspectConstraint::SevenFive,
        AspectConstraint::SixteenNine,
    ];

    #[inline]
    pub fn is_custom(self) -> bool {
        self == AspectConstraint::Custom
    }

    /// The counterpart after a quarter turn.
    ///
    /// Square, original and custom pass through unchanged.
    pub fn transposed(self) -> Self {
        use AspectConstraint::*;
        match self {
            Custom | Original | Square => self,
            TwoThree => ThreeTwo,
            ThreeFive => FiveThree,
            ThreeFour => FourThree,
            FourFive => FiveFour,
            FiveSeven => SevenFive,
            NineSixteen => SixteenNine,
            ThreeTwo => TwoThree,
            FiveThree => ThreeFive,
            FourThree => ThreeFour,
            FiveFour => FourFive,
            SevenFive => FiveSeven,
            SixteenNine => NineSixteen,
        }
    }

    /// Integer width:height terms for the fixed ratios.
    pub fn terms(self) -> Option<(u32, u32)> {
        use AspectConstraint::*;
        match self {
            Custom | Original => None,
            Square => Some((1, 1)),
            TwoThree => Some((2, 3)),
            ThreeFive => Some((3, 5)),
            ThreeFour => Some((3, 4)),
            FourFive => Some((4, 5)),
            FiveSeven => Some((5, 7)),
            NineSixteen => Some((9, 16)),
            ThreeTwo => Some((3, 2)),
            FiveThree => Some((5, 3)),
            FourThree => Some((4, 3)),
            FiveFour => Some((5, 4)),
            SevenFive => Some((7, 5)),
            SixteenNine => Some((16, 9)),
        }
    }

    /// Pixel width/height ratio, resolving `Original` against `source_size`.
    pub fn ratio(self, source_size: Option<(u32, u32)>) -> Option<f64> {
        match self {
            AspectConstraint::Custom => None,
            AspectConstraint::Original => match source_size {
                Some((w, h)) if w > 0 && h > 0 => Some(w as f64 / h as f64),
                _ => None,
            },
            other => other.terms().map(|(w, h)| w as f64 / h as f64),
        }
    }
}

impl fmt::Display for AspectConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectConstraint::Custom => f.write_str("Custom"),
            AspectConstraint::Original => f.write_str("Original"),
            AspectConstraint::Square => f.write_str("Square"),
            other => match other.terms() {
                Some((w, h)) => write!(f, "{}:{}", w, h),
                None => Ok(()),
            },
        }
    }
}

/// Check whether an orientation/crop/constraint triple differs from the
/// untouched image.
///
/// Near-full-frame crops (within [`MODIFIED_TOLERANCE`] of the full frame
/// in width and height, anchored at the origin) do not count.
pub fn is_modified(orientation: Orientation, rect: &Rectangle, aspect: AspectConstraint) -> bool {
    is_modified_with_tolerance(orientation, rect, aspect, MODIFIED_TOLERANCE)
}

/// [`is_modified`] with an explicit full-frame tolerance.
pub fn is_modified_with_tolerance(
    orientation: Orientation,
    rect: &Rectangle,
    aspect: AspectConstraint,
    tolerance: f64,
) -> bool {
    !aspect.is_custom() || !orientation.is_identity() || rect.is_cropped(tolerance)
}

/// Fit a rectangle to an aspect constraint.
///
/// Returns the largest rectangle with the constrained pixel ratio, centred
/// inside `rect` (or inside the full frame when `rect` is empty).
/// `source_size` is the pixel size of the frame `rect` is expressed in, so
/// callers must pass the size after rotation.
///
/// `Custom`, or `Original` without a known size, returns `rect` unchanged.
pub fn fit_to_aspect(
    rect: Rectangle,
    aspect: AspectConstraint,
    source_size: Option<(u32, u32)>,
) -> Rectangle {
    let (Some(ratio), Some((src_w, src_h))) = (aspect.ratio(source_size), source_size) else {
        return rect;
    };
    if src_w == 0 || src_h == 0 {
        return rect;
    }

    let base = if rect.is_empty() { Rectangle::FULL } else { rect };

    // Normalized width/height ratio that yields `ratio` in pixels
    let target = ratio * src_h as f64 / src_w as f64;

    let (width, height) = if base.width / base.height > target {
        (base.height * target, base.height)
    } else {
        (base.width, base.width / target)
    };

    let x = base.x + (base.width - width) / 2.0;
    let y = base.y + (base.height - height) / 2.0;

    let fitted = Rectangle::new(x, y, width, height);
    if fitted.is_empty() {
        rect
    } else {
        fitted
    }
}
