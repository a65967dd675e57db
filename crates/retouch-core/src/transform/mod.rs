//! Non-destructive geometry: quarter-turn rotation, mirroring and cropping.
//!
//! Every function here is pure. Edits are kept as an orientation plus a crop
//! rectangle and an aspect constraint; nothing is rasterized.
//!
//! # Transform Order
//!
//! The host applies transforms to pixels in this order:
//! 1. Rotation (quarter turns, clockwise)
//! 2. Flip
//! 3. Crop (rectangle expressed in the rotated, flipped frame)
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are normalized (0.0 to 1.0) relative to the oriented image
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::{
    fit_to_aspect, is_modified, is_modified_with_tolerance, AspectConstraint, Rectangle,
    MODIFIED_TOLERANCE,
};
pub use rotation::{flip, rotate_clockwise, Flip, FlipAxis, Orientation, Rotation};
