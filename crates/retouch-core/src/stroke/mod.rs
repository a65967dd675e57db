//! Freehand strokes for the drawing tool.
//!
//! Points are in canvas-normalized space (0.0 to 1.0 across the visible
//! canvas). A stroke keeps its raw samples; the smooth curve is rebuilt from
//! them on demand with [`StrokeSmoother`].

mod smooth;

use std::ops::Mul;

use serde::{Deserialize, Serialize};

pub use smooth::{BezierSegment, SmoothPath, StrokeSmoother};

/// A 2-D point in canvas-normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Componentwise scale.
impl Mul for Point {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// RGBA stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StrokeColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::rgb(0xFF, 0x3B, 0x30)
    }
}

/// Whether a stroke paints or erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
}

/// Pencil color and thickness, persisted by the host between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PencilStyle {
    pub color: StrokeColor,
    /// Thickness in canvas-normalized units
    pub thickness: f32,
}

impl Default for PencilStyle {
    fn default() -> Self {
        Self {
            color: StrokeColor::default(),
            thickness: 0.01,
        }
    }
}

/// A completed stroke. Immutable once finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    color: StrokeColor,
    thickness: f32,
    mode: ToolMode,
}

impl Stroke {
    /// Raw samples, begin point first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Replay the raw samples through a fresh smoother.
    pub fn smoothed(&self) -> StrokeSmoother {
        let Some((&begin, rest)) = self.points.split_first() else {
            return StrokeSmoother::new(Point::default());
        };

        let mut smoother = StrokeSmoother::new(begin);
        if let Some((&last, middle)) = rest.split_last() {
            for &point in middle {
                smoother.move_to(point);
            }
            smoother.move_to(last);
            smoother.end_figure(last);
        }
        smoother
    }
}

/// The stroke under the pointer during a live gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStroke {
    smoother: StrokeSmoother,
    points: Vec<Point>,
    style: PencilStyle,
    mode: ToolMode,
}

impl ActiveStroke {
    pub fn begin(point: Point, style: PencilStyle, mode: ToolMode) -> Self {
        Self {
            smoother: StrokeSmoother::new(point),
            points: vec![point],
            style,
            mode,
        }
    }

    pub fn extend(&mut self, point: Point) {
        self.smoother.move_to(point);
        self.points.push(point);
    }

    /// Add the final sample, flush the smoother and freeze the stroke.
    pub fn finish(mut self, point: Point) -> Stroke {
        self.extend(point);
        self.smoother.end_figure(point);
        Stroke {
            points: self.points,
            color: self.style.color,
            thickness: self.style.thickness,
            mode: self.mode,
        }
    }

    /// Live preview curve.
    pub fn smoother(&self) -> &StrokeSmoother {
        &self.smoother
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
