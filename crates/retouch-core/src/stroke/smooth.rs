//! Incremental cubic Bezier smoothing of freehand pointer samples.
//!
//! Raw samples arrive one at a time. Three are buffered; when the next one
//! arrives, the midpoint between the last buffered sample and the new one
//! becomes a synthetic anchor and a cubic segment
//! `{buffered[1], buffered[2], anchor}` is emitted. The buffer then restarts
//! from `{anchor, new}`, which keeps consecutive segments C1-continuous
//! through the shared anchor while emitting them as the gesture progresses.
//!
//! Emitted segments are never retracted; only the buffered tail changes until
//! [`StrokeSmoother::end_figure`] flushes it.

use serde::{Deserialize, Serialize};

use super::Point;

/// Samples held back before a segment can be emitted.
const SEGMENT_WINDOW: usize = 3;

/// One cubic Bezier segment. The start point is the previous segment's end
/// (or the figure's begin point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl BezierSegment {
    fn scaled(&self, scale: Point) -> Self {
        Self {
            control1: self.control1 * scale,
            control2: self.control2 * scale,
            end: self.end * scale,
        }
    }
}

/// An open figure: a begin point followed by cubic segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothPath {
    pub begin: Point,
    pub segments: Vec<BezierSegment>,
}

/// Turns a live sequence of pointer samples into cubic Bezier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSmoother {
    begin: Point,
    pending: Vec<Point>,
    segments: Vec<BezierSegment>,
}

impl StrokeSmoother {
    /// Start a figure at `begin`. The begin point is not buffered.
    pub fn new(begin: Point) -> Self {
        Self {
            begin,
            pending: Vec::with_capacity(SEGMENT_WINDOW),
            segments: Vec::new(),
        }
    }

    /// Feed the next raw sample.
    pub fn move_to(&mut self, point: Point) {
        if self.pending.len() < SEGMENT_WINDOW {
            self.pending.push(point);
            return;
        }

        let anchor = self.pending[2].midpoint(point);
        self.segments.push(BezierSegment {
            control1: self.pending[1],
            control2: self.pending[2],
            end: anchor,
        });

        self.pending.clear();
        self.pending.push(anchor);
        self.pending.push(point);
    }

    /// Finish the figure at `point`.
    ///
    /// The final point is fed through [`Self::move_to`] once per buffered
    /// sample (counted when the flush starts), which forces out the trailing
    /// segments and ends the path exactly on `point`. With at most one
    /// buffered sample nothing is emitted.
    pub fn end_figure(&mut self, point: Point) {
        let remaining = self.pending.len();
        if remaining > 1 {
            for _ in 0..remaining {
                self.move_to(point);
            }
        }
    }

    pub fn begin(&self) -> Point {
        self.begin
    }

    /// Segments emitted so far, unscaled.
    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Buffered samples not yet part of an emitted segment.
    pub fn pending(&self) -> &[Point] {
        &self.pending
    }

    /// End of the last emitted segment, or the begin point.
    pub fn last_anchor(&self) -> Point {
        self.segments.last().map_or(self.begin, |s| s.end)
    }

    /// Emitted segments scaled componentwise by `scale` (e.g. the export size).
    pub fn to_segments(&self, scale: Point) -> Vec<BezierSegment> {
        self.segments.iter().map(|s| s.scaled(scale)).collect()
    }

    /// The whole figure scaled componentwise by `scale`.
    pub fn to_path(&self, scale: Point) -> SmoothPath {
        SmoothPath {
            begin: self.begin * scale,
            segments: self.to_segments(scale),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
