//! Bed tiling geometry.
//!
//! Partitions one bed axis into a run of equally sized tile slots, leaving a
//! margin on both sides. The slot size is capped at a maximum span so that a
//! small step count on a large bed does not produce absurdly wide tiles; the
//! step count itself is never adjusted, so with few steps the grid
//! intentionally stops short of the far margin.

/// A point on the bed, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Placement of tile slots along one bed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPlan {
    /// Origin of slot 0 (the near margin).
    pub start: f64,
    /// Distance between consecutive slot origins.
    pub step: f64,
}

impl AxisPlan {
    /// Origin of slot `index`.
    pub fn slot_origin(&self, index: u32) -> f64 {
        self.start + self.step * index as f64
    }
}

/// Plan one axis of the tile grid.
///
/// The usable span is `bed_size - 2 * margin`; the slot step is the span
/// divided by the step count, capped at `max_span`.
pub fn plan_axis(bed_size: f64, margin: f64, steps: u32, max_span: f64) -> AxisPlan {
    let span = bed_size - 2.0 * margin;
    let step = (span / steps as f64).min(max_span);
    AxisPlan {
        start: margin,
        step,
    }
}
