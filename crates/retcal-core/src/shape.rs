//! Hollow-square pillar emission.
//!
//! A pillar is one or two closed rectangular shells: the outer shell is
//! always drawn, the inner shell only when the square is large enough to
//! hold both with `2 * line_width` between them. On the first layer of each
//! temperature band the shells are shrunk by 0.08mm, which leaves a visible
//! notch marking the band boundary on the printed part.

use crate::geometry::Point;
use crate::sink::InstructionSink;

/// Shell shrink applied on the first layer of each temperature band (mm).
pub const BAND_MARKER_SHRINK: f64 = 0.08;

/// Everything needed to emit one pillar at one layer.
#[derive(Debug, Clone, Copy)]
pub struct PillarSpec {
    /// Tile slot origin on the bed.
    pub origin: Point,
    /// Side of the square pillar (mm).
    pub square_size: f64,
    /// Extrusion line width (mm).
    pub line_width: f64,
    /// Shell inset marking a band boundary, 0 on ordinary layers.
    pub shrink: f64,
    /// Extruder feed per mm of travel.
    pub e_per_mm: f64,
    /// Feedrate for the shell approach moves (mm/min).
    pub feed_travel: f64,
    /// Feedrate while extruding (mm/min).
    pub feed_print: f64,
}

impl PillarSpec {
    /// Whether the inner shell fits.
    pub fn has_inner_shell(&self) -> bool {
        self.square_size > 2.0 * self.line_width + self.shrink
    }
}

/// Emit the shells of one pillar.
///
/// Each shell opens with its own approach travel, so the head position is
/// re-established there; the position after the last extrusion is returned
/// so the caller can keep threading it.
pub fn emit_pillar(sink: &mut dyn InstructionSink, spec: &PillarSpec) -> Point {
    if spec.has_inner_shell() {
        emit_shell(sink, spec, 2.0 * spec.line_width + spec.shrink);
    }
    emit_shell(sink, spec, spec.line_width + spec.shrink)
}

/// One closed square loop inset by `offset` from the tile slot origin.
///
/// Corners are visited in fixed order: bottom-left start, then bottom-right,
/// top-right, top-left, back to bottom-left.
fn emit_shell(sink: &mut dyn InstructionSink, spec: &PillarSpec, offset: f64) -> Point {
    let near_x = spec.origin.x + offset;
    let near_y = spec.origin.y + offset;
    let far_x = spec.origin.x + spec.square_size - offset;
    let far_y = spec.origin.y + spec.square_size - offset;

    sink.set_speed(spec.feed_travel);
    let start = Point::new(near_x, near_y);
    sink.travel(start, spec.feed_travel);
    let mut pos = start;

    sink.set_speed(spec.feed_print);
    for corner in [
        Point::new(far_x, near_y),
        Point::new(far_x, far_y),
        Point::new(near_x, far_y),
        Point::new(near_x, near_y),
    ] {
        pos = extrude_to(sink, spec.e_per_mm, pos, corner);
    }
    pos
}

/// Extruding move from `from` to `to`, feeding filament in proportion to the
/// planar distance covered.
fn extrude_to(sink: &mut dyn InstructionSink, e_per_mm: f64, from: Point, to: Point) -> Point {
    let e = from.distance_to(to) * e_per_mm;
    sink.extrude(to, e);
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Instruction, RecordingSink};

    fn spec(square_size: f64, shrink: f64) -> PillarSpec {
        PillarSpec {
            origin: Point::new(20.0, 30.0),
            square_size,
            line_width: 0.45,
            shrink,
            e_per_mm: 0.0276,
            feed_travel: 4800.0,
            feed_print: 3000.0,
        }
    }

    fn extrusions(sink: &RecordingSink) -> Vec<(Point, f64)> {
        sink.instructions()
            .iter()
            .filter_map(|i| match i {
                Instruction::Extrude { to, e } => Some((*to, *e)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_two_shells_for_default_square() {
        let spec = spec(4.0, 0.0);
        assert!(spec.has_inner_shell());

        let mut sink = RecordingSink::new();
        emit_pillar(&mut sink, &spec);

        // Two shells: 2 travels, 8 extrusions.
        let travels = sink
            .instructions()
            .iter()
            .filter(|i| matches!(i, Instruction::Travel { .. }))
            .count();
        assert_eq!(travels, 2);
        assert_eq!(extrusions(&sink).len(), 8);
    }

    #[test]
    fn test_inner_shell_dropped_for_small_square() {
        // 0.9mm square cannot hold an inner shell at 0.45mm lines.
        let spec = spec(0.9, 0.0);
        assert!(!spec.has_inner_shell());

        let mut sink = RecordingSink::new();
        emit_pillar(&mut sink, &spec);
        assert_eq!(extrusions(&sink).len(), 4);
    }

    #[test]
    fn test_shrink_tips_borderline_square_to_single_shell() {
        // Exactly 2 * line_width: inner shell only drops once the band
        // marker shrink is applied.
        let without = spec(0.95, 0.0);
        assert!(without.has_inner_shell());
        let with = spec(0.95, BAND_MARKER_SHRINK);
        assert!(!with.has_inner_shell());
    }

    #[test]
    fn test_outer_shell_geometry() {
        let spec = spec(4.0, 0.0);
        let mut sink = RecordingSink::new();
        let end = emit_pillar(&mut sink, &spec);

        // Outer shell corners, in order, inset by line_width.
        let ex = extrusions(&sink);
        let s = spec.line_width;
        let (ox, oy, sz) = (spec.origin.x, spec.origin.y, spec.square_size);
        let expected = [
            Point::new(ox + sz - s, oy + s),
            Point::new(ox + sz - s, oy + sz - s),
            Point::new(ox + s, oy + sz - s),
            Point::new(ox + s, oy + s),
        ];
        assert_eq!(&ex[4..]
            .iter()
            .map(|(p, _)| *p)
            .collect::<Vec<_>>(), &expected);

        // The loop closes at its starting corner.
        assert_eq!(end, Point::new(ox + s, oy + s));
    }

    #[test]
    fn test_extrusion_is_proportional_to_distance() {
        let spec = spec(4.0, 0.0);
        let mut sink = RecordingSink::new();
        emit_pillar(&mut sink, &spec);

        // Every outer shell edge has length square_size - 2 * line_width.
        let edge = spec.square_size - 2.0 * spec.line_width;
        for (_, e) in &extrusions(&sink)[4..] {
            assert!((e - edge * spec.e_per_mm).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shrink_insets_both_shells() {
        let plain = spec(4.0, 0.0);
        let marked = spec(4.0, BAND_MARKER_SHRINK);

        let mut a = RecordingSink::new();
        emit_pillar(&mut a, &plain);
        let mut b = RecordingSink::new();
        emit_pillar(&mut b, &marked);

        // First inner shell corner moves inwards by the shrink on both axes.
        let first_plain = extrusions(&a)[0].0;
        let first_marked = extrusions(&b)[0].0;
        assert!((first_marked.x - (first_plain.x - BAND_MARKER_SHRINK)).abs() < 1e-12);
        assert!((first_marked.y - (first_plain.y + BAND_MARKER_SHRINK)).abs() < 1e-12);
    }
}
