//! Closed 2D outlines built from line and quadratic segments
//!
//! Outlines live in the XY plane. A [`Shape2D`] pairs an outer outline with
//! reverse-wound holes, ready to be extruded into a solid.

use glassdrift_math::Vec2;
use serde::{Serialize, Deserialize};

/// Points closer than this are merged when flattening
const MERGE_DISTANCE: f32 = 1e-6;

/// One drawing command of an outline, continuing from the previous end point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Straight line to `to`
    Line { to: Vec2 },
    /// Quadratic Bezier with a single control point, ending at `to`
    Quadratic { control: Vec2, to: Vec2 },
}

impl PathSegment {
    #[inline]
    pub fn end(&self) -> Vec2 {
        match *self {
            PathSegment::Line { to } => to,
            PathSegment::Quadratic { to, .. } => to,
        }
    }
}

/// A 2D path made of connected segments
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    start: Vec2,
    segments: Vec<PathSegment>,
    closed: bool,
}

impl Outline {
    /// Begin a new outline at `start` (the pen's "move to")
    pub fn starting_at(start: Vec2) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::Line { to });
        self
    }

    pub fn quadratic_to(&mut self, control: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::Quadratic { control, to });
        self
    }

    /// Close the outline with a line back to the start if it does not already end there
    pub fn close(&mut self) -> &mut Self {
        if self.end_point().distance(self.start) > MERGE_DISTANCE {
            self.segments.push(PathSegment::Line { to: self.start });
        }
        self.closed = true;
        self
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Where the pen currently rests
    pub fn end_point(&self) -> Vec2 {
        self.segments.last().map(PathSegment::end).unwrap_or(self.start)
    }

    /// The same path traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len());
        for (i, segment) in self.segments.iter().enumerate().rev() {
            let from = if i == 0 { self.start } else { self.segments[i - 1].end() };
            segments.push(match *segment {
                PathSegment::Line { .. } => PathSegment::Line { to: from },
                PathSegment::Quadratic { control, .. } => PathSegment::Quadratic { control, to: from },
            });
        }
        Self {
            start: self.end_point(),
            segments,
            closed: self.closed,
        }
    }

    /// Flatten into a point list
    ///
    /// Each quadratic segment is split into `curve_segments` pieces. Consecutive
    /// coincident points are merged, so zero-radius corners contribute one point.
    /// A closed outline ends with a copy of its first point.
    pub fn points(&self, curve_segments: usize) -> Vec<Vec2> {
        let divisions = curve_segments.max(1);
        let mut points = vec![self.start];

        let mut from = self.start;
        for segment in &self.segments {
            match *segment {
                PathSegment::Line { to } => push_distinct(&mut points, to),
                PathSegment::Quadratic { control, to } => {
                    for k in 1..=divisions {
                        let t = k as f32 / divisions as f32;
                        push_distinct(&mut points, quadratic_point(from, control, to, t));
                    }
                }
            }
            from = segment.end();
        }
        points
    }

    /// Shoelace area of the flattened outline (positive = counter-clockwise)
    pub fn signed_area(&self, curve_segments: usize) -> f32 {
        signed_area(&self.points(curve_segments))
    }

    pub fn is_clockwise(&self, curve_segments: usize) -> bool {
        self.signed_area(curve_segments) < 0.0
    }
}

/// Shoelace area of a point ring (positive = counter-clockwise)
///
/// A trailing copy of the first point is harmless.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum();
    twice * 0.5
}

fn push_distinct(points: &mut Vec<Vec2>, p: Vec2) {
    if points.last().map_or(true, |last| last.distance(p) > MERGE_DISTANCE) {
        points.push(p);
    }
}

#[inline]
fn quadratic_point(p0: Vec2, control: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + control * (2.0 * u * t) + p1 * (t * t)
}

/// An outer outline with zero or more holes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape2D {
    pub outline: Outline,
    pub holes: Vec<Outline>,
}

impl Shape2D {
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    pub fn with_hole(mut self, hole: Outline) -> Self {
        self.holes.push(hole);
        self
    }
}

/// Closed outline of a centered equilateral triangle with rounded corners
///
/// Each corner is replaced by a quadratic curve whose control point is the
/// corner itself and whose ends sit `radius` along the two adjacent edges.
/// A zero radius yields the plain triangle.
pub fn rounded_triangle(side_length: f32, radius: f32) -> Outline {
    let height = (3.0_f32.sqrt() / 2.0) * side_length;

    let p1 = Vec2::new(-side_length / 2.0, -height / 3.0);
    let p2 = Vec2::new(0.0, (2.0 * height) / 3.0);
    let p3 = Vec2::new(side_length / 2.0, -height / 3.0);

    let arc = |from: Vec2, corner: Vec2, to: Vec2| {
        (
            corner + (from - corner).normalized() * radius,
            corner + (to - corner).normalized() * radius,
        )
    };

    let (start, end) = arc(p3, p1, p2);
    let mut outline = Outline::starting_at(start);
    outline.quadratic_to(p1, end);

    for (from, corner, to) in [(p1, p2, p3), (p2, p3, p1)] {
        let (start, end) = arc(from, corner, to);
        outline.line_to(start).quadratic_to(corner, end);
    }

    outline.close();
    outline
}

/// Rounded triangular ring: a rounded outer triangle with a sharp inner hole
///
/// Returns `(outer, inner)` where `inner` has already been reverse-wound.
pub fn triangle_ring(outer_side: f32, inner_side: f32, corner_radius: f32) -> (Outline, Outline) {
    let outer = rounded_triangle(outer_side, corner_radius);
    let inner = rounded_triangle(inner_side, 0.0).reversed();
    (outer, inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn test_rounded_triangle_is_closed() {
        let outline = rounded_triangle(3.0, 0.2);
        assert!(outline.is_closed());

        let points = outline.points(12);
        let first = points[0];
        let last = *points.last().unwrap();
        assert!(approx_eq(first, last), "first {:?} != last {:?}", first, last);
    }

    #[test]
    fn test_rounded_triangle_structure() {
        let outline = rounded_triangle(3.0, 0.2);
        // quad, line+quad, line+quad, closing line
        assert_eq!(outline.segments().len(), 6);
        let quads = outline
            .segments()
            .iter()
            .filter(|s| matches!(s, PathSegment::Quadratic { .. }))
            .count();
        assert_eq!(quads, 3);
    }

    #[test]
    fn test_rounded_triangle_start_point() {
        // First corner is bottom-left; the arc starts 0.2 toward the bottom-right corner
        let side = 3.0_f32;
        let h = (3.0_f32.sqrt() / 2.0) * side;
        let outline = rounded_triangle(side, 0.2);
        assert!(approx_eq(outline.start(), Vec2::new(-1.5 + 0.2, -h / 3.0)));
    }

    #[test]
    fn test_rounded_triangle_is_centered() {
        let points = rounded_triangle(3.0, 0.0).points(1);
        // Three distinct corners plus the closing copy
        assert_eq!(points.len(), 4);
        let centroid = (points[0] + points[1] + points[2]) * (1.0 / 3.0);
        assert!(approx_eq(centroid, Vec2::ZERO));
    }

    #[test]
    fn test_corner_points_stay_inside_sharp_triangle() {
        let sharp = rounded_triangle(3.0, 0.0).points(1);
        let rounded = rounded_triangle(3.0, 0.2);
        assert!(rounded.signed_area(12).abs() < signed_area(&sharp).abs());
    }

    #[test]
    fn test_ring_hole_has_reversed_winding() {
        let (outer, inner) = triangle_ring(3.0, 2.6, 0.2);
        let outer_area = outer.signed_area(12);
        let inner_area = inner.signed_area(12);
        assert!(outer_area * inner_area < 0.0, "outer {} inner {}", outer_area, inner_area);
        assert_ne!(outer.is_clockwise(12), inner.is_clockwise(12));
        assert!(inner.is_closed());
    }

    #[test]
    fn test_outer_outline_is_clockwise() {
        // Drawn bottom-left -> top -> bottom-right
        assert!(rounded_triangle(3.0, 0.2).is_clockwise(12));
    }

    #[test]
    fn test_reversed_reverses_points() {
        let outline = rounded_triangle(2.0, 0.3);
        let forward = outline.points(4);
        let mut backward = outline.reversed().points(4);
        backward.reverse();
        assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(&backward) {
            assert!(approx_eq(*a, *b), "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_reversed_twice_is_identity() {
        let outline = rounded_triangle(2.0, 0.3);
        assert_eq!(outline.reversed().reversed(), outline);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let mut outline = Outline::starting_at(Vec2::new(0.0, 0.0));
        outline.quadratic_to(Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        let points = outline.points(2);
        assert_eq!(points.len(), 3);
        assert!(approx_eq(points[1], Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_signed_area_square() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert!((signed_area(&square) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_generator_is_pure() {
        assert_eq!(rounded_triangle(3.0, 0.2), rounded_triangle(3.0, 0.2));
    }
}
