//! Ear-clipping triangulation of a polygon with holes
//!
//! Each hole is bridged into the outer ring at a mutually visible vertex pair,
//! turning the region into a single weakly-simple polygon that is then clipped
//! ear by ear. Sizes here are a few hundred points at most, so the quadratic
//! searches are fine.

use glassdrift_math::Vec2;

/// Turns smaller than this (twice the triangle area) count as straight
const COLLINEAR_EPSILON: f32 = 1e-9;

/// Triangulate an open outer ring with open holes
///
/// The outer ring must be counter-clockwise and every hole clockwise; neither
/// repeats its first point at the end. Returned indices address the outer
/// points followed by each hole's points in order, and every triangle is
/// counter-clockwise.
pub fn triangulate(contour: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<[u32; 3]> {
    if contour.len() < 3 {
        return Vec::new();
    }

    let mut points: Vec<Vec2> = contour.to_vec();
    let mut hole_rings: Vec<Vec<usize>> = Vec::with_capacity(holes.len());
    for hole in holes.iter().filter(|h| h.len() >= 3) {
        let offset = points.len();
        points.extend_from_slice(hole);
        hole_rings.push((offset..offset + hole.len()).collect());
    }

    // Bridge holes right to left so earlier bridges never block later ones
    hole_rings.sort_by(|a, b| rightmost_x(&points, b).total_cmp(&rightmost_x(&points, a)));

    let mut polygon: Vec<usize> = (0..contour.len()).collect();
    for (i, hole) in hole_rings.iter().enumerate() {
        let blocking: Vec<&Vec<usize>> = hole_rings[i..].iter().collect();
        polygon = bridge_hole(&points, polygon, hole, &blocking);
    }

    clip_ears(&points, polygon)
}

fn rightmost_x(points: &[Vec2], ring: &[usize]) -> f32 {
    ring.iter().map(|&i| points[i].x).fold(f32::NEG_INFINITY, f32::max)
}

/// Twice the signed area of triangle (o, a, b); positive for a left turn
#[inline]
fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Splice `hole` into `polygon` through a visible bridge
fn bridge_hole(points: &[Vec2], polygon: Vec<usize>, hole: &[usize], blocking: &[&Vec<usize>]) -> Vec<usize> {
    let (m_slot, &m) = hole
        .iter()
        .enumerate()
        .max_by(|&(_, &a), &(_, &b)| points[a].x.total_cmp(&points[b].x))
        .unwrap_or((0, &hole[0]));
    let mp = points[m];

    let n = polygon.len();
    let mut candidates: Vec<usize> = (0..n).collect();
    candidates.sort_by(|&a, &b| {
        points[polygon[a]].distance(mp).total_cmp(&points[polygon[b]].distance(mp))
    });

    let visible = candidates.iter().copied().find(|&slot| {
        let p = points[polygon[slot]];
        let prev = points[polygon[(slot + n - 1) % n]];
        let next = points[polygon[(slot + 1) % n]];
        locally_inside(prev, p, next, mp)
            && !crosses_ring(points, &polygon, p, mp)
            && blocking.iter().all(|ring| !crosses_ring(points, ring, p, mp))
    });
    let slot = visible.unwrap_or_else(|| {
        log::warn!("no visible bridge for hole vertex {}; using nearest vertex", m);
        candidates[0]
    });

    let mut spliced = Vec::with_capacity(n + hole.len() + 2);
    spliced.extend_from_slice(&polygon[..=slot]);
    spliced.extend(hole[m_slot..].iter().chain(&hole[..m_slot]));
    spliced.push(m);
    spliced.push(polygon[slot]);
    spliced.extend_from_slice(&polygon[slot + 1..]);
    spliced
}

/// Does direction `target - p` point into the interior angle at `p`?
fn locally_inside(prev: Vec2, p: Vec2, next: Vec2, target: Vec2) -> bool {
    let d = target - p;
    let e_next = next - p;
    let e_prev = prev - p;
    if cross(prev, p, next) >= 0.0 {
        e_next.perp_dot(d) >= 0.0 && d.perp_dot(e_prev) >= 0.0
    } else {
        e_prev.perp_dot(d) <= 0.0 || d.perp_dot(e_next) <= 0.0
    }
}

/// Does segment (a, b) properly cross any edge of `ring`?
///
/// Edges sharing an endpoint position with the segment are ignored.
fn crosses_ring(points: &[Vec2], ring: &[usize], a: Vec2, b: Vec2) -> bool {
    let n = ring.len();
    (0..n).any(|i| {
        let c = points[ring[i]];
        let d = points[ring[(i + 1) % n]];
        if c == a || c == b || d == a || d == b {
            return false;
        }
        segments_cross(a, b, c, d)
    })
}

fn segments_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = cross(a, b, c);
    let d2 = cross(a, b, d);
    let d3 = cross(c, d, a);
    let d4 = cross(c, d, b);
    (d1 > 0.0) != (d2 > 0.0) && (d3 > 0.0) != (d4 > 0.0) && d1 != 0.0 && d2 != 0.0
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

fn is_ear(points: &[Vec2], polygon: &[usize], slot: usize) -> bool {
    let n = polygon.len();
    let a = points[polygon[(slot + n - 1) % n]];
    let b = points[polygon[slot]];
    let c = points[polygon[(slot + 1) % n]];
    if cross(a, b, c) <= COLLINEAR_EPSILON {
        return false;
    }
    polygon.iter().all(|&i| {
        let p = points[i];
        p == a || p == b || p == c || !point_in_triangle(p, a, b, c)
    })
}

fn clip_ears(points: &[Vec2], mut polygon: Vec<usize>) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(polygon.len().saturating_sub(2));

    while polygon.len() > 3 {
        let n = polygon.len();
        let corner = |slot: usize| {
            (
                polygon[(slot + n - 1) % n],
                polygon[slot],
                polygon[(slot + 1) % n],
            )
        };

        // Straight-through and zero-area spike vertices add no area
        if let Some(slot) = (0..n).find(|&s| {
            let (a, b, c) = corner(s);
            cross(points[a], points[b], points[c]).abs() <= COLLINEAR_EPSILON
        }) {
            polygon.remove(slot);
            continue;
        }

        let slot = match (0..n).find(|&s| is_ear(points, &polygon, s)) {
            Some(slot) => slot,
            None => {
                // Numerically tangled input: clip the most convex corner to keep going
                log::warn!("ear clipping stalled with {} vertices left", n);
                (0..n)
                    .max_by(|&s, &t| {
                        let (a, b, c) = corner(s);
                        let (d, e, f) = corner(t);
                        cross(points[a], points[b], points[c])
                            .total_cmp(&cross(points[d], points[e], points[f]))
                    })
                    .unwrap_or(0)
            }
        };

        let (a, b, c) = corner(slot);
        triangles.push([a as u32, b as u32, c as u32]);
        polygon.remove(slot);
    }

    if let [a, b, c] = polygon[..] {
        if cross(points[a], points[b], points[c]) > COLLINEAR_EPSILON {
            triangles.push([a as u32, b as u32, c as u32]);
        }
    }

    triangles
}
