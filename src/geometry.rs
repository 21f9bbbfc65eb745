//! Geometry primitives shared by the element model, hit-testing and camera.
//!
//! Everything here is a pure function of its inputs. Points are plain `f64`
//! pairs in whichever space the caller works in; the camera module is the
//! only place that converts between screen and world space.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Axis-aligned bounding box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Normalize two arbitrary anchor corners into a bounding box.
    #[must_use]
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { min_x: x1.min(x2), min_y: y1.min(y2), max_x: x1.max(x2), max_y: y1.max(y2) }
    }

    /// Bounding box of a point cloud. `None` when `points` is empty.
    #[must_use]
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(points.iter().skip(1).fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Grow the box by `amount` on every side.
    #[must_use]
    pub fn expand(self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Strict interior containment; points on the border are outside.
    #[must_use]
    pub fn contains_strict(self, p: Point) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }

    /// Corners in handle order: top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
        ]
    }
}

/// Shortest distance from `p` to the segment `a`–`b`.
///
/// A zero-length segment degenerates to the distance to `a`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Whether `p` lies on the segment `a`–`b` within `tolerance`, using the
/// triangle-equality test `d(p, a) + d(p, b) - d(a, b) <= tolerance`.
#[must_use]
pub fn on_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    let slack = p.distance(a) + p.distance(b) - a.distance(b);
    slack.abs() <= tolerance
}

/// Distance from `p` to the closed polyline through `vertices`.
#[must_use]
pub fn distance_to_outline(p: Point, vertices: &[Point]) -> f64 {
    match vertices {
        [] => f64::INFINITY,
        [only] => p.distance(*only),
        _ => vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(a, b)| distance_to_segment(p, *a, *b))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Point-in-polygon using the non-zero winding rule.
///
/// The polygon is implicitly closed. Fewer than three vertices never contain a point.
#[must_use]
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    for (a, b) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Whether `p` lies inside (or on the edge of) triangle `a`, `b`, `c`.
#[must_use]
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let cross = |o: Point, u: Point, v: Point| (u.x - o.x) * (v.y - o.y) - (u.y - o.y) * (v.x - o.x);
    if cross(a, b, c).abs() <= f64::EPSILON {
        return false;
    }
    let d1 = cross(p, a, b);
    let d2 = cross(p, b, c);
    let d3 = cross(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
