//! Freehand stroke outlining.
//!
//! A pencil stroke is stored as raw pointer samples. To paint it and to
//! hit-test it, the samples are turned into a closed ribbon polygon of
//! constant width with rounded caps at both ends. The ribbon is filled with
//! the non-zero winding rule, so self-overlap at sharp turns stays filled.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use std::f64::consts::{PI, TAU};

use crate::consts::{STROKE_CAP_SEGMENTS, STROKE_SIZE};
use crate::geometry::{Point, point_in_polygon};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
    /// Full width of the ribbon.
    pub size: f64,
    /// Segments per rounded cap (a lone dot uses twice as many).
    pub cap_segments: usize,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self { size: STROKE_SIZE, cap_segments: STROKE_CAP_SEGMENTS }
    }
}

/// Build the closed outline polygon around `points`.
///
/// Consecutive duplicate samples are ignored. A stroke that never moved
/// becomes a circle around its single point; an empty input yields no outline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn outline(points: &[Point], options: &StrokeOptions) -> Vec<Point> {
    let radius = options.size / 2.0;
    let segments = options.cap_segments.max(2);
    let samples = dedup(points);

    match samples.as_slice() {
        [] => Vec::new(),
        [only] => {
            let count = segments * 2;
            (0..count)
                .map(|i| {
                    let angle = TAU * i as f64 / count as f64;
                    only.offset(radius * angle.cos(), radius * angle.sin())
                })
                .collect()
        }
        _ => ribbon(&samples, radius, segments),
    }
}

/// Whether `p` lies inside the filled outline of the stroke through `points`.
#[must_use]
pub fn contains(points: &[Point], options: &StrokeOptions, p: Point) -> bool {
    point_in_polygon(p, &outline(points, options))
}

fn dedup(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|last| last.distance(*p) > f64::EPSILON) {
            out.push(*p);
        }
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn ribbon(samples: &[Point], radius: f64, segments: usize) -> Vec<Point> {
    let last = samples.len() - 1;
    let normals: Vec<(f64, f64)> = (0..samples.len())
        .map(|i| {
            let prev = samples[i.saturating_sub(1)];
            let next = samples[(i + 1).min(last)];
            let (mut dx, mut dy) = (next.x - prev.x, next.y - prev.y);
            // A stroke that doubles back on itself: fall back to the incoming segment.
            if dx.hypot(dy) <= f64::EPSILON {
                dx = samples[i].x - prev.x;
                dy = samples[i].y - prev.y;
            }
            let len = dx.hypot(dy).max(f64::EPSILON);
            (-dy / len, dx / len)
        })
        .collect();

    let left: Vec<Point> = samples
        .iter()
        .zip(&normals)
        .map(|(p, (nx, ny))| p.offset(nx * radius, ny * radius))
        .collect();
    let right: Vec<Point> = samples
        .iter()
        .zip(&normals)
        .map(|(p, (nx, ny))| p.offset(-nx * radius, -ny * radius))
        .collect();

    let step = PI / segments as f64;
    let cap = |center: Point, from_angle: f64| {
        (1..segments).map(move |k| {
            let angle = from_angle - step * k as f64;
            center.offset(radius * angle.cos(), radius * angle.sin())
        })
    };

    let (end_nx, end_ny) = normals[last];
    let (start_nx, start_ny) = normals[0];

    let mut out = Vec::with_capacity(samples.len() * 2 + segments * 2);
    out.extend(left.iter().copied());
    // Sweeps from the left side through the direction of travel to the right side.
    out.extend(cap(samples[last], end_ny.atan2(end_nx)));
    out.extend(right.iter().rev().copied());
    out.extend(cap(samples[0], start_ny.atan2(start_nx) - PI));
    out
}
