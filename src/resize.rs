//! Move and resize geometry per element kind.
//!
//! Both operations are computed from a snapshot taken when the gesture
//! started, never from the previous pointer-move result, so rounding does not
//! accumulate over a long drag.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::consts::{GEOMETRY_EPSILON, MIN_FONT_SIZE};
use crate::element::{Element, Shape};
use crate::error::ContractError;
use crate::geometry::{Bounds, Point};
use crate::hit::{Corner, Position};

/// Grab offsets recorded on pointer-down for a move gesture.
///
/// Vector shapes and text keep one offset from the cursor to `(x1, y1)`;
/// pencil strokes keep one offset per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOffsets {
    anchor: Point,
    points: Vec<Point>,
}

impl MoveOffsets {
    /// Record the offsets between `grab` and `element`'s geometry.
    #[must_use]
    pub fn capture(element: &Element, grab: Point) -> Self {
        let points = element
            .points()
            .map(|pts| pts.iter().map(|p| Point::new(grab.x - p.x, grab.y - p.y)).collect())
            .unwrap_or_default();
        Self { anchor: Point::new(grab.x - element.x1, grab.y - element.y1), points }
    }

    /// `original` moved so the recorded offsets hold against `cursor`.
    #[must_use]
    pub fn apply(&self, original: &Element, cursor: Point) -> Element {
        let mut moved = original.clone();
        if moved.points().is_some() {
            moved.set_points(self.points.iter().map(|o| Point::new(cursor.x - o.x, cursor.y - o.y)).collect());
        } else {
            let dx = cursor.x - self.anchor.x - original.x1;
            let dy = cursor.y - self.anchor.y - original.y1;
            moved.translate(dx, dy);
        }
        moved
    }
}

/// `original` resized by dragging the handle at `position` to `cursor`.
///
/// # Errors
///
/// Returns [`ContractError::InvalidCorner`] when `position` is not a corner.
pub fn resize(original: &Element, position: Position, cursor: Point) -> Result<Element, ContractError> {
    let Position::Corner(corner) = position else {
        return Err(ContractError::InvalidCorner(position.to_string()));
    };

    let mut out = original.clone();
    match &original.shape {
        Shape::Rectangle | Shape::Ellipse | Shape::Diamond => {
            let b = original.bounds();
            let (x1, y1, x2, y2) = match corner {
                Corner::TopLeft => (cursor.x.min(b.max_x), cursor.y.min(b.max_y), b.max_x, b.max_y),
                Corner::TopRight => (b.min_x, cursor.y.min(b.max_y), cursor.x.max(b.min_x), b.max_y),
                Corner::BottomLeft => (cursor.x.min(b.max_x), b.min_y, b.max_x, cursor.y.max(b.min_y)),
                Corner::BottomRight => (b.min_x, b.min_y, cursor.x.max(b.min_x), cursor.y.max(b.min_y)),
            };
            out.x1 = x1;
            out.y1 = y1;
            out.x2 = x2;
            out.y2 = y2;
        }
        Shape::Line | Shape::Arrow => match corner {
            Corner::TopLeft => {
                out.x1 = cursor.x;
                out.y1 = cursor.y;
            }
            Corner::BottomRight => {
                out.x2 = cursor.x;
                out.y2 = cursor.y;
            }
            Corner::TopRight => {
                out.y1 = cursor.y;
                out.x2 = cursor.x;
            }
            Corner::BottomLeft => {
                out.y2 = cursor.y;
                out.x1 = cursor.x;
            }
        },
        Shape::Pencil { points } => {
            let Some(b) = Bounds::of_points(points) else {
                return Ok(out);
            };
            let (anchor, old) = pencil_anchor(b, corner);
            let sx = axis_scale(cursor.x, anchor.x, old.x);
            let sy = axis_scale(cursor.y, anchor.y, old.y);
            out.set_points(scale_points(points, anchor, sx, sy));
        }
        Shape::Text(data) => {
            let old_width = original.x2 - original.x1;
            let scale = if old_width.abs() > GEOMETRY_EPSILON { (cursor.x - original.x1) / old_width } else { 1.0 };
            let font_size = (data.font_size * scale).max(MIN_FONT_SIZE);
            #[allow(clippy::cast_precision_loss)]
            let height = data.lines().len() as f64 * font_size;
            if let Some(text) = out.text_data_mut() {
                text.font_size = font_size;
            }
            out.x2 = cursor.x;
            out.y2 = original.y1 + height;
        }
    }
    Ok(out)
}

/// Remap every point as `anchor + (point - anchor) * scale`, per axis.
#[must_use]
pub fn scale_points(points: &[Point], anchor: Point, sx: f64, sy: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(anchor.x + (p.x - anchor.x) * sx, anchor.y + (p.y - anchor.y) * sy))
        .collect()
}

/// The fixed anchor (opposite corner) and the dragged corner of a pencil box.
fn pencil_anchor(b: Bounds, corner: Corner) -> (Point, Point) {
    let [tl, tr, bl, br] = b.corners();
    match corner {
        Corner::TopLeft => (br, tl),
        Corner::TopRight => (bl, tr),
        Corner::BottomLeft => (tr, bl),
        Corner::BottomRight => (tl, br),
    }
}

/// `(cursor - anchor) / (old - anchor)`; a collapsed axis keeps scale 1.
fn axis_scale(cursor: f64, anchor: f64, old: f64) -> f64 {
    let span = old - anchor;
    if span.abs() <= GEOMETRY_EPSILON { 1.0 } else { (cursor - anchor) / span }
}
