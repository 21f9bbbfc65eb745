//! Hit-testing engine: where, if anywhere, a world-space point touches an element.
//!
//! Closed shapes hit on their stroke, not their area; once selected, their
//! expanded bounding box also counts so the body can be grabbed. Segments use
//! the triangle-equality test, arrows additionally hit inside the head.
//! Pencil strokes hit inside their outlined ribbon, and text hits anywhere in
//! its measured box plus the selection offset.
//!
//! Resize handles are only reported for the element that is already selected.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::f64::consts::TAU;
use std::fmt;

use crate::consts::{
    ARROW_TOLERANCE, ELLIPSE_SEGMENTS, HANDLE_THRESHOLD, LINE_TOLERANCE, SELECTION_OFFSET, STROKE_TOLERANCE,
};
use crate::element::{Element, ElementId, Shape};
use crate::geometry::{Bounds, Point, distance_to_outline, on_segment, point_in_triangle};
use crate::stroke::{self, StrokeOptions};
use crate::text::TextMeasure;

/// A resize handle at one corner of the selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Inside,
    Corner(Corner),
}

impl Position {
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Inside => "move",
            Self::Corner(c) => c.cursor(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inside => f.write_str("inside"),
            Self::Corner(c) => c.fmt(f),
        }
    }
}

/// Result of a hit test against a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the element in the collection it was found in.
    pub index: usize,
    pub id: ElementId,
    pub position: Position,
}

/// Everything a hit test needs besides the point and the element.
#[derive(Clone, Copy)]
pub struct HitContext<'a> {
    /// Id of the currently selected element, if any.
    pub selected: Option<ElementId>,
    pub measure: &'a dyn TextMeasure,
    pub stroke: &'a StrokeOptions,
}

/// Test where `p` touches `element`, if at all.
#[must_use]
pub fn position_for_element(p: Point, element: &Element, ctx: &HitContext<'_>) -> Option<Position> {
    let is_selected = ctx.selected == Some(element.id);

    if is_selected {
        if let Some(corner) = corner_at(p, element, ctx.measure) {
            return Some(Position::Corner(corner));
        }
    }

    let inside = match &element.shape {
        Shape::Rectangle | Shape::Ellipse | Shape::Diamond => {
            distance_to_outline(p, &outline(element)) <= STROKE_TOLERANCE
                || (is_selected && element.bounds().expand(SELECTION_OFFSET).contains_strict(p))
        }
        Shape::Line => on_segment(p, element.start(), element.end(), LINE_TOLERANCE),
        Shape::Arrow => {
            on_segment(p, element.start(), element.end(), ARROW_TOLERANCE)
                || element.head_points().is_some_and(|[a, b, c]| point_in_triangle(p, a, b, c))
        }
        Shape::Pencil { points } => stroke::contains(points, ctx.stroke, p),
        Shape::Text(_) => element.measured_bounds(ctx.measure).expand(SELECTION_OFFSET).contains_strict(p),
    };

    inside.then_some(Position::Inside)
}

/// The resize handle of `element` under `p`, if any.
///
/// Text has a single bottom-right handle; every other kind has one handle at
/// each corner of its selection box.
#[must_use]
pub fn corner_at(p: Point, element: &Element, measure: &dyn TextMeasure) -> Option<Corner> {
    let near = |h: Point| (p.x - h.x).abs() < HANDLE_THRESHOLD && (p.y - h.y).abs() < HANDLE_THRESHOLD;

    if matches!(element.shape, Shape::Text(_)) {
        let handle = text_handle(element, measure);
        return near(handle).then_some(Corner::BottomRight);
    }

    let handles = selection_box(element, measure).corners();
    Corner::ALL.into_iter().zip(handles).find(|(_, h)| near(*h)).map(|(c, _)| c)
}

/// The selection box of an element: its bounds grown by the selection offset.
#[must_use]
pub fn selection_box(element: &Element, measure: &dyn TextMeasure) -> Bounds {
    element.measured_bounds(measure).expand(SELECTION_OFFSET)
}

/// Center of the circular resize handle of a text element.
#[must_use]
pub fn text_handle(element: &Element, measure: &dyn TextMeasure) -> Point {
    let b = selection_box(element, measure);
    Point::new(b.max_x, b.max_y)
}

/// Vertices of the stroke path of a closed shape, empty for other kinds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn outline(element: &Element) -> Vec<Point> {
    let b = element.bounds();
    let cx = (b.min_x + b.max_x) / 2.0;
    let cy = (b.min_y + b.max_y) / 2.0;
    match element.shape {
        Shape::Rectangle => vec![
            Point::new(b.min_x, b.min_y),
            Point::new(b.max_x, b.min_y),
            Point::new(b.max_x, b.max_y),
            Point::new(b.min_x, b.max_y),
        ],
        Shape::Diamond => vec![
            Point::new(cx, b.min_y),
            Point::new(b.max_x, cy),
            Point::new(cx, b.max_y),
            Point::new(b.min_x, cy),
        ],
        Shape::Ellipse => {
            let rx = b.width() / 2.0;
            let ry = b.height() / 2.0;
            (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let t = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
                    Point::new(cx + rx * t.cos(), cy + ry * t.sin())
                })
                .collect()
        }
        _ => Vec::new(),
    }
}
