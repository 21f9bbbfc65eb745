//! Element factory: construction, drawing and collection hit-testing.
//!
//! Every kind is built, painted and probed through the same three entry
//! points so the engine never branches on kind for these concerns.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::consts::{CONTROL_POINT_SIZE, PENCIL_SELECTION_DASH, SELECTION_DASH};
use crate::element::{Element, ElementId, ElementKind, Shape, TextData};
use crate::error::ContractError;
use crate::geometry::Point;
use crate::hit::{self, Hit, HitContext};
use crate::input::Tool;
use crate::render::{Renderer, ShapeDescriptor};
use crate::stroke::{self, StrokeOptions};
use crate::text::TextMeasure;

/// Build a new element of the kind `tool` draws.
///
/// Pencil strokes are seeded with `(x1, y1)` as their first sample. Text
/// starts with `text` (empty when `None`) and the default font.
///
/// # Errors
///
/// Returns [`ContractError::UnsupportedKind`] for tools that do not create
/// elements (selection, eraser, hand).
#[allow(clippy::many_single_char_names)]
pub fn create_element(
    tool: Tool,
    id: ElementId,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    text: Option<&str>,
) -> Result<Element, ContractError> {
    let shape = match ElementKind::try_from(tool)? {
        ElementKind::Rectangle => Shape::Rectangle,
        ElementKind::Ellipse => Shape::Ellipse,
        ElementKind::Diamond => Shape::Diamond,
        ElementKind::Line => Shape::Line,
        ElementKind::Arrow => Shape::Arrow,
        ElementKind::Pencil => Shape::Pencil { points: vec![Point::new(x1, y1)] },
        ElementKind::Text => Shape::Text(TextData::new(text.unwrap_or_default())),
    };
    Ok(Element { id, x1, y1, x2, y2, shape })
}

/// Rough-style shape descriptors for an element, empty for pencil and text.
#[must_use]
pub fn descriptors(element: &Element) -> Vec<ShapeDescriptor> {
    let (x1, y1, x2, y2) = (element.x1, element.y1, element.x2, element.y2);
    match element.shape {
        Shape::Rectangle => vec![ShapeDescriptor::Rectangle { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }],
        Shape::Ellipse => vec![ShapeDescriptor::Ellipse {
            cx: (x1 + x2) / 2.0,
            cy: (y1 + y2) / 2.0,
            width: x2 - x1,
            height: y2 - y1,
        }],
        Shape::Diamond => vec![ShapeDescriptor::Polygon { points: hit::outline(element) }],
        Shape::Line => vec![ShapeDescriptor::Line { from: element.start(), to: element.end() }],
        Shape::Arrow => {
            let mut out = vec![ShapeDescriptor::Line { from: element.start(), to: element.end() }];
            if let Some(head) = element.head_points() {
                out.push(ShapeDescriptor::Polygon { points: head.to_vec() });
            }
            out
        }
        Shape::Pencil { .. } | Shape::Text(_) => Vec::new(),
    }
}

/// Paint one element.
pub fn draw(element: &Element, renderer: &mut dyn Renderer, stroke_options: &StrokeOptions) {
    match &element.shape {
        Shape::Pencil { points } => renderer.fill_path(&stroke::outline(points, stroke_options)),
        Shape::Text(data) => {
            let font = data.font();
            let mut offset = 0.0;
            for line in data.lines() {
                renderer.fill_text(line, element.x1, element.y1 + offset + data.font_size, &font);
                offset += data.font_size;
            }
        }
        _ => {
            for shape in descriptors(element) {
                renderer.draw_shape(&shape);
            }
        }
    }
}

/// Paint the selection box and resize handles of `element`.
///
/// Does nothing unless `is_selected`. Text gets a single bottom-right
/// handle; pencil strokes use a finer dash.
pub fn draw_selection_box(element: &Element, is_selected: bool, renderer: &mut dyn Renderer, measure: &dyn TextMeasure) {
    if !is_selected {
        return;
    }

    let bounds = hit::selection_box(element, measure);
    let radius = CONTROL_POINT_SIZE / 2.0;

    match element.shape {
        Shape::Text(_) => {
            renderer.stroke_rect(bounds, &SELECTION_DASH);
            renderer.control_point(hit::text_handle(element, measure), radius);
        }
        Shape::Pencil { .. } => {
            renderer.stroke_rect(bounds, &PENCIL_SELECTION_DASH);
            for corner in bounds.corners() {
                renderer.control_point(corner, radius);
            }
        }
        _ => {
            renderer.stroke_rect(bounds, &[]);
            for corner in bounds.corners() {
                renderer.control_point(corner, radius);
            }
        }
    }
}

/// First element in collection order that `point` touches.
#[must_use]
pub fn element_at_position(elements: &[Element], point: Point, ctx: &HitContext<'_>) -> Option<Hit> {
    elements.iter().enumerate().find_map(|(index, element)| {
        hit::position_for_element(point, element, ctx).map(|position| Hit { index, id: element.id, position })
    })
}
