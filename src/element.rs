//! Element model: the seven drawable kinds and their canonical geometry.
//!
//! An [`Element`] is a flat value: a stable id, two anchor corners and a
//! [`Shape`] carrying the per-kind data. Anchor semantics depend on the kind:
//! literal corners for rectangles, ellipses and diamonds, endpoints for lines
//! and arrows, and the bounding box for pencil strokes and text. Anchors are
//! not normalized; callers that need `min <= max` go through [`Bounds`].
//!
//! Derived geometry is never stored independently of the fields it comes
//! from: the arrowhead is computed on read, and a text element's `lines` can
//! only change together with its `text`.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_FONT_STYLE,
    DEFAULT_FONT_WEIGHT,
};
use crate::error::ContractError;
use crate::geometry::{Bounds, Point};
use crate::input::Tool;
use crate::text::{self, Font, TextMeasure};

/// Unique identifier for an element. Assigned once at creation, never reused.
pub type ElementId = Uuid;

/// The kind of a drawable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Pencil,
    Text,
}

impl ElementKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Diamond => "DIAMOND",
            Self::Line => "LINE",
            Self::Arrow => "ARROW",
            Self::Pencil => "PENCIL",
            Self::Text => "TEXT",
        }
    }

    /// Whether the kind is drawn as a closed outline.
    #[must_use]
    pub fn is_closed_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Diamond)
    }

    /// Whether the kind is a two-endpoint segment.
    #[must_use]
    pub fn is_segment(self) -> bool {
        matches!(self, Self::Line | Self::Arrow)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECTANGLE" => Ok(Self::Rectangle),
            "ELLIPSE" => Ok(Self::Ellipse),
            "DIAMOND" => Ok(Self::Diamond),
            "LINE" => Ok(Self::Line),
            "ARROW" => Ok(Self::Arrow),
            "PENCIL" => Ok(Self::Pencil),
            "TEXT" => Ok(Self::Text),
            other => Err(ContractError::UnsupportedKind(other.to_string())),
        }
    }
}

impl TryFrom<Tool> for ElementKind {
    type Error = ContractError;

    fn try_from(tool: Tool) -> Result<Self, Self::Error> {
        match tool {
            Tool::Rectangle => Ok(Self::Rectangle),
            Tool::Ellipse => Ok(Self::Ellipse),
            Tool::Diamond => Ok(Self::Diamond),
            Tool::Line => Ok(Self::Line),
            Tool::Arrow => Ok(Self::Arrow),
            Tool::Pencil => Ok(Self::Pencil),
            Tool::Text => Ok(Self::Text),
            Tool::Selection | Tool::Eraser | Tool::Hand => Err(ContractError::UnsupportedKind(tool.to_string())),
        }
    }
}

impl From<ElementKind> for Tool {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle => Self::Rectangle,
            ElementKind::Ellipse => Self::Ellipse,
            ElementKind::Diamond => Self::Diamond,
            ElementKind::Line => Self::Line,
            ElementKind::Arrow => Self::Arrow,
            ElementKind::Pencil => Self::Pencil,
            ElementKind::Text => Self::Text,
        }
    }
}

/// Text content and font of a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    text: String,
    lines: Vec<String>,
    pub font_size: f64,
    pub font_family: String,
    pub font_style: String,
    pub font_weight: String,
}

impl TextData {
    /// Text with default font settings.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lines: split_lines(text),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_style: DEFAULT_FONT_STYLE.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text split on `\n`; always at least one (possibly empty) line.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the text, re-splitting it into lines.
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.lines = split_lines(text);
    }

    #[must_use]
    pub fn font(&self) -> Font<'_> {
        Font { size: self.font_size, family: &self.font_family, style: &self.font_style, weight: &self.font_weight }
    }

    /// Width of the widest line and height of the whole block.
    #[must_use]
    pub fn measure(&self, measure: &dyn TextMeasure) -> (f64, f64) {
        text::block_size(&self.lines, &self.font(), measure)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Per-kind data of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    /// Freehand stroke samples, in drawing order. Never empty.
    Pencil { points: Vec<Point> },
    Text(TextData),
}

/// A single drawable shape instance with stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub shape: Shape,
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self.shape {
            Shape::Rectangle => ElementKind::Rectangle,
            Shape::Ellipse => ElementKind::Ellipse,
            Shape::Diamond => ElementKind::Diamond,
            Shape::Line => ElementKind::Line,
            Shape::Arrow => ElementKind::Arrow,
            Shape::Pencil { .. } => ElementKind::Pencil,
            Shape::Text(_) => ElementKind::Text,
        }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Stroke samples for a pencil element, `None` for every other kind.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match &self.shape {
            Shape::Pencil { points } => Some(points),
            _ => None,
        }
    }

    #[must_use]
    pub fn text_data(&self) -> Option<&TextData> {
        match &self.shape {
            Shape::Text(data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.shape {
            Shape::Text(data) => Some(data),
            _ => None,
        }
    }

    /// Replace a pencil stroke's samples and refit `x1..y2` to their bounds.
    ///
    /// Ignored for other kinds and for an empty sample list.
    pub fn set_points(&mut self, new_points: Vec<Point>) {
        let Shape::Pencil { points } = &mut self.shape else {
            return;
        };
        let Some(b) = Bounds::of_points(&new_points) else {
            return;
        };
        *points = new_points;
        self.x1 = b.min_x;
        self.y1 = b.min_y;
        self.x2 = b.max_x;
        self.y2 = b.max_y;
    }

    /// Append a sample to a pencil stroke.
    pub fn push_point(&mut self, p: Point) {
        if let Some(points) = self.points() {
            let mut next = points.to_vec();
            next.push(p);
            self.set_points(next);
        }
    }

    /// Normalized geometric bounds, excluding text (which needs measuring).
    ///
    /// Pencil bounds come from the point cloud; everything else from the anchors.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match &self.shape {
            Shape::Pencil { points } => {
                Bounds::of_points(points).unwrap_or_else(|| Bounds::from_corners(self.x1, self.y1, self.x2, self.y2))
            }
            _ => Bounds::from_corners(self.x1, self.y1, self.x2, self.y2),
        }
    }

    /// Bounds including measured text extent for text elements.
    #[must_use]
    pub fn measured_bounds(&self, measure: &dyn TextMeasure) -> Bounds {
        match &self.shape {
            Shape::Text(data) => {
                let (w, h) = data.measure(measure);
                Bounds { min_x: self.x1, min_y: self.y1, max_x: self.x1 + w, max_y: self.y1 + h }
            }
            _ => self.bounds(),
        }
    }

    /// The three arrowhead vertices (tip first) for an arrow, `None` otherwise.
    #[must_use]
    pub fn head_points(&self) -> Option<[Point; 3]> {
        matches!(self.shape, Shape::Arrow).then(|| arrow_head(self.start(), self.end()))
    }

    /// Translate every coordinate of the element.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
        if let Shape::Pencil { points } = &mut self.shape {
            for p in points.iter_mut() {
                *p = p.offset(dx, dy);
            }
        }
    }
}

/// Arrowhead triangle for a shaft from `from` to `tip`.
#[must_use]
pub fn arrow_head(from: Point, tip: Point) -> [Point; 3] {
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let left = Point::new(
        tip.x - ARROW_HEAD_LENGTH * (angle - ARROW_HEAD_ANGLE).cos(),
        tip.y - ARROW_HEAD_LENGTH * (angle - ARROW_HEAD_ANGLE).sin(),
    );
    let right = Point::new(
        tip.x - ARROW_HEAD_LENGTH * (angle + ARROW_HEAD_ANGLE).cos(),
        tip.y - ARROW_HEAD_LENGTH * (angle + ARROW_HEAD_ANGLE).sin(),
    );
    [tip, left, right]
}

/// Ordered element sequence. Insertion order is creation order and paint
/// order; hit-testing returns the first match in this order.
pub type ElementCollection = Vec<Element>;

/// Position of the element with `id` in `elements`.
#[must_use]
pub fn index_of(elements: &[Element], id: ElementId) -> Option<usize> {
    elements.iter().position(|e| e.id == id)
}
