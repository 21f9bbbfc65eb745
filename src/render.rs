//! Rendering: the paint pass and the renderer capability it draws through.
//!
//! The core never rasterizes. It describes each element as rough-style shape
//! descriptors (closed shapes, lines, arrows), a filled outline (freehand
//! strokes) or baseline-anchored text, and hands them to a [`Renderer`]
//! supplied by the host. The paint pass only reads state; running it twice on
//! unchanged state issues the same commands.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Camera;
use crate::element::Element;
use crate::factory;
use crate::geometry::{Bounds, Point};
use crate::stroke::StrokeOptions;
use crate::text::{Font, TextMeasure};

/// Geometry of a rough-style shape, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDescriptor {
    /// Rectangle from its first anchor; width and height may be negative.
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Ellipse inscribed in a box centered at `(cx, cy)`.
    Ellipse { cx: f64, cy: f64, width: f64, height: f64 },
    /// Closed polygon (diamond outline, arrowhead).
    Polygon { points: Vec<Point> },
    Line { from: Point, to: Point },
}

/// Painting capability provided by the host's rendering backend.
pub trait Renderer {
    /// Clear the surface and set the view transform: translate by `translation`, then scale.
    fn begin_frame(&mut self, translation: Point, scale: f64);
    /// Paint a rough-style shape.
    fn draw_shape(&mut self, shape: &ShapeDescriptor);
    /// Fill a closed outline (freehand strokes).
    fn fill_path(&mut self, outline: &[Point]);
    /// Paint one line of text with its baseline at `baseline`.
    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font: &Font<'_>);
    /// Stroke a selection box; an empty `dash` means solid.
    fn stroke_rect(&mut self, bounds: Bounds, dash: &[f64]);
    /// Paint a circular selection handle.
    fn control_point(&mut self, center: Point, radius: f64);
}

/// One call made on a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame { translation: Point, scale: f64 },
    Shape(ShapeDescriptor),
    FillPath(Vec<Point>),
    FillText { text: String, x: f64, baseline: f64, font: String },
    StrokeRect { bounds: Bounds, dash: Vec<f64> },
    ControlPoint { center: Point, radius: f64 },
}

/// Renderer that records the commands of the last frame instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, translation: Point, scale: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::BeginFrame { translation, scale });
    }

    fn draw_shape(&mut self, shape: &ShapeDescriptor) {
        self.commands.push(DrawCommand::Shape(shape.clone()));
    }

    fn fill_path(&mut self, outline: &[Point]) {
        self.commands.push(DrawCommand::FillPath(outline.to_vec()));
    }

    fn fill_text(&mut self, text: &str, x: f64, baseline: f64, font: &Font<'_>) {
        self.commands.push(DrawCommand::FillText { text: text.to_string(), x, baseline, font: font.css() });
    }

    fn stroke_rect(&mut self, bounds: Bounds, dash: &[f64]) {
        self.commands.push(DrawCommand::StrokeRect { bounds, dash: dash.to_vec() });
    }

    fn control_point(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCommand::ControlPoint { center, radius });
    }
}

/// Read-only view of everything the paint pass needs.
pub struct Scene<'a> {
    pub elements: &'a [Element],
    pub camera: &'a Camera,
    /// Element whose selection box is drawn, if any.
    pub selected: Option<&'a Element>,
    pub measure: &'a dyn TextMeasure,
    pub stroke: &'a StrokeOptions,
}

/// Draw the full scene: elements in collection order, then the selection box.
pub fn draw(renderer: &mut dyn Renderer, scene: &Scene<'_>) {
    renderer.begin_frame(scene.camera.paint_translation(), scene.camera.scale());

    for element in scene.elements {
        factory::draw(element, renderer, scene.stroke);
    }

    if let Some(selected) = scene.selected {
        factory::draw_selection_box(selected, true, renderer, scene.measure);
    }
}
