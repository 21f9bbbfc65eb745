//! Pan/zoom camera and coordinate conversions.
//!
//! Elements are always stored in world space. The camera maps pointer
//! positions (screen space) into world space before any hit-test or gesture
//! logic runs, and supplies the transform the paint pass applies before
//! drawing elements.
//!
//! Zoom is centered on the canvas rather than the origin: `scale_offset` is
//! half the difference between the canvas size scaled and unscaled, and is
//! recomputed whenever the scale or the canvas size changes.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::geometry::Point;

/// Camera state for pan/zoom on the canvas.
///
/// `pan_offset` is a world-space translation. `scale` is a uniform zoom
/// factor (1.0 = no zoom), always within `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pan_offset: Point,
    scale: f64,
    scale_offset: Point,
    canvas_width: f64,
    canvas_height: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_limits(MIN_SCALE, MAX_SCALE)
    }
}

impl Camera {
    /// Identity camera clamping zoom to `[min_scale, max_scale]`.
    #[must_use]
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        Self {
            pan_offset: Point::default(),
            scale: 1.0,
            scale_offset: Point::default(),
            canvas_width: 0.0,
            canvas_height: 0.0,
            min_scale,
            max_scale,
        }
    }

    #[must_use]
    pub fn pan_offset(&self) -> Point {
        self.pan_offset
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn scale_offset(&self) -> Point {
        self.scale_offset
    }

    /// Replace the pan offset.
    pub fn set_pan_offset(&mut self, pan: Point) {
        self.pan_offset = pan;
    }

    /// Translate the pan offset by a world-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_offset = self.pan_offset.offset(dx, dy);
    }

    /// Set the zoom factor, clamped to the configured limits.
    pub fn set_scale(&mut self, scale: f64) {
        // max/min rather than clamp: clamp panics on inverted or NaN limits.
        self.scale = scale.max(self.min_scale).min(self.max_scale);
        self.update_scale_offset();
    }

    /// Step the zoom factor by `delta`, clamped to the configured limits.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_scale(self.scale + delta);
    }

    /// Return to 100% zoom without touching the pan offset.
    pub fn reset_zoom(&mut self) {
        self.set_scale(1.0);
    }

    /// Update the physical canvas size (CSS pixels).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.update_scale_offset();
    }

    fn update_scale_offset(&mut self) {
        self.scale_offset = Point::new(
            (self.canvas_width * self.scale - self.canvas_width) / 2.0,
            (self.canvas_height * self.scale - self.canvas_height) / 2.0,
        );
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_offset.x * self.scale + self.scale_offset.x) / self.scale,
            y: (screen.y - self.pan_offset.y * self.scale + self.scale_offset.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.pan_offset.x * self.scale - self.scale_offset.x,
            y: world.y * self.scale + self.pan_offset.y * self.scale - self.scale_offset.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Translation applied before scaling in the paint pass:
    /// `pan_offset * scale - scale_offset`.
    #[must_use]
    pub fn paint_translation(&self) -> Point {
        Point::new(
            self.pan_offset.x * self.scale - self.scale_offset.x,
            self.pan_offset.y * self.scale - self.scale_offset.y,
        )
    }
}
