//! Interaction engine: pointer, wheel and keyboard events in, host effects out.
//!
//! DESIGN
//! ======
//! `EngineCore` owns all state (history, camera, tool, gesture, selection)
//! and never touches a rendering backend, so every transition is testable
//! with plain values. `Engine` wraps it together with an optional
//! [`Renderer`] and paints on request.
//!
//! History granularity: creating an element commits once; the rest of the
//! drawing drag overwrites that slot. A move or resize opens a fresh slot on
//! its first pointer-move and overwrites it afterwards. An eraser drag is a
//! single commit however many elements it removes. Panning and zoom never
//! touch history.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::element::{Element, ElementCollection, ElementId, Shape, index_of};
use crate::error::{ContractError, ErrorCode};
use crate::factory;
use crate::geometry::Point;
use crate::hit::{self, HitContext, Position};
use crate::history::History;
use crate::input::{Action, Button, Gesture, Key, Modifiers, Tool, WheelDelta};
use crate::render::{self, Renderer, Scene};
use crate::resize::{self, MoveOffsets};
use crate::stroke::StrokeOptions;
use crate::text::{MonospaceMeasure, TextMeasure};

/// Side effects returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State visible on the canvas changed; paint again.
    RenderNeeded,
    /// CSS cursor name to show over the canvas.
    SetCursor(String),
    /// Show the text overlay for an element.
    BeginTextEdit(TextEditRequest),
    /// Blur the text overlay; the host answers with [`EngineCore::commit_text`].
    EndTextEdit,
    /// The history stack or its cursor changed; the host may persist it.
    HistoryChanged,
}

/// Where and how the host should open its text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditRequest {
    pub id: ElementId,
    /// Screen-space position of the text's top-left anchor.
    pub screen: Point,
    /// Font size after applying the current zoom.
    pub font_size: f64,
    /// Text to seed the overlay with.
    pub text: String,
}

/// Geometry captured when a move or resize starts.
struct DragOrigin {
    original: Element,
    offsets: MoveOffsets,
}

/// Core engine state: all logic that doesn't depend on a rendering backend.
pub struct EngineCore {
    pub camera: Camera,
    history: History,
    tool: Tool,
    gesture: Gesture,
    selected: Option<ElementId>,
    drag: Option<DragOrigin>,
    space_held: bool,
    config: EngineConfig,
    stroke: StrokeOptions,
    measure: Box<dyn TextMeasure>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            camera: Camera::with_limits(config.min_scale, config.max_scale),
            history: History::new(),
            tool: Tool::default(),
            gesture: Gesture::default(),
            selected: None,
            drag: None,
            space_held: false,
            stroke: StrokeOptions { size: config.stroke_size, ..StrokeOptions::default() },
            config,
            measure: Box::new(MonospaceMeasure),
        }
    }

    /// Replace the text measurer (the host's rendering backend knows real glyph widths).
    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    // --- Tool ---

    /// Switch the active tool. Ignored while text is being written.
    pub fn set_tool(&mut self, tool: Tool) {
        if matches!(self.gesture, Gesture::Writing { .. }) {
            debug!(%tool, "tool change ignored while writing");
            return;
        }
        self.tool = tool;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Effect> {
        if button != Button::Primary || matches!(self.gesture, Gesture::Writing { .. }) {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);

        if self.tool == Tool::Hand || self.space_held {
            self.gesture = Gesture::Panning { last_screen: screen };
            return vec![Effect::SetCursor("grabbing".into())];
        }

        debug!(tool = %self.tool, x = world.x, y = world.y, "gesture start");
        match self.tool {
            Tool::Eraser => {
                self.gesture = Gesture::Erasing { committed: false };
                self.erase_at(world)
            }
            Tool::Selection => self.begin_selection(world),
            Tool::Text => self.begin_text(world),
            tool => self.begin_drawing(tool, world),
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Effect> {
        let world = self.camera.screen_to_world(screen);

        match self.gesture.clone() {
            Gesture::Panning { last_screen } => {
                let dx = self.camera.screen_dist_to_world(screen.x - last_screen.x);
                let dy = self.camera.screen_dist_to_world(screen.y - last_screen.y);
                self.camera.pan_by(dx, dy);
                self.gesture = Gesture::Panning { last_screen: screen };
                vec![Effect::RenderNeeded]
            }
            Gesture::Drawing { id } => self.continue_drawing(id, world),
            Gesture::Moving { id, committed } => {
                let Some(drag) = &self.drag else {
                    return Vec::new();
                };
                let moved = drag.offsets.apply(&drag.original, world);
                self.gesture = Gesture::Moving { id, committed: true };
                self.write_gesture(moved, committed)
            }
            Gesture::Resizing { id, corner, committed } => {
                let Some(drag) = &self.drag else {
                    return Vec::new();
                };
                match resize::resize(&drag.original, Position::Corner(corner), world) {
                    Ok(resized) => {
                        self.gesture = Gesture::Resizing { id, corner, committed: true };
                        self.write_gesture(resized, committed)
                    }
                    Err(e) => absorb(&e),
                }
            }
            Gesture::Erasing { .. } => self.erase_at(world),
            Gesture::Writing { .. } => Vec::new(),
            Gesture::Idle | Gesture::Selecting => self.hover_cursor(world),
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Effect> {
        if button != Button::Primary || matches!(self.gesture, Gesture::Writing { .. }) {
            return Vec::new();
        }

        let was_panning = matches!(self.gesture, Gesture::Panning { .. });
        debug!(tool = %self.tool, action = ?self.gesture.action(), "gesture end");

        self.gesture = Gesture::Selecting;
        self.drag = None;
        self.refresh_selection();

        let mut effects = vec![Effect::RenderNeeded];
        if self.tool.is_sticky() {
            if was_panning {
                effects.push(Effect::SetCursor(self.idle_cursor().into()));
            }
        } else {
            self.tool = Tool::Selection;
            effects.push(Effect::SetCursor(self.idle_cursor().into()));
        }
        effects
    }

    /// Re-open a text element for editing: the selected one, or the text under the cursor.
    pub fn on_double_click(&mut self, screen: Point) -> Vec<Effect> {
        if matches!(self.gesture, Gesture::Writing { .. }) {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);

        let target = self
            .selected_element()
            .filter(|e| e.text_data().is_some())
            .or_else(|| {
                factory::element_at_position(self.history.current(), world, &self.hit_context())
                    .and_then(|hit| self.history.current().get(hit.index))
                    .filter(|e| e.text_data().is_some())
            })
            .cloned();
        let Some(mut element) = target else {
            return Vec::new();
        };

        let seed = element.text_data().map(|d| d.text().to_string()).unwrap_or_default();
        if let Some(data) = element.text_data_mut() {
            data.set_text("");
        }

        let id = element.id;
        self.commit_element(element);
        self.selected = Some(id);
        self.tool = Tool::Text;
        self.gesture = Gesture::Writing { id };

        let mut effects = vec![Effect::RenderNeeded, Effect::HistoryChanged];
        effects.extend(self.text_edit_request(id, seed).map(Effect::BeginTextEdit));
        effects
    }

    pub fn on_wheel(&mut self, _screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Effect> {
        if !modifiers.primary(self.config.platform) || delta.dy == 0.0 {
            return Vec::new();
        }
        let step = if delta.dy > 0.0 { -self.config.zoom_step } else { self.config.zoom_step };
        self.zoom_by(step)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Effect> {
        if matches!(self.gesture, Gesture::Writing { .. }) {
            return if key.is("Escape") { vec![Effect::EndTextEdit] } else { Vec::new() };
        }

        if key.is_space() {
            if self.space_held {
                return Vec::new();
            }
            self.space_held = true;
            return vec![Effect::SetCursor("grab".into())];
        }

        if modifiers.primary(self.config.platform) {
            if key.is("z") {
                return self.undo();
            }
            if key.is("y") {
                return self.redo();
            }
            if key.is("+") || key.is("=") {
                return self.zoom_by(self.config.zoom_step);
            }
            if key.is("-") {
                return self.zoom_by(-self.config.zoom_step);
            }
            return Vec::new();
        }

        if key.is("Delete") || key.is("Backspace") {
            return self.delete_selected();
        }
        Vec::new()
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Effect> {
        if !key.is_space() || !self.space_held {
            return Vec::new();
        }
        self.space_held = false;
        if matches!(self.gesture, Gesture::Panning { .. }) {
            self.gesture = Gesture::Selecting;
        }
        vec![Effect::SetCursor(self.idle_cursor().into())]
    }

    // --- Text overlay ---

    /// Commit text reported by the overlay on blur.
    ///
    /// `width` and `height` are the overlay's rendered size in screen pixels.
    pub fn commit_text(&mut self, text: &str, width: f64, height: f64) -> Vec<Effect> {
        let Gesture::Writing { id } = self.gesture else {
            return Vec::new();
        };

        let mut next = self.history.current().to_vec();
        if let Some(element) = next.iter_mut().find(|e| e.id == id) {
            element.x2 = element.x1 + self.camera.screen_dist_to_world(width);
            element.y2 = element.y1 + self.camera.screen_dist_to_world(height);
            if let Some(data) = element.text_data_mut() {
                data.set_text(text);
            }
        }
        self.history.replace_current(next);

        self.tool = Tool::Selection;
        self.gesture = Gesture::Selecting;
        self.refresh_selection();
        vec![Effect::EndTextEdit, Effect::RenderNeeded, Effect::HistoryChanged]
    }

    // --- Commands ---

    /// Step back one snapshot. Ignored while a gesture holds a history slot.
    pub fn undo(&mut self) -> Vec<Effect> {
        if self.gesture_in_progress() || !self.history.undo() {
            return Vec::new();
        }
        self.refresh_selection();
        vec![Effect::RenderNeeded, Effect::HistoryChanged]
    }

    pub fn redo(&mut self) -> Vec<Effect> {
        if self.gesture_in_progress() || !self.history.redo() {
            return Vec::new();
        }
        self.refresh_selection();
        vec![Effect::RenderNeeded, Effect::HistoryChanged]
    }

    /// Remove the selected element in one commit.
    pub fn delete_selected(&mut self) -> Vec<Effect> {
        if self.gesture_in_progress() {
            return Vec::new();
        }
        let Some(id) = self.selected else {
            return Vec::new();
        };
        let mut next = self.history.current().to_vec();
        let Some(index) = index_of(&next, id) else {
            self.selected = None;
            return Vec::new();
        };
        next.remove(index);
        self.history.commit(next);
        self.selected = None;
        vec![Effect::RenderNeeded, Effect::HistoryChanged]
    }

    /// Hard reset to an empty canvas. Pan and zoom are kept.
    pub fn reset_canvas(&mut self) -> Vec<Effect> {
        self.history.reset();
        self.selected = None;
        self.drag = None;
        self.gesture = Gesture::Selecting;
        self.tool = Tool::Selection;
        info!("canvas reset");
        vec![Effect::EndTextEdit, Effect::RenderNeeded, Effect::HistoryChanged]
    }

    /// Replace the whole history, e.g. after loading persisted state.
    pub fn load_history(&mut self, history: History) -> Vec<Effect> {
        info!(len = history.len(), index = history.index(), "history loaded");
        self.history = history;
        self.gesture = Gesture::Selecting;
        self.drag = None;
        self.refresh_selection();
        vec![Effect::RenderNeeded]
    }

    // --- Viewport ---

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Vec<Effect> {
        self.camera.set_canvas_size(width, height);
        vec![Effect::RenderNeeded]
    }

    /// Step the zoom, clamped to the configured limits.
    pub fn zoom_by(&mut self, delta: f64) -> Vec<Effect> {
        self.camera.zoom_by(delta);
        vec![Effect::RenderNeeded]
    }

    pub fn reset_zoom(&mut self) -> Vec<Effect> {
        self.camera.reset_zoom();
        vec![Effect::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.history.current()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Phase of the current gesture, `None` before the first one.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.gesture.action()
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element as it is in the current snapshot.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selected?;
        self.history.current().iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.camera.scale()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view for the paint pass.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        let show_selection =
            matches!(self.gesture.action(), Some(Action::Selecting | Action::Moving | Action::Resizing));
        Scene {
            elements: self.history.current(),
            camera: &self.camera,
            selected: if show_selection { self.selected_element() } else { None },
            measure: self.measure.as_ref(),
            stroke: &self.stroke,
        }
    }

    // --- Gesture helpers ---

    fn hit_context(&self) -> HitContext<'_> {
        HitContext { selected: self.selected, measure: self.measure.as_ref(), stroke: &self.stroke }
    }

    fn begin_selection(&mut self, world: Point) -> Vec<Effect> {
        let hit = factory::element_at_position(self.history.current(), world, &self.hit_context());
        let Some(hit) = hit else {
            self.selected = None;
            self.gesture = Gesture::Selecting;
            return vec![Effect::RenderNeeded];
        };
        let Some(original) = self.history.current().get(hit.index).cloned() else {
            return Vec::new();
        };

        self.selected = Some(hit.id);
        self.drag = Some(DragOrigin { offsets: MoveOffsets::capture(&original, world), original });
        self.gesture = match hit.position {
            Position::Inside => Gesture::Moving { id: hit.id, committed: false },
            Position::Corner(corner) => Gesture::Resizing { id: hit.id, corner, committed: false },
        };
        vec![Effect::SetCursor(hit.position.cursor().into()), Effect::RenderNeeded]
    }

    fn begin_drawing(&mut self, tool: Tool, world: Point) -> Vec<Effect> {
        match factory::create_element(tool, Uuid::new_v4(), world.x, world.y, world.x, world.y, None) {
            Ok(element) => {
                let id = element.id;
                self.append_element(element);
                self.selected = Some(id);
                self.gesture = Gesture::Drawing { id };
                vec![Effect::RenderNeeded, Effect::HistoryChanged]
            }
            Err(e) => absorb(&e),
        }
    }

    fn begin_text(&mut self, world: Point) -> Vec<Effect> {
        match factory::create_element(Tool::Text, Uuid::new_v4(), world.x, world.y, world.x, world.y, Some("")) {
            Ok(element) => {
                let id = element.id;
                self.append_element(element);
                self.selected = Some(id);
                self.gesture = Gesture::Writing { id };
                let mut effects = vec![Effect::RenderNeeded, Effect::HistoryChanged];
                effects.extend(self.text_edit_request(id, String::new()).map(Effect::BeginTextEdit));
                effects
            }
            Err(e) => absorb(&e),
        }
    }

    fn continue_drawing(&mut self, id: ElementId, world: Point) -> Vec<Effect> {
        let mut next = self.history.current().to_vec();
        let Some(element) = next.iter_mut().find(|e| e.id == id) else {
            return Vec::new();
        };
        if matches!(element.shape, Shape::Pencil { .. }) {
            element.push_point(world);
        } else {
            element.x2 = world.x;
            element.y2 = world.y;
        }
        self.history.replace_current(next);
        vec![Effect::RenderNeeded]
    }

    /// Write the in-progress geometry of a move or resize.
    ///
    /// The first write of a gesture opens a new history slot; later writes
    /// overwrite it.
    fn write_gesture(&mut self, updated: Element, committed: bool) -> Vec<Effect> {
        let mut next = self.history.current().to_vec();
        let Some(index) = index_of(&next, updated.id) else {
            return Vec::new();
        };
        next[index] = updated;
        if committed {
            self.history.replace_current(next);
            vec![Effect::RenderNeeded]
        } else {
            self.history.commit(next);
            vec![Effect::RenderNeeded, Effect::HistoryChanged]
        }
    }

    fn append_element(&mut self, element: Element) {
        let mut next = self.history.current().to_vec();
        next.push(element);
        self.history.commit(next);
    }

    /// Commit a new snapshot with `element` replacing its namesake.
    fn commit_element(&mut self, element: Element) {
        let mut next = self.history.current().to_vec();
        if let Some(index) = index_of(&next, element.id) {
            next[index] = element;
            self.history.commit(next);
        }
    }

    /// Delete everything touched by the eraser circle around `world`.
    fn erase_at(&mut self, world: Point) -> Vec<Effect> {
        let Gesture::Erasing { committed } = self.gesture else {
            return Vec::new();
        };

        let hits = self.eraser_hits(world);
        if hits.is_empty() {
            return Vec::new();
        }

        let mut next: ElementCollection = self.history.current().to_vec();
        for &index in hits.iter().rev() {
            next.remove(index);
        }
        debug!(deleted = hits.len(), remaining = next.len(), "eraser batch");

        if committed {
            self.history.replace_current(next);
        } else {
            self.history.commit(next);
            self.gesture = Gesture::Erasing { committed: true };
        }
        self.refresh_selection();
        vec![Effect::RenderNeeded, Effect::HistoryChanged]
    }

    /// Indices of elements hit by any sample on the eraser circle, ascending.
    #[allow(clippy::cast_precision_loss)]
    fn eraser_hits(&self, world: Point) -> BTreeSet<usize> {
        let samples = self.config.eraser_samples.max(1);
        let radius = self.config.eraser_radius;
        let ctx = HitContext { selected: None, measure: self.measure.as_ref(), stroke: &self.stroke };
        let elements = self.history.current();

        (0..samples)
            .map(|i| {
                let angle = TAU * i as f64 / samples as f64;
                world.offset(radius * angle.cos(), radius * angle.sin())
            })
            .flat_map(move |p| {
                elements
                    .iter()
                    .enumerate()
                    .filter(move |(_, e)| hit::position_for_element(p, e, &ctx).is_some())
                    .map(|(i, _)| i)
            })
            .collect()
    }

    fn hover_cursor(&self, world: Point) -> Vec<Effect> {
        if self.tool != Tool::Selection {
            return Vec::new();
        }
        let cursor = factory::element_at_position(self.history.current(), world, &self.hit_context())
            .map_or("default", |hit| hit.position.cursor());
        vec![Effect::SetCursor(cursor.into())]
    }

    fn idle_cursor(&self) -> &'static str {
        if self.tool == Tool::Hand || self.space_held { "grab" } else { "default" }
    }

    fn text_edit_request(&self, id: ElementId, seed: String) -> Option<TextEditRequest> {
        let element = self.history.current().iter().find(|e| e.id == id)?;
        let data = element.text_data()?;
        Some(TextEditRequest {
            id,
            screen: self.camera.world_to_screen(element.start()),
            font_size: data.font_size * self.camera.scale(),
            text: seed,
        })
    }

    /// Whether the pointer (or the text overlay) currently owns the history cursor.
    fn gesture_in_progress(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle | Gesture::Selecting)
    }

    /// Drop the selection if its element is gone from the current snapshot.
    fn refresh_selection(&mut self) {
        if self.selected_element().is_none() {
            self.selected = None;
        }
    }
}

/// Log a contract error raised inside an input handler and produce no effects.
fn absorb(error: &ContractError) -> Vec<Effect> {
    warn!(code = error.error_code(), %error, "contract error absorbed");
    Vec::new()
}

/// The full engine: [`EngineCore`] plus the renderer it paints through.
pub struct Engine<R: Renderer> {
    renderer: Option<R>,
    pub core: EngineCore,
}

impl<R: Renderer> Engine<R> {
    /// An engine with no renderer attached yet.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { renderer: None, core: EngineCore::new(config) }
    }

    #[must_use]
    pub fn with_renderer(renderer: R, config: EngineConfig) -> Self {
        Self { renderer: Some(renderer), core: EngineCore::new(config) }
    }

    pub fn attach_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    // --- Delegated inputs ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_pointer_down(screen, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_pointer_move(screen, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_pointer_up(screen, button, modifiers)
    }

    pub fn on_double_click(&mut self, screen: Point) -> Vec<Effect> {
        self.core.on_double_click(screen)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_wheel(screen, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Effect> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn commit_text(&mut self, text: &str, width: f64, height: f64) -> Vec<Effect> {
        self.core.commit_text(text, width, height)
    }

    // --- Render ---

    /// Paint the current state. Returns `false` (and paints nothing) when no
    /// renderer is attached; the next state change will try again.
    pub fn render(&mut self) -> bool {
        let Some(renderer) = self.renderer.as_mut() else {
            warn!("render skipped: no renderer attached");
            return false;
        };
        render::draw(renderer, &self.core.scene());
        true
    }
}
