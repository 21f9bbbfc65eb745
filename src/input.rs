//! Input model: tools, gesture phases, modifier keys, and the gesture state.
//!
//! `Tool` is the user's selected creation/edit mode and `Action` is the phase
//! of the gesture in progress; the two are independent axes. The engine never
//! stores `Action` directly: it keeps a [`Gesture`] whose variants carry the
//! context each phase needs, and derives `Action` from it. A gesture variant
//! can only be entered from the tool that owns it, which keeps combinations
//! such as writing with the eraser unreachable.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use crate::element::ElementId;
use crate::geometry::Point;
use crate::hit::Corner;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Selection,
    Rectangle,
    Diamond,
    Ellipse,
    Arrow,
    Line,
    /// Freehand drawing.
    Pencil,
    Text,
    /// Deletes every element the cursor passes over while pressed.
    Eraser,
    /// Drag to pan the canvas.
    Hand,
}

impl Tool {
    /// Whether pointer-down with this tool drags out a new shape.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Rectangle | Self::Diamond | Self::Ellipse | Self::Arrow | Self::Line | Self::Pencil)
    }

    /// Whether the tool stays active after pointer-up instead of reverting to selection.
    #[must_use]
    pub fn is_sticky(self) -> bool {
        matches!(self, Self::Eraser | Self::Hand)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selection => "SELECTION",
            Self::Rectangle => "RECTANGLE",
            Self::Diamond => "DIAMOND",
            Self::Ellipse => "ELLIPSE",
            Self::Arrow => "ARROW",
            Self::Line => "LINE",
            Self::Pencil => "PENCIL",
            Self::Text => "TEXT",
            Self::Eraser => "ERASER",
            Self::Hand => "HAND",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the interaction gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Panning,
    Selecting,
    Drawing,
    Resizing,
    Moving,
    Writing,
    Erasing,
}

/// Platform family; decides which key acts as the primary shortcut modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Meta (Command) is the primary modifier.
    Mac,
    /// Ctrl is the primary modifier.
    #[default]
    Other,
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the platform's primary shortcut modifier is held.
    #[must_use]
    pub fn primary(self, platform: Platform) -> bool {
        match platform {
            Platform::Mac => self.meta,
            Platform::Other => self.ctrl,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, holding the key name as reported by the host (e.g. `"Escape"`, `"z"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive = scroll down.
    pub dy: f64,
}

/// The active gesture between pointer-down and pointer-up.
///
/// Each variant carries the context needed to compute geometry on
/// pointer-move and to finalize on pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No gesture has happened yet.
    #[default]
    Idle,
    /// Waiting for the next pointer-down after a finished gesture.
    Selecting,
    /// Dragging the view.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Dragging out a newly created element.
    Drawing { id: ElementId },
    /// Dragging an existing element.
    Moving {
        id: ElementId,
        /// Whether this gesture has opened its history slot yet.
        committed: bool,
    },
    /// Dragging a resize handle of the selected element.
    Resizing { id: ElementId, corner: Corner, committed: bool },
    /// The external text overlay is capturing text for this element.
    Writing { id: ElementId },
    /// Eraser held down.
    Erasing { committed: bool },
}

impl Gesture {
    /// The gesture phase, `None` when idle.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Idle => None,
            Self::Selecting => Some(Action::Selecting),
            Self::Panning { .. } => Some(Action::Panning),
            Self::Drawing { .. } => Some(Action::Drawing),
            Self::Moving { .. } => Some(Action::Moving),
            Self::Resizing { .. } => Some(Action::Resizing),
            Self::Writing { .. } => Some(Action::Writing),
            Self::Erasing { .. } => Some(Action::Erasing),
        }
    }
}
