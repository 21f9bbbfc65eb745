//! Core of an interactive whiteboard: element model, hit-testing, pan/zoom,
//! the pointer/keyboard state machine and undo history.
//!
//! The crate has no rendering backend and no event loop. A host UI shell
//! feeds raw input events into [`engine::Engine`], applies the returned
//! [`engine::Effect`]s (repaint, cursor changes, text overlay), and supplies
//! a [`render::Renderer`] that turns shape descriptors into pixels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`element`] | Element kinds, anchors and derived geometry |
//! | [`factory`] | Element construction, drawing and collection hit-testing |
//! | [`hit`] | Per-kind hit-testing and resize handles |
//! | [`resize`] | Move and resize geometry |
//! | [`history`] | Branch-truncating undo/redo stack |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Tools, gesture state and input event types |
//! | [`render`] | Renderer capability and the paint pass |
//! | [`stroke`] | Freehand stroke outlining |
//! | [`text`] | Text measurement capability |
//! | [`geometry`] | Points, bounds and distance tests |
//! | [`persist`] | Serialized history layout |
//! | [`config`] | Engine configuration and environment overrides |
//! | [`error`] | Error types and stable error codes |
//! | [`consts`] | Shared numeric constants (offsets, tolerances, zoom limits) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod hit;
pub mod history;
pub mod input;
pub mod persist;
pub mod render;
pub mod resize;
pub mod stroke;
pub mod text;
