//! Engine configuration.
//!
//! Every field has a default matching the shipped behavior. `from_env` lets a
//! host tweak them without recompiling: numbers that fail to parse keep their
//! default, while an unknown platform, a non-positive or non-finite size, or
//! inverted zoom limits are rejected.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::str::FromStr;

use crate::consts::{ERASER_RADIUS, ERASER_SAMPLES, MAX_SCALE, MIN_SCALE, STROKE_SIZE, ZOOM_STEP};
use crate::error::ConfigError;
use crate::input::Platform;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Picks Meta (mac) or Ctrl (other) as the shortcut modifier.
    pub platform: Platform,
    /// Scale change per wheel tick or zoom shortcut.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Radius of the eraser probe circle, world units.
    pub eraser_radius: f64,
    /// Points sampled around the eraser circle.
    pub eraser_samples: usize,
    /// Pencil ribbon width.
    pub stroke_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            zoom_step: ZOOM_STEP,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            eraser_radius: ERASER_RADIUS,
            eraser_samples: ERASER_SAMPLES,
            stroke_size: STROKE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Read overrides from `WHITEBOARD_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown `WHITEBOARD_PLATFORM`, for
    /// a zoom limit, zoom step, eraser radius or stroke size that is not a
    /// positive finite number, and when the minimum scale exceeds the maximum.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied variable source.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let platform = match lookup("WHITEBOARD_PLATFORM") {
            Ok(raw) => parse_platform(&raw)?,
            Err(_) => defaults.platform,
        };

        let config = Self {
            platform,
            zoom_step: number(&lookup, "WHITEBOARD_ZOOM_STEP", defaults.zoom_step),
            min_scale: number(&lookup, "WHITEBOARD_MIN_SCALE", defaults.min_scale),
            max_scale: number(&lookup, "WHITEBOARD_MAX_SCALE", defaults.max_scale),
            eraser_radius: number(&lookup, "WHITEBOARD_ERASER_RADIUS", defaults.eraser_radius),
            eraser_samples: number(&lookup, "WHITEBOARD_ERASER_SAMPLES", defaults.eraser_samples),
            stroke_size: number(&lookup, "WHITEBOARD_STROKE_SIZE", defaults.stroke_size),
        };

        for (name, value) in [
            ("WHITEBOARD_ZOOM_STEP", config.zoom_step),
            ("WHITEBOARD_MIN_SCALE", config.min_scale),
            ("WHITEBOARD_MAX_SCALE", config.max_scale),
            ("WHITEBOARD_ERASER_RADIUS", config.eraser_radius),
            ("WHITEBOARD_STROKE_SIZE", config.stroke_size),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::Parse(format!("{name} must be a positive finite number, got {value}")));
            }
        }
        if config.min_scale > config.max_scale {
            return Err(ConfigError::Parse(format!(
                "WHITEBOARD_MIN_SCALE {} exceeds WHITEBOARD_MAX_SCALE {}",
                config.min_scale, config.max_scale
            )));
        }
        Ok(config)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_platform(raw: &str) -> Result<Platform, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mac" | "macos" => Ok(Platform::Mac),
        "other" | "" => Ok(Platform::Other),
        other => Err(ConfigError::Parse(format!("unknown WHITEBOARD_PLATFORM: {other}"))),
    }
}

fn number<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}
