// SPDX-License-Identifier: GPL-3.0-only

//! Mask configuration
//!
//! [`MaskConfig`] is the caller-facing description of the mask. Every field is
//! optional and every numeric field is lenient: a missing value, a `NaN`, or a
//! string that does not parse as a number all resolve to the documented
//! default. [`MaskConfig::resolve`] turns it into a fully normalized
//! [`ResolvedConfig`] and is run on every recomputation pass.
//!
//! Field names follow camelCase when read from JSON, so a document such as
//! `{"width": 320, "edgeColor": "#0af", "animatedLineOrientation": "vertical"}`
//! is accepted as-is.

use crate::constants::*;
use crate::errors::{MaskError, MaskResult};
use cosmic::iced::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;
use tracing::warn;

/// A numeric configuration value that tolerates any input
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Number {
    /// Not provided
    #[default]
    Missing,
    /// A number (may still be non-finite)
    Value(f64),
    /// Something that is not a number, kept for diagnostics
    Invalid(String),
}

impl Number {
    /// The finite value, if there is one
    pub fn finite(&self) -> Option<f64> {
        match self {
            Number::Value(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Resolve to `f32`, falling back to `default` for anything non-finite
    ///
    /// Values beyond the `f32` range count as non-finite.
    pub fn resolve(&self, field: &'static str, default: f32) -> f32 {
        match self.finite().map(|v| v as f32) {
            Some(v) if v.is_finite() => v,
            Some(_) => {
                warn!(field, "Number out of range, using default");
                default
            }
            None => {
                self.report(field);
                default
            }
        }
    }

    /// Resolve a millisecond duration; non-positive or unrepresentable values
    /// also fall back
    pub fn resolve_millis(&self, field: &'static str, default_ms: f64) -> Duration {
        let fallback = Duration::from_secs_f64(default_ms / 1000.0);
        match self.finite() {
            Some(v) if v > 0.0 => Duration::try_from_secs_f64(v / 1000.0).unwrap_or_else(|_| {
                warn!(field, value = v, "Duration out of range, using default");
                fallback
            }),
            Some(v) => {
                warn!(field, value = v, "Non-positive duration, using default");
                fallback
            }
            None => {
                self.report(field);
                fallback
            }
        }
    }

    fn report(&self, field: &'static str) {
        match self {
            Number::Missing => {}
            Number::Value(v) => warn!(field, value = %v, "Non-finite number, using default"),
            Number::Invalid(raw) => warn!(field, raw = %raw, "Not a number, using default"),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Value(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Value(value as f64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Value(value as f64)
    }
}

impl From<&str> for Number {
    fn from(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(v) => Number::Value(v),
            Err(_) => Number::Invalid(value.to_string()),
        }
    }
}

impl From<Option<f64>> for Number {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Number::Missing, Number::Value)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.finite() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Number::Missing,
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Number::Invalid(n.to_string()), Number::Value),
            serde_json::Value::String(s) => Number::from(s.as_str()),
            other => Number::Invalid(other.to_string()),
        })
    }
}

/// Sweep axis of the scan-line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOrientation {
    /// Line spans the width and moves down and up
    #[default]
    Horizontal,
    /// Line spans the height and moves right and left
    Vertical,
}

impl<'de> Deserialize<'de> for LineOrientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything other than "vertical" sweeps horizontally
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(s) if s.eq_ignore_ascii_case("vertical") => LineOrientation::Vertical,
            _ => LineOrientation::Horizontal,
        })
    }
}

/// Layout direction used to mirror the corner brackets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        self == LayoutDirection::Rtl
    }
}

impl<'de> Deserialize<'de> for LayoutDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(s) if s.eq_ignore_ascii_case("rtl") => LayoutDirection::Rtl,
            _ => LayoutDirection::Ltr,
        })
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Caller-supplied mask configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskConfig {
    /// Viewfinder width
    pub width: Number,
    /// Viewfinder height
    pub height: Number,
    /// Fallback used when `height` is missing or invalid
    pub default_height: Number,
    /// Bracket leg length along the horizontal axis
    pub edge_width: Number,
    /// Bracket leg length along the vertical axis
    pub edge_height: Number,
    /// Bracket stroke thickness
    pub edge_border_width: Number,
    /// Bracket corner rounding
    pub edge_radius: Number,
    #[serde(deserialize_with = "lenient_string")]
    pub edge_color: Option<String>,
    /// Outer panel fill
    #[serde(deserialize_with = "lenient_string")]
    pub background_color: Option<String>,
    /// Outer panel opacity in [0, 1]; zero falls back to 1
    pub outer_mask_opacity: Number,
    #[serde(deserialize_with = "lenient_string")]
    pub animated_line_color: Option<String>,
    pub animated_line_thickness: Number,
    pub animated_line_orientation: Option<LineOrientation>,
    /// One-way sweep duration in milliseconds
    pub line_animation_duration: Number,
    #[serde(deserialize_with = "lenient_bool")]
    pub show_animated_line: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_active: Option<bool>,
    /// Height of the platform status bar, used for the landscape inset
    pub status_bar_height: Number,
    /// Distance the brackets pulse inwards; zero disables the pulse
    pub edge_pulse_distance: Number,
    /// One-way pulse duration in milliseconds
    pub edge_pulse_duration: Number,
    pub layout_direction: Option<LayoutDirection>,
}

impl MaskConfig {
    /// Load a configuration from a JSON document
    ///
    /// Only a malformed document is an error; individual bad values are
    /// accepted and resolved to their defaults later.
    pub fn from_json(json: &str) -> MaskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn width(mut self, width: impl Into<Number>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Number>) -> Self {
        self.height = height.into();
        self
    }

    pub fn default_height(mut self, height: impl Into<Number>) -> Self {
        self.default_height = height.into();
        self
    }

    pub fn edge_size(mut self, width: impl Into<Number>, height: impl Into<Number>) -> Self {
        self.edge_width = width.into();
        self.edge_height = height.into();
        self
    }

    pub fn edge_border_width(mut self, width: impl Into<Number>) -> Self {
        self.edge_border_width = width.into();
        self
    }

    pub fn edge_radius(mut self, radius: impl Into<Number>) -> Self {
        self.edge_radius = radius.into();
        self
    }

    pub fn edge_color(mut self, color: impl Into<String>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn outer_mask_opacity(mut self, opacity: impl Into<Number>) -> Self {
        self.outer_mask_opacity = opacity.into();
        self
    }

    pub fn animated_line_color(mut self, color: impl Into<String>) -> Self {
        self.animated_line_color = Some(color.into());
        self
    }

    pub fn animated_line_thickness(mut self, thickness: impl Into<Number>) -> Self {
        self.animated_line_thickness = thickness.into();
        self
    }

    pub fn animated_line_orientation(mut self, orientation: LineOrientation) -> Self {
        self.animated_line_orientation = Some(orientation);
        self
    }

    pub fn line_animation_duration(mut self, millis: impl Into<Number>) -> Self {
        self.line_animation_duration = millis.into();
        self
    }

    pub fn show_animated_line(mut self, show: bool) -> Self {
        self.show_animated_line = Some(show);
        self
    }

    pub fn is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    pub fn status_bar_height(mut self, height: impl Into<Number>) -> Self {
        self.status_bar_height = height.into();
        self
    }

    pub fn edge_pulse(mut self, distance: impl Into<Number>, millis: impl Into<Number>) -> Self {
        self.edge_pulse_distance = distance.into();
        self.edge_pulse_duration = millis.into();
        self
    }

    pub fn layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = Some(direction);
        self
    }

    /// Normalize every field, substituting defaults for anything unusable
    pub fn resolve(&self) -> ResolvedConfig {
        let default_height = self
            .default_height
            .resolve("defaultHeight", DEFAULT_HEIGHT);

        let opacity = match self.outer_mask_opacity.finite() {
            Some(v) if v != 0.0 => (v as f32).clamp(0.0, 1.0),
            _ => DEFAULT_OUTER_MASK_OPACITY,
        };

        ResolvedConfig {
            width: self.width.resolve("width", DEFAULT_WIDTH),
            height: self.height.resolve("height", default_height),
            edge_width: self.edge_width.resolve("edgeWidth", DEFAULT_EDGE_WIDTH),
            edge_height: self.edge_height.resolve("edgeHeight", DEFAULT_EDGE_HEIGHT),
            edge_border_width: self
                .edge_border_width
                .resolve("edgeBorderWidth", DEFAULT_EDGE_BORDER_WIDTH),
            edge_radius: self.edge_radius.resolve("edgeRadius", DEFAULT_EDGE_RADIUS),
            edge_color: resolve_color("edgeColor", self.edge_color.as_deref(), Color::WHITE),
            background_color: resolve_color(
                "backgroundColor",
                self.background_color.as_deref(),
                Color::BLACK,
            ),
            outer_mask_opacity: opacity,
            animated_line_color: resolve_color(
                "animatedLineColor",
                self.animated_line_color.as_deref(),
                Color::WHITE,
            ),
            animated_line_thickness: self
                .animated_line_thickness
                .resolve("animatedLineThickness", DEFAULT_LINE_THICKNESS),
            animated_line_orientation: self.animated_line_orientation.unwrap_or_default(),
            line_animation_duration: self
                .line_animation_duration
                .resolve_millis("lineAnimationDuration", DEFAULT_LINE_ANIMATION_DURATION_MS),
            show_animated_line: self.show_animated_line.unwrap_or(true),
            is_active: self.is_active.unwrap_or(true),
            status_bar_height: self
                .status_bar_height
                .resolve("statusBarHeight", DEFAULT_STATUS_BAR_HEIGHT),
            edge_pulse_distance: self
                .edge_pulse_distance
                .resolve("edgePulseDistance", DEFAULT_EDGE_PULSE_DISTANCE),
            edge_pulse_duration: self
                .edge_pulse_duration
                .resolve_millis("edgePulseDuration", DEFAULT_EDGE_PULSE_DURATION_MS),
            layout_direction: self.layout_direction.unwrap_or_default(),
        }
    }
}

/// Fully normalized configuration; every value is usable as-is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub width: f32,
    pub height: f32,
    pub edge_width: f32,
    pub edge_height: f32,
    pub edge_border_width: f32,
    pub edge_radius: f32,
    pub edge_color: Color,
    pub background_color: Color,
    pub outer_mask_opacity: f32,
    pub animated_line_color: Color,
    pub animated_line_thickness: f32,
    pub animated_line_orientation: LineOrientation,
    pub line_animation_duration: Duration,
    pub show_animated_line: bool,
    pub is_active: bool,
    pub status_bar_height: f32,
    pub edge_pulse_distance: f32,
    pub edge_pulse_duration: Duration,
    pub layout_direction: LayoutDirection,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        MaskConfig::default().resolve()
    }
}

impl ResolvedConfig {
    /// Outer panel fill with the mask opacity folded into its alpha
    pub fn panel_color(&self) -> Color {
        Color {
            a: self.background_color.a * self.outer_mask_opacity,
            ..self.background_color
        }
    }
}

fn resolve_color(field: &'static str, value: Option<&str>, default: Color) -> Color {
    let Some(value) = value else {
        return default;
    };
    parse_color(value).unwrap_or_else(|e| {
        warn!(field, error = %e, "Unusable color, using default");
        default
    })
}

/// Parse a CSS-style color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, or a basic name
pub fn parse_color(value: &str) -> MaskResult<Color> {
    let trimmed = value.trim();
    let invalid = || MaskError::InvalidColor(value.to_string());

    match trimmed.to_ascii_lowercase().as_str() {
        "white" => return Ok(Color::WHITE),
        "black" => return Ok(Color::BLACK),
        "transparent" => return Ok(Color::TRANSPARENT),
        "red" => return Ok(Color::from_rgb(1.0, 0.0, 0.0)),
        "green" => return Ok(Color::from_rgb(0.0, 128.0 / 255.0, 0.0)),
        "blue" => return Ok(Color::from_rgb(0.0, 0.0, 1.0)),
        _ => {}
    }

    let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let short = |i: usize| -> MaskResult<u8> {
        let v = channel(&hex[i..i + 1])?;
        Ok(v * 17)
    };

    let (r, g, b, a) = match hex.len() {
        3 => (short(0)?, short(1)?, short(2)?, 255),
        4 => (short(0)?, short(1)?, short(2)?, short(3)?),
        6 => (
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ),
        8 => (
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ),
        _ => return Err(invalid()),
    };

    Ok(Color::from_rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ))
}
