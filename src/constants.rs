// SPDX-License-Identifier: GPL-3.0-only

//! Mask defaults and tuning constants

use std::time::Duration;

/// Fixed inset between the viewfinder edge and its inner content (scan-line, brackets)
pub const MASK_PADDING: f32 = 8.0;

/// Default viewfinder width
pub const DEFAULT_WIDTH: f32 = 280.0;

/// Default viewfinder height
pub const DEFAULT_HEIGHT: f32 = 300.0;

/// Viewfinder height used by the compact revision of the mask
///
/// Pass this as `default_height` to get the shorter viewfinder.
pub const COMPACT_DEFAULT_HEIGHT: f32 = 230.0;

/// Default bracket leg length along the horizontal axis
pub const DEFAULT_EDGE_WIDTH: f32 = 25.0;

/// Default bracket leg length along the vertical axis
pub const DEFAULT_EDGE_HEIGHT: f32 = 25.0;

/// Default bracket stroke thickness
pub const DEFAULT_EDGE_BORDER_WIDTH: f32 = 4.0;

/// Default bracket corner rounding
pub const DEFAULT_EDGE_RADIUS: f32 = 0.0;

pub const DEFAULT_EDGE_COLOR: &str = "#fff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000";
pub const DEFAULT_LINE_COLOR: &str = "#fff";

/// Default opacity of the outer panels
pub const DEFAULT_OUTER_MASK_OPACITY: f32 = 1.0;

/// Default scan-line thickness
pub const DEFAULT_LINE_THICKNESS: f32 = 3.0;

/// Default one-way sweep duration of the scan-line (milliseconds)
pub const DEFAULT_LINE_ANIMATION_DURATION_MS: f64 = 2000.0;

/// Status bar height assumed when the host does not report one
pub const DEFAULT_STATUS_BAR_HEIGHT: f32 = 30.0;

/// Default bracket pulse amplitude (brackets stay still)
pub const DEFAULT_EDGE_PULSE_DISTANCE: f32 = 0.0;

/// Default one-way bracket pulse duration (milliseconds)
pub const DEFAULT_EDGE_PULSE_DURATION_MS: f64 = 1000.0;

/// Frame clock interval while any mask animation is running (~60 FPS)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Largest integration step used by the spring solver (seconds)
pub const SPRING_MAX_STEP: f32 = 1.0 / 120.0;

/// Upper bound of solver steps per tick; a longer stall snaps the spring to rest
pub const SPRING_MAX_STEPS: u32 = 240;

/// Distance and speed under which a spring is considered at rest
pub const SPRING_REST_THRESHOLD: f32 = 0.01;

/// Spring parameters for mask resizing and scan-line thickness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub damping: f32,
    pub stiffness: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Slightly overdamped spring: settles in about half a second with no overshoot
    pub const MASK: SpringConfig = SpringConfig {
        damping: 15.0,
        stiffness: 100.0,
        mass: 0.5,
    };
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::MASK
    }
}
