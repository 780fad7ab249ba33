// SPDX-License-Identifier: MPL-2.0

//! Barcode mask overlay
//!
//! [`MaskOverlay`] owns the mask state: the resolved configuration, the latest
//! viewport reading, the geometry derived from both, and the three animations
//! (scan-line sweep, bracket pulse, mask-size spring). The host keeps it in its
//! application model, forwards configuration and frame-clock messages to it,
//! and renders [`MaskOverlay::frame`] with the [`widget::BarcodeMask`] widget.
//!
//! # Update ordering
//!
//! Every input (`set_config`, `set_viewport`, `tick`) recomputes the geometry
//! and restarts animations before returning, so the next frame always reflects
//! the new bounds. Readings pushed by [`DisplayMetrics`] between two ticks are
//! picked up by `frame` directly.

pub mod animation;
pub mod brackets;
pub mod geometry;
pub mod widget;

use crate::config::{LineOrientation, MaskConfig, ResolvedConfig};
use crate::constants::{FRAME_INTERVAL, SpringConfig};
use crate::display_metrics::{DisplayMetrics, MetricsSubscription, ViewportReading};
use animation::{LoopState, PingPong, Spring};
use brackets::Bracket;
use cosmic::iced::{Color, Rectangle, Size, Subscription};
use geometry::MaskGeometry;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use widget::{BarcodeMask, TapEvent, barcode_mask};

/// Parameters the scan-line loop was started with
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineParams {
    orientation: LineOrientation,
    width: f32,
    height: f32,
    thickness: f32,
    duration: Duration,
}

/// Parameters the bracket pulse was started with
#[derive(Debug, Clone, Copy, PartialEq)]
struct PulseParams {
    distance: f32,
    duration: Duration,
}

/// The scan-line as painted in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanLine {
    pub bounds: Rectangle,
    pub color: Color,
    pub orientation: LineOrientation,
    /// Distance travelled from the start of the sweep
    pub offset: f32,
}

/// Complete description of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskFrame {
    pub geometry: MaskGeometry,
    /// Background color with the outer opacity applied
    pub panel_color: Color,
    pub brackets: [Bracket; 4],
    pub line: Option<ScanLine>,
}

/// Mask state and animation driver
pub struct MaskOverlay {
    config: MaskConfig,
    resolved: ResolvedConfig,
    viewport: ViewportReading,
    /// Reading pushed by the metrics provider, applied on the next pass
    pending: Arc<Mutex<Option<ViewportReading>>>,
    metrics: Option<MetricsSubscription>,
    mask_width: Spring,
    mask_height: Spring,
    line_thickness: Spring,
    line_x: PingPong,
    line_y: PingPong,
    edge_pulse: PingPong,
    line_params: Option<LineParams>,
    pulse_params: Option<PulseParams>,
    geometry: MaskGeometry,
    now: Instant,
}

impl std::fmt::Debug for MaskOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskOverlay")
            .field("viewport", &self.viewport)
            .field("active", &self.resolved.is_active)
            .field("line_x", &self.line_x.state())
            .field("line_y", &self.line_y.state())
            .field("edge_pulse", &self.edge_pulse.state())
            .finish()
    }
}

impl MaskOverlay {
    /// Create an overlay for a fixed viewport reading
    pub fn new(config: MaskConfig, viewport: ViewportReading, now: Instant) -> Self {
        let resolved = config.resolve();
        let spring = SpringConfig::MASK;

        let mut overlay = Self {
            config,
            resolved,
            viewport,
            pending: Arc::new(Mutex::new(None)),
            metrics: None,
            mask_width: Spring::new(resolved.width, spring),
            mask_height: Spring::new(resolved.height, spring),
            line_thickness: Spring::new(0.0, spring),
            line_x: PingPong::idle(),
            line_y: PingPong::idle(),
            edge_pulse: PingPong::idle(),
            line_params: None,
            pulse_params: None,
            geometry: geometry::compute(
                viewport,
                Size::new(resolved.width, resolved.height),
                resolved.status_bar_height,
            ),
            now,
        };
        overlay.sync(now);
        overlay
    }

    /// Create an overlay that follows `metrics`
    ///
    /// The subscription is released when the overlay is dropped.
    pub fn attach(config: MaskConfig, metrics: &DisplayMetrics, now: Instant) -> Self {
        let mut overlay = Self::new(config, metrics.current(), now);
        let pending = Arc::clone(&overlay.pending);
        overlay.metrics = Some(metrics.subscribe(move |reading| {
            if let Ok(mut slot) = pending.lock() {
                *slot = Some(reading);
            }
        }));
        info!(
            width = overlay.viewport.width,
            height = overlay.viewport.height,
            "Mask overlay attached to display metrics"
        );
        overlay
    }

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    pub fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    pub fn viewport(&self) -> ViewportReading {
        self.pending_reading().unwrap_or(self.viewport)
    }

    /// Geometry as of the last recomputation
    pub fn geometry(&self) -> &MaskGeometry {
        &self.geometry
    }

    pub fn is_active(&self) -> bool {
        self.resolved.is_active
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: MaskConfig, now: Instant) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.sync(now);
    }

    /// Toggle the animations without touching the rest of the configuration
    pub fn set_active(&mut self, active: bool, now: Instant) {
        let config = self.config.clone().is_active(active);
        self.set_config(config, now);
    }

    /// Apply a viewport reading directly
    pub fn set_viewport(&mut self, reading: ViewportReading, now: Instant) {
        if let Ok(mut slot) = self.pending.lock() {
            slot.take();
        }
        if reading == self.viewport {
            return;
        }
        self.viewport = reading;
        self.sync(now);
    }

    /// Advance the springs and apply any pending viewport reading
    pub fn tick(&mut self, now: Instant) {
        if let Some(reading) = self.take_pending() {
            self.viewport = reading;
        }
        self.mask_width.tick(now);
        self.mask_height.tick(now);
        self.line_thickness.tick(now);
        self.now = now;
        self.geometry = self.compute_geometry(self.viewport);
    }

    /// True while a frame clock is needed
    pub fn is_animating(&self) -> bool {
        self.line_x.is_running()
            || self.line_y.is_running()
            || self.edge_pulse.is_running()
            || !self.mask_width.is_settled()
            || !self.mask_height.is_settled()
            || !self.line_thickness.is_settled()
    }

    /// Frame clock for the host application
    ///
    /// Map the produced instants to a message that calls [`MaskOverlay::tick`].
    pub fn subscription(&self) -> Subscription<Instant> {
        if self.is_animating() {
            cosmic::iced::time::every(FRAME_INTERVAL)
        } else {
            Subscription::none()
        }
    }

    /// State of the horizontal-offset (vertical line) animation
    pub fn line_x_state(&self) -> LoopState {
        self.line_x.state()
    }

    /// State of the vertical-offset (horizontal line) animation
    pub fn line_y_state(&self) -> LoopState {
        self.line_y.state()
    }

    pub fn edge_pulse_state(&self) -> LoopState {
        self.edge_pulse.state()
    }

    /// Current scan-line offset along its sweep axis
    pub fn line_offset(&self) -> f32 {
        self.line_offset_in(&self.current_geometry())
    }

    /// Snapshot for rendering
    pub fn frame(&self) -> MaskFrame {
        let geometry = self.current_geometry();
        let resolved = &self.resolved;

        let inset = self.edge_pulse.progress(self.now) * resolved.edge_pulse_distance.max(0.0);
        let brackets = brackets::layout(geometry.viewfinder, resolved, inset);

        let line = resolved.show_animated_line.then(|| {
            let offset = self.line_offset_in(&geometry);
            let thickness = self.line_thickness.value().max(0.0);
            let inner = geometry.inner;
            let bounds = match resolved.animated_line_orientation {
                LineOrientation::Horizontal => Rectangle {
                    x: inner.x,
                    y: inner.y + offset,
                    width: inner.width,
                    height: thickness,
                },
                LineOrientation::Vertical => {
                    let top = resolved.edge_border_width.max(0.0).min(inner.height);
                    Rectangle {
                        x: inner.x + offset,
                        y: inner.y + top,
                        width: thickness,
                        height: inner.height - top,
                    }
                }
            };
            ScanLine {
                bounds,
                color: resolved.animated_line_color,
                orientation: resolved.animated_line_orientation,
                offset,
            }
        });

        MaskFrame {
            geometry,
            panel_color: resolved.panel_color(),
            brackets,
            line,
        }
    }

    fn line_offset_in(&self, geometry: &MaskGeometry) -> f32 {
        let orientation = self.resolved.animated_line_orientation;
        let progress = match orientation {
            LineOrientation::Horizontal => self.line_y.progress(self.now),
            LineOrientation::Vertical => self.line_x.progress(self.now),
        };
        progress * geometry.sweep_amplitude(orientation)
    }

    fn pending_reading(&self) -> Option<ViewportReading> {
        self.pending.lock().ok().and_then(|slot| *slot)
    }

    fn take_pending(&self) -> Option<ViewportReading> {
        self.pending.lock().ok().and_then(|mut slot| slot.take())
    }

    fn current_geometry(&self) -> MaskGeometry {
        match self.pending_reading() {
            Some(reading) if reading != self.viewport => self.compute_geometry(reading),
            _ => self.geometry,
        }
    }

    fn compute_geometry(&self, reading: ViewportReading) -> MaskGeometry {
        geometry::compute(
            reading,
            Size::new(self.mask_width.value(), self.mask_height.value()),
            self.resolved.status_bar_height,
        )
    }

    /// Resolve the configuration, then bring springs, geometry and loops in line
    fn sync(&mut self, now: Instant) {
        if let Some(reading) = self.take_pending() {
            self.viewport = reading;
        }
        self.now = now;
        self.resolved = self.config.resolve();
        let resolved = self.resolved;
        let active = resolved.is_active;

        self.mask_width.set_target(resolved.width, now);
        self.mask_height.set_target(resolved.height, now);
        // The line only grows in once scanning starts; inactive keeps its last size
        if active {
            self.line_thickness
                .set_target(resolved.animated_line_thickness, now);
        } else {
            self.mask_width.settle();
            self.mask_height.settle();
            self.line_thickness.settle();
        }

        self.geometry = self.compute_geometry(self.viewport);
        debug!(
            viewport_width = self.viewport.width,
            viewport_height = self.viewport.height,
            portrait = self.viewport.portrait,
            viewfinder = ?self.geometry.viewfinder,
            "Mask geometry recomputed"
        );

        self.sync_line(now);
        self.sync_pulse(now);
    }

    fn sync_line(&mut self, now: Instant) {
        let resolved = self.resolved;

        if !resolved.is_active {
            self.line_x.cancel(now);
            self.line_y.cancel(now);
            if self.line_params.take().is_some() {
                debug!("Scan-line animation cancelled");
            }
            return;
        }

        if !resolved.show_animated_line {
            self.line_x.reset();
            self.line_y.reset();
            self.line_params = None;
            return;
        }

        let params = LineParams {
            orientation: resolved.animated_line_orientation,
            width: resolved.width,
            height: resolved.height,
            thickness: resolved.animated_line_thickness,
            duration: resolved.line_animation_duration,
        };
        if self.line_params == Some(params) {
            return;
        }

        // Tear down both axes so nothing keeps sweeping the old one
        self.line_x.reset();
        self.line_y.reset();
        match params.orientation {
            LineOrientation::Horizontal => self.line_y.start(now, params.duration),
            LineOrientation::Vertical => self.line_x.start(now, params.duration),
        }
        self.line_params = Some(params);
        debug!(
            orientation = ?params.orientation,
            duration_ms = params.duration.as_millis() as u64,
            "Scan-line animation started"
        );
    }

    fn sync_pulse(&mut self, now: Instant) {
        let resolved = self.resolved;

        if !resolved.is_active {
            self.edge_pulse.cancel(now);
            self.pulse_params = None;
            return;
        }

        if resolved.edge_pulse_distance <= 0.0 {
            self.edge_pulse.reset();
            self.pulse_params = None;
            return;
        }

        let params = PulseParams {
            distance: resolved.edge_pulse_distance,
            duration: resolved.edge_pulse_duration,
        };
        if self.pulse_params != Some(params) {
            self.edge_pulse.start(now, params.duration);
            self.pulse_params = Some(params);
            debug!(distance = params.distance, "Bracket pulse started");
        }
    }
}

impl Drop for MaskOverlay {
    fn drop(&mut self) {
        self.line_x.cancel(self.now);
        self.line_y.cancel(self.now);
        self.edge_pulse.cancel(self.now);
        if let Some(mut subscription) = self.metrics.take() {
            subscription.unsubscribe();
        }
    }
}
