// SPDX-License-Identifier: MPL-2.0

//! Animation primitives driven by an external frame clock
//!
//! Nothing here owns a timer. Every handle is advanced or sampled with an
//! explicit [`Instant`], so the same code runs under the iced frame
//! subscription and in tests.

use crate::constants::{SPRING_MAX_STEP, SPRING_MAX_STEPS, SPRING_REST_THRESHOLD, SpringConfig};
use std::time::{Duration, Instant};

/// Quadratic ease-in-out on a normalized input
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Lifecycle of a looping animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    /// Never started, or reset; reads as progress 0
    Idle,
    /// Looping since `started_at`, one pass per `duration`
    Running {
        started_at: Instant,
        duration: Duration,
    },
    /// Stopped; holds the progress it had when cancelled
    Cancelled { frozen: f32 },
}

/// Repeat-forever animation that reverses direction at each bound
///
/// Progress goes 0 → 1 during the first pass, 1 → 0 during the second, and so
/// on, eased per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PingPong {
    state: LoopState,
}

impl Default for PingPong {
    fn default() -> Self {
        Self::idle()
    }
}

impl PingPong {
    pub fn idle() -> Self {
        Self {
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Start from progress 0, replacing whatever was in flight
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.state = LoopState::Running {
            started_at: now,
            duration,
        };
    }

    /// Stop and hold the current progress; a no-op unless running
    pub fn cancel(&mut self, now: Instant) {
        if self.is_running() {
            self.state = LoopState::Cancelled {
                frozen: self.progress(now),
            };
        }
    }

    /// Drop back to idle at progress 0
    pub fn reset(&mut self) {
        self.state = LoopState::Idle;
    }

    /// Eased progress in [0, 1] at `now`
    pub fn progress(&self, now: Instant) -> f32 {
        match self.state {
            LoopState::Idle => 0.0,
            LoopState::Cancelled { frozen } => frozen,
            LoopState::Running {
                started_at,
                duration,
            } => {
                let total = duration.as_secs_f64();
                if total <= 0.0 {
                    return 0.0;
                }
                let cycles = now.saturating_duration_since(started_at).as_secs_f64() / total;
                let pass = cycles.floor();
                let fraction = (cycles - pass) as f32;
                // Even passes run forward, odd passes run back
                let linear = if pass as u64 % 2 == 0 {
                    fraction
                } else {
                    1.0 - fraction
                };
                ease_in_out_quad(linear)
            }
        }
    }
}

/// Damped spring approaching a target value
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
    last_tick: Option<Instant>,
}

impl Spring {
    /// A spring at rest on `value`
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
            last_tick: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.last_tick.is_none()
    }

    /// Retarget; motion starts from the current value and velocity
    pub fn set_target(&mut self, target: f32, now: Instant) {
        if target == self.target {
            return;
        }
        self.target = target;
        if self.value != target && self.last_tick.is_none() {
            self.last_tick = Some(now);
        }
    }

    /// Jump to `value` and rest there
    fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.last_tick = None;
    }

    /// Finish immediately at the current target
    pub fn settle(&mut self) {
        self.snap_to(self.target);
    }

    /// Integrate up to `now`
    pub fn tick(&mut self, now: Instant) {
        let Some(last) = self.last_tick else {
            return;
        };
        let elapsed = now.saturating_duration_since(last).as_secs_f32();
        if elapsed <= 0.0 {
            return;
        }

        let steps = (elapsed / SPRING_MAX_STEP).ceil() as u32;
        if steps > SPRING_MAX_STEPS {
            self.settle();
            return;
        }

        let dt = elapsed / steps as f32;
        let SpringConfig {
            damping,
            stiffness,
            mass,
        } = self.config;
        for _ in 0..steps {
            // Semi-implicit Euler
            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force / mass * dt;
            self.value += self.velocity * dt;
        }

        if (self.value - self.target).abs() < SPRING_REST_THRESHOLD
            && self.velocity.abs() < SPRING_REST_THRESHOLD
        {
            self.settle();
        } else {
            self.last_tick = Some(now);
        }
    }
}
