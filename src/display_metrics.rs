// SPDX-License-Identifier: GPL-3.0-only

//! Live viewport readings
//!
//! [`DisplayMetrics`] holds the current viewport size and notifies subscribers
//! synchronously whenever the host reports a rotation or resize. The host feeds
//! it, typically from [`window_resizes`], and any number of mask overlays
//! subscribe independently.

use cosmic::iced::{Event, Size, Subscription, event, window};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;
use tracing::{debug, info};

/// Immutable snapshot of the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportReading {
    pub width: f32,
    pub height: f32,
    /// `height > width`
    pub portrait: bool,
}

impl ViewportReading {
    /// Build a reading; negative or non-finite dimensions read as zero
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let width = sanitize(width);
        let height = sanitize(height);
        Self {
            width,
            height,
            portrait: height > width,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True before the host has reported a usable size
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Size> for ViewportReading {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

type Callback = Arc<dyn Fn(ViewportReading) + Send + Sync>;

struct Registry {
    current: ViewportReading,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// Shared source of viewport readings
///
/// Cloning is cheap; all clones share the same subscriber list.
#[derive(Clone)]
pub struct DisplayMetrics {
    registry: Arc<Mutex<Registry>>,
    watch: Arc<watch::Sender<ViewportReading>>,
}

impl std::fmt::Debug for DisplayMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayMetrics")
            .field("current", &self.current())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl DisplayMetrics {
    /// Create a provider seeded with the immediate viewport size
    pub fn new(width: f32, height: f32) -> Self {
        let current = ViewportReading::new(width, height);
        let (sender, _) = watch::channel(current);
        Self {
            registry: Arc::new(Mutex::new(Registry {
                current,
                next_id: 0,
                subscribers: Vec::new(),
            })),
            watch: Arc::new(sender),
        }
    }

    /// The latest reading
    pub fn current(&self) -> ViewportReading {
        match self.registry.lock() {
            Ok(registry) => registry.current,
            Err(poisoned) => poisoned.into_inner().current,
        }
    }

    /// Register a callback invoked with every new reading
    ///
    /// The callback runs on the thread that calls [`DisplayMetrics::update`].
    /// Dropping the returned handle unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> MetricsSubscription
    where
        F: Fn(ViewportReading) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = match self.registry.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.push((id, Arc::new(callback)));
            id
        };
        debug!(id, "Display metrics subscriber added");

        MetricsSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Receiver for async consumers; always holds the latest reading
    pub fn watch(&self) -> watch::Receiver<ViewportReading> {
        self.watch.subscribe()
    }

    /// Report a new viewport size
    ///
    /// Subscribers are notified before this returns. Returns `false` (and
    /// notifies nobody) when the reading is unchanged.
    pub fn update(&self, width: f32, height: f32) -> bool {
        let reading = ViewportReading::new(width, height);

        let callbacks: Vec<Callback> = {
            let mut registry = match self.registry.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if registry.current == reading {
                return false;
            }
            registry.current = reading;
            registry
                .subscribers
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };

        info!(
            width = reading.width,
            height = reading.height,
            portrait = reading.portrait,
            subscribers = callbacks.len(),
            "Viewport changed"
        );

        // Lock is released so callbacks may query or subscribe
        for callback in &callbacks {
            callback(reading);
        }
        self.watch.send_replace(reading);
        true
    }

    pub fn subscriber_count(&self) -> usize {
        match self.registry.lock() {
            Ok(registry) => registry.subscribers.len(),
            Err(poisoned) => poisoned.into_inner().subscribers.len(),
        }
    }
}

/// Handle returned by [`DisplayMetrics::subscribe`]
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct MetricsSubscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl std::fmt::Debug for MetricsSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl MetricsSubscription {
    /// Stop receiving readings; calling it again is a no-op
    pub fn unsubscribe(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        self.registry = Weak::new();

        let mut registry = match registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry.subscribers.retain(|(id, _)| *id != self.id);
        debug!(id = self.id, "Display metrics subscriber removed");
    }

    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for MetricsSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Window resize events as viewport readings
///
/// Feed the produced readings into [`DisplayMetrics::update`] from the
/// application's update handler.
pub fn window_resizes() -> Subscription<ViewportReading> {
    event::listen_with(|event, _status, _window| match event {
        Event::Window(window::Event::Resized(size)) => Some(ViewportReading::from(size)),
        _ => None,
    })
}
