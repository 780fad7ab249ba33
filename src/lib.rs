// SPDX-License-Identifier: MPL-2.0

//! Barcode Mask - an animated scanning overlay for COSMIC camera views
//!
//! The mask darkens everything outside a rectangular viewfinder, marks its
//! corners with L-shaped brackets, and sweeps a scan-line across it while
//! scanning is active. It only draws: camera capture and barcode decoding
//! belong to the host application.
//!
//! # Architecture
//!
//! - [`display_metrics`]: live viewport readings with synchronous subscribers
//! - [`config`]: lenient caller configuration and its normalized form
//! - [`overlay`]: geometry, animations, and the widget that renders them
//! - [`constants`]: defaults and tuning values
//! - [`errors`]: error types for the parsing helpers
//!
//! # Example
//!
//! ```ignore
//! // In the application model
//! let metrics = DisplayMetrics::new(375.0, 667.0);
//! let mask = MaskOverlay::attach(MaskConfig::default(), &metrics, Instant::now());
//!
//! // In view()
//! barcode_mask(camera_preview, mask.frame()).on_press_with(Message::ViewfinderTapped)
//!
//! // In subscription()
//! mask.subscription().map(Message::MaskTick)
//! ```

pub mod config;
pub mod constants;
pub mod display_metrics;
pub mod errors;
pub mod overlay;

// Re-export commonly used types
pub use config::{LayoutDirection, LineOrientation, MaskConfig, Number, ResolvedConfig};
pub use display_metrics::{DisplayMetrics, MetricsSubscription, ViewportReading};
pub use errors::{MaskError, MaskResult};
pub use overlay::{BarcodeMask, MaskFrame, MaskOverlay, ScanLine, TapEvent, barcode_mask};
