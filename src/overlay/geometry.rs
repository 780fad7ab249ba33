// SPDX-License-Identifier: MPL-2.0

//! Panel and viewfinder geometry
//!
//! All rectangles are in viewport coordinates with the origin at the top-left
//! corner. The computation is pure; the overlay recomputes it wholesale on
//! every relevant change.

use crate::config::LineOrientation;
use crate::constants::MASK_PADDING;
use crate::display_metrics::ViewportReading;
use cosmic::iced::{Rectangle, Size};

/// The four rectangles darkening the area around the viewfinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterPanels {
    /// Full viewport width, above the viewfinder
    pub top: Rectangle,
    /// Full viewport width, below the viewfinder
    pub bottom: Rectangle,
    /// Viewfinder height, left of it
    pub left: Rectangle,
    /// Viewfinder height, right of it
    pub right: Rectangle,
}

impl OuterPanels {
    pub fn all(&self) -> [Rectangle; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

/// Derived layout of the mask for one viewport reading and mask size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskGeometry {
    pub viewport: Size,
    pub portrait: bool,
    /// Area the panels and viewfinder tile: the viewport, minus the status bar
    /// strip in landscape
    pub layout_area: Rectangle,
    /// Strip reserved for the status bar in landscape; painted like a panel
    pub status_bar_strip: Option<Rectangle>,
    pub panels: OuterPanels,
    /// The undarkened scan area
    pub viewfinder: Rectangle,
    /// Viewfinder shrunk by [`MASK_PADDING`] on each side
    pub inner: Rectangle,
}

/// Vertical inset applied in landscape for the status bar
pub fn status_bar_inset(status_bar_height: f32) -> f32 {
    (status_bar_height - MASK_PADDING).max(0.0)
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Compute panel and viewfinder rectangles
///
/// Top and bottom panels get `(height - (H + inset)) / 2` where the inset is
/// only applied in landscape; side panels get `(width - W) / 2`. The mask is
/// clamped to the layout area so degenerate readings (zero-sized or smaller
/// than the mask) produce empty panels instead of negative ones.
pub fn compute(reading: ViewportReading, mask: Size, status_bar_height: f32) -> MaskGeometry {
    let viewport_width = non_negative(reading.width);
    let viewport_height = non_negative(reading.height);

    let inset = if reading.portrait {
        0.0
    } else {
        status_bar_inset(non_negative(status_bar_height)).min(viewport_height)
    };
    let layout_height = viewport_height - inset;

    let mask_width = non_negative(mask.width).min(viewport_width);
    let mask_height = non_negative(mask.height).min(layout_height);

    let panel_height = (viewport_height - (mask_height + inset)) / 2.0;
    let panel_width = (viewport_width - mask_width) / 2.0;

    let viewfinder = Rectangle {
        x: panel_width,
        y: inset + panel_height,
        width: mask_width,
        height: mask_height,
    };

    let panels = OuterPanels {
        top: Rectangle {
            x: 0.0,
            y: inset,
            width: viewport_width,
            height: panel_height,
        },
        bottom: Rectangle {
            x: 0.0,
            y: viewfinder.y + mask_height,
            width: viewport_width,
            height: panel_height,
        },
        left: Rectangle {
            x: 0.0,
            y: viewfinder.y,
            width: panel_width,
            height: mask_height,
        },
        right: Rectangle {
            x: viewfinder.x + mask_width,
            y: viewfinder.y,
            width: panel_width,
            height: mask_height,
        },
    };

    let inner = Rectangle {
        x: viewfinder.x + MASK_PADDING,
        y: viewfinder.y + MASK_PADDING,
        width: (mask_width - 2.0 * MASK_PADDING).max(0.0),
        height: (mask_height - 2.0 * MASK_PADDING).max(0.0),
    };

    MaskGeometry {
        viewport: Size::new(viewport_width, viewport_height),
        portrait: reading.portrait,
        layout_area: Rectangle {
            x: 0.0,
            y: inset,
            width: viewport_width,
            height: layout_height,
        },
        status_bar_strip: (inset > 0.0).then_some(Rectangle {
            x: 0.0,
            y: 0.0,
            width: viewport_width,
            height: inset,
        }),
        panels,
        viewfinder,
        inner,
    }
}

impl MaskGeometry {
    /// Distance the scan-line travels along its sweep axis
    pub fn sweep_amplitude(&self, orientation: LineOrientation) -> f32 {
        match orientation {
            LineOrientation::Horizontal => self.inner.height,
            LineOrientation::Vertical => self.inner.width,
        }
    }

    /// Everything painted with the panel color
    pub fn shaded_regions(&self) -> impl Iterator<Item = Rectangle> + '_ {
        self.status_bar_strip
            .into_iter()
            .chain(self.panels.all())
            .filter(|r| r.width > 0.0 && r.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_reference_layout() {
        let geometry = compute(
            ViewportReading::new(375.0, 667.0),
            Size::new(280.0, 300.0),
            30.0,
        );

        assert_eq!(geometry.panels.left.width, 47.5);
        assert_eq!(geometry.panels.left.height, 300.0);
        assert_eq!(geometry.panels.right.width, 47.5);
        assert_eq!(geometry.panels.top.height, 183.5);
        assert_eq!(geometry.panels.top.width, 375.0);
        assert_eq!(geometry.panels.bottom.height, 183.5);
        assert_eq!(geometry.status_bar_strip, None);
        assert_eq!(
            geometry.viewfinder,
            Rectangle {
                x: 47.5,
                y: 183.5,
                width: 280.0,
                height: 300.0
            }
        );
    }

    #[test]
    fn test_landscape_applies_inset() {
        let geometry = compute(
            ViewportReading::new(667.0, 375.0),
            Size::new(280.0, 300.0),
            30.0,
        );

        // (375 - (300 + 22)) / 2
        assert_eq!(geometry.panels.top.height, 26.5);
        assert_eq!(geometry.panels.top.y, 22.0);
        assert_eq!(geometry.status_bar_strip.map(|s| s.height), Some(22.0));
        assert_eq!(geometry.panels.bottom.y + geometry.panels.bottom.height, 375.0);
    }

    #[test]
    fn test_zero_viewport_is_degenerate() {
        let geometry = compute(ViewportReading::default(), Size::new(280.0, 300.0), 30.0);
        assert_eq!(geometry.viewfinder.width, 0.0);
        assert_eq!(geometry.viewfinder.height, 0.0);
        assert_eq!(geometry.shaded_regions().count(), 0);
    }

    #[test]
    fn test_inner_rect_padding() {
        let geometry = compute(
            ViewportReading::new(375.0, 667.0),
            Size::new(280.0, 300.0),
            30.0,
        );
        assert_eq!(geometry.inner.width, 264.0);
        assert_eq!(geometry.inner.height, 284.0);
        assert_eq!(geometry.sweep_amplitude(LineOrientation::Horizontal), 284.0);
        assert_eq!(geometry.sweep_amplitude(LineOrientation::Vertical), 264.0);
    }
}
