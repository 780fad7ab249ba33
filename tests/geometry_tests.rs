// SPDX-License-Identifier: MPL-2.0

//! Integration tests for panel geometry and bracket layout

mod common;

use barcode_mask::overlay::brackets::{self, Corner};
use barcode_mask::overlay::geometry;
use barcode_mask::{LayoutDirection, MaskConfig, MaskOverlay, ViewportReading};
use cosmic::iced::{Rectangle, Size};
use proptest::prelude::*;
use std::time::Instant;

fn area(r: &Rectangle) -> f64 {
    r.width.max(0.0) as f64 * r.height.max(0.0) as f64
}

fn overlap(a: &Rectangle, b: &Rectangle) -> f64 {
    let w = (a.x + a.width).min(b.x + b.width) - a.x.max(b.x);
    let h = (a.y + a.height).min(b.y + b.height) - a.y.max(b.y);
    if w > 0.0 && h > 0.0 {
        w as f64 * h as f64
    } else {
        0.0
    }
}

#[test]
fn test_reference_scenario() {
    let overlay = MaskOverlay::new(
        MaskConfig::default().width(280.0).height(300.0),
        common::phone_portrait(),
        Instant::now(),
    );
    let panels = overlay.geometry().panels;

    assert_eq!(panels.left.width, 47.5);
    assert_eq!(panels.right.width, 47.5);
    assert_eq!(panels.left.height, 300.0);
    assert_eq!(panels.right.height, 300.0);
    assert_eq!(panels.top.height, 183.5);
    assert_eq!(panels.bottom.height, 183.5);
    assert_eq!(panels.top.width, 375.0);
    assert_eq!(panels.bottom.width, 375.0);
}

#[test]
fn test_invalid_config_matches_default_geometry() {
    let t0 = Instant::now();
    let reading = common::phone_portrait();
    let valid = MaskOverlay::new(MaskConfig::default(), reading, t0);
    let invalid = MaskOverlay::new(
        MaskConfig::default()
            .width("abc")
            .height(f64::NAN)
            .edge_radius(f64::NAN)
            .edge_border_width("wide"),
        reading,
        t0,
    );

    assert_eq!(valid.geometry(), invalid.geometry());
    assert_eq!(valid.frame(), invalid.frame());
}

#[test]
fn test_recompute_is_idempotent() {
    let reading = common::phone_landscape();
    let mask = Size::new(280.0, 300.0);
    let first = geometry::compute(reading, mask, 30.0);
    let second = geometry::compute(reading, mask, 30.0);
    assert_eq!(first, second);

    let overlay = MaskOverlay::new(MaskConfig::default(), reading, Instant::now());
    assert_eq!(overlay.frame(), overlay.frame());
}

#[test]
fn test_oversized_mask_is_clamped() {
    let geometry = geometry::compute(
        ViewportReading::new(200.0, 250.0),
        Size::new(280.0, 300.0),
        30.0,
    );
    assert_eq!(geometry.viewfinder.width, 200.0);
    assert_eq!(geometry.viewfinder.height, 250.0);
    for panel in geometry.panels.all() {
        assert!(panel.width >= 0.0 && panel.height >= 0.0);
    }
}

#[test]
fn test_rtl_negates_rotation() {
    let viewfinder = Rectangle {
        x: 47.5,
        y: 183.5,
        width: 280.0,
        height: 300.0,
    };
    let ltr = brackets::layout(viewfinder, &MaskConfig::default().resolve(), 0.0);
    let rtl = brackets::layout(
        viewfinder,
        &MaskConfig::default()
            .layout_direction(LayoutDirection::Rtl)
            .resolve(),
        0.0,
    );

    for (l, r) in ltr.iter().zip(rtl.iter()) {
        assert_eq!(r.rotation, -l.rotation);
    }
    assert_eq!(rtl[0].rotation, -270.0);
    assert_eq!(rtl[1].rotation, -90.0);

    // Leading/trailing swap sides
    assert_eq!(ltr[0].corner, Corner::TopRight);
    assert_eq!(rtl[0].corner, Corner::TopLeft);
    assert_eq!(rtl[3].corner, Corner::BottomRight);
}

#[test]
fn test_bracket_border_matches_corner_side() {
    let viewfinder = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };
    for direction in [LayoutDirection::Ltr, LayoutDirection::Rtl] {
        let config = MaskConfig::default()
            .edge_radius(6.0)
            .layout_direction(direction)
            .resolve();
        for bracket in brackets::layout(viewfinder, &config, 0.0) {
            // The kept side border is the one on the bracket's corner side
            assert_eq!(bracket.borders.left > 0.0, bracket.corner.is_left());
            assert_eq!(bracket.borders.right > 0.0, !bracket.corner.is_left());
            assert_eq!(bracket.borders.top, 0.0);
            assert_eq!(bracket.borders.bottom, 4.0);

            // Rounding only at the inner corner of the base shape
            let (bottom_left, bottom_right) = bracket.bottom_radii;
            if bracket.corner.is_left() {
                assert_eq!((bottom_left, bottom_right), (6.0, 0.0));
            } else {
                assert_eq!((bottom_left, bottom_right), (0.0, 6.0));
            }
        }
    }
}

#[test]
fn test_edge_radius_rounds_both_legs() {
    let overlay = MaskOverlay::new(
        MaskConfig::default().edge_radius(12.0),
        common::phone_portrait(),
        Instant::now(),
    );

    for bracket in overlay.frame().brackets {
        let outline = bracket.outline();
        let (clip, quad) = (outline.clip, outline.quad);
        assert_eq!(outline.border_width, 4.0);

        // Only the bracket's own corner is rounded, at the full radius
        let corner = match bracket.corner {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        };
        for (i, radius) in outline.radii.iter().enumerate() {
            assert_eq!(*radius, if i == corner { 12.0 } else { 0.0 });
        }

        // The quad is large enough that the radius is not clamped
        assert!(quad.width.min(quad.height) / 2.0 >= 12.0);

        // The rounded quad corner coincides with the bracket corner
        let quad_x = if bracket.corner.is_left() { quad.x } else { quad.x + quad.width };
        let clip_x = if bracket.corner.is_left() { clip.x } else { clip.x + clip.width };
        let quad_y = if bracket.corner.is_top() { quad.y } else { quad.y + quad.height };
        let clip_y = if bracket.corner.is_top() { clip.y } else { clip.y + clip.height };
        assert_eq!((quad_x, quad_y), (clip_x, clip_y));

        // Both legs run the full length of the clip
        assert!(quad.width >= clip.width && quad.height >= clip.height);
    }
}

proptest! {
    #[test]
    fn prop_panels_tile_viewport(
        viewport_width in 1.0f32..2000.0,
        viewport_height in 1.0f32..2000.0,
        width_ratio in 0.0f32..=1.0,
        height_ratio in 0.0f32..=1.0,
        status_bar in 0.0f32..60.0,
    ) {
        let reading = ViewportReading::new(viewport_width, viewport_height);
        let mask = Size::new(viewport_width * width_ratio, viewport_height * height_ratio);
        let geometry = geometry::compute(reading, mask, status_bar);

        let mut pieces: Vec<Rectangle> = geometry.panels.all().to_vec();
        pieces.push(geometry.viewfinder);
        pieces.extend(geometry.status_bar_strip);

        let covered: f64 = pieces.iter().map(area).sum();
        let total = viewport_width as f64 * viewport_height as f64;
        // One pixel, widened for f32 rounding on large viewports
        let tolerance = 1.0f64.max(total * 1e-6);
        prop_assert!((covered - total).abs() <= tolerance, "covered {covered} of {total}");

        for (i, a) in pieces.iter().enumerate() {
            prop_assert!(a.width >= 0.0 && a.height >= 0.0);
            for b in &pieces[i + 1..] {
                prop_assert!(overlap(a, b) <= 1e-3, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn prop_portrait_matches_formula(
        viewport_width in 100.0f32..800.0,
        extra in 1.0f32..800.0,
        mask_width in 0.0f32..100.0,
        mask_height in 0.0f32..100.0,
    ) {
        let reading = ViewportReading::new(viewport_width, viewport_width + extra);
        let geometry = geometry::compute(reading, Size::new(mask_width, mask_height), 30.0);

        prop_assert_eq!(geometry.panels.top.height, (reading.height - mask_height) / 2.0);
        prop_assert_eq!(geometry.panels.left.width, (reading.width - mask_width) / 2.0);
        prop_assert_eq!(geometry.status_bar_strip, None);
    }
}
