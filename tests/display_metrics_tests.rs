// SPDX-License-Identifier: MPL-2.0

//! Integration tests for display metrics and overlay subscriptions

mod common;

use barcode_mask::{DisplayMetrics, MaskConfig, MaskOverlay, ViewportReading};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[test]
fn test_current_reading_on_construction() {
    let metrics = DisplayMetrics::new(375.0, 667.0);
    assert_eq!(metrics.current(), common::phone_portrait());
    assert!(metrics.current().portrait);
}

#[test]
fn test_subscribers_receive_updates_synchronously() {
    common::init_tracing();

    let metrics = DisplayMetrics::new(375.0, 667.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = metrics.subscribe(move |reading| {
        sink.lock().unwrap().push(reading);
    });

    metrics.update(667.0, 375.0);
    metrics.update(375.0, 667.0);

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![common::phone_landscape(), common::phone_portrait()]
    );
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let metrics = DisplayMetrics::new(100.0, 100.0);
    let mut first = metrics.subscribe(|_| {});
    let _second = metrics.subscribe(|_| {});
    assert_eq!(metrics.subscriber_count(), 2);

    first.unsubscribe();
    first.unsubscribe();
    assert!(!first.is_active());
    assert_eq!(metrics.subscriber_count(), 1);

    drop(first);
    assert_eq!(metrics.subscriber_count(), 1);
}

#[test]
fn test_callback_may_query_provider() {
    let metrics = DisplayMetrics::new(100.0, 100.0);
    let provider = metrics.clone();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let _subscription = metrics.subscribe(move |reading| {
        *sink.lock().unwrap() = Some((reading, provider.current()));
    });

    metrics.update(300.0, 200.0);
    let (reading, current) = seen.lock().unwrap().expect("callback ran");
    assert_eq!(reading, current);
}

#[test]
fn test_watch_receiver_sees_latest() {
    let metrics = DisplayMetrics::new(100.0, 100.0);
    let receiver = metrics.watch();
    metrics.update(320.0, 480.0);
    assert_eq!(*receiver.borrow(), ViewportReading::new(320.0, 480.0));
}

#[test]
fn test_overlays_subscribe_independently() {
    let t0 = Instant::now();
    let metrics = DisplayMetrics::new(375.0, 667.0);
    let first = MaskOverlay::attach(MaskConfig::default(), &metrics, t0);
    let second = MaskOverlay::attach(MaskConfig::default().width(200.0), &metrics, t0);
    assert_eq!(metrics.subscriber_count(), 2);

    metrics.update(667.0, 375.0);
    assert_eq!(first.viewport(), common::phone_landscape());
    assert_eq!(second.viewport(), common::phone_landscape());

    drop(first);
    assert_eq!(metrics.subscriber_count(), 1);
    drop(second);
    assert_eq!(metrics.subscriber_count(), 0);
}

#[test]
fn test_rotation_reaches_next_frame_without_tick() {
    let t0 = Instant::now();
    let metrics = DisplayMetrics::new(375.0, 667.0);
    let overlay = MaskOverlay::attach(MaskConfig::default(), &metrics, t0);
    let portrait_frame = overlay.frame();

    metrics.update(667.0, 375.0);
    let landscape_frame = overlay.frame();

    assert_ne!(portrait_frame.geometry, landscape_frame.geometry);
    assert!(!landscape_frame.geometry.portrait);
    assert_eq!(landscape_frame.geometry.panels.top.height, 26.5);
}

#[test]
fn test_tick_applies_pending_reading() {
    let t0 = Instant::now();
    let metrics = DisplayMetrics::new(375.0, 667.0);
    let mut overlay = MaskOverlay::attach(MaskConfig::default(), &metrics, t0);

    metrics.update(667.0, 375.0);
    overlay.tick(t0);
    assert_eq!(overlay.geometry().viewport.width, 667.0);
    assert_eq!(overlay.frame().geometry, *overlay.geometry());
}

#[test]
fn test_zero_viewport_does_not_panic() {
    let t0 = Instant::now();
    let metrics = DisplayMetrics::new(0.0, 0.0);
    let mut overlay = MaskOverlay::attach(MaskConfig::default(), &metrics, t0);
    let frame = overlay.frame();
    assert_eq!(frame.geometry.viewfinder.width, 0.0);

    metrics.update(f32::NAN, 500.0);
    overlay.tick(t0);
    assert_eq!(overlay.geometry().viewport.width, 0.0);
}
