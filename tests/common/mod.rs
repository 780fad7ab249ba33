// SPDX-License-Identifier: MPL-2.0

//! Shared helpers for integration tests

#![allow(dead_code)]

use barcode_mask::ViewportReading;

/// Install a fmt subscriber once; set RUST_LOG=barcode_mask=debug to see output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn phone_portrait() -> ViewportReading {
    ViewportReading::new(375.0, 667.0)
}

pub fn phone_landscape() -> ViewportReading {
    ViewportReading::new(667.0, 375.0)
}
