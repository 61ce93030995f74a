// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn paint_constants_are_within_reasonable_bounds() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(RETICULE_HALF_EXTENT_PX > RETICULE_ARM_PX);
    assert!(RETICULE_LINE_WIDTH_PX > 0.0);
    assert!(DOT_RADIUS_PX > 0.0);
}

#[test]
fn selectors_are_well_formed() {
    assert!(TRIGGER_SELECTOR.starts_with('.'));
    assert!(MAGNETIC_SELECTOR.starts_with('.'));
    for id in [GRID_CANVAS_ID, CURSOR_CANVAS_ID, LOGO_ID] {
        assert!(!id.is_empty() && !id.starts_with('#'));
    }
    assert_ne!(GRID_CANVAS_ID, CURSOR_CANVAS_ID);
}
