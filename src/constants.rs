// DOM hooks and paint tuning for the web front-end.
//
// Ripple and cursor behaviour lives in `ripple_core::constants`; only
// page wiring and colours are defined here.

// Element ids and selectors
pub const GRID_CANVAS_ID: &str = "ripple-grid";
pub const CURSOR_CANVAS_ID: &str = "ripple-cursor";
pub const LOGO_ID: &str = "logo";
pub const TRIGGER_SELECTOR: &str = ".ripple-trigger";
pub const MAGNETIC_SELECTOR: &str = ".magnetic";

// Frame loop
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // cap after a stalled or hidden tab

// Grid paint
pub const CELL_RGB: [u8; 3] = [236, 72, 153];

// Cursor paint
pub const RETICULE_HALF_EXTENT_PX: f32 = 14.0;
pub const RETICULE_ARM_PX: f32 = 6.0;
pub const RETICULE_LINE_WIDTH_PX: f64 = 2.0;
pub const RETICULE_RGB: [u8; 3] = [255, 255, 255];
pub const DOT_RADIUS_PX: f64 = 3.0;
