// Shared tuning constants used by both web and native frontends.

// Grid sizing (CSS pixels)
pub const CELL_SIZE_PX: f32 = 80.0; // minimum cell size before a column/row is dropped
pub const GAP_PX: f32 = 2.0; // gap assumed by the shape computation
pub const MIN_GRID_DIM: u32 = 5; // never fewer columns/rows than this
pub const LAYOUT_GAP_PX: f32 = 10.0; // gap between painted cells
pub const LAYOUT_PADDING_PX: f32 = 10.0; // inset between grid bounds and first cell

// Radial delays
pub const BASE_DELAY_SEC_PER_PX: f32 = 0.0008;
pub const DELAY_NOISE_SEC: f32 = 0.1;

// Settle timing
pub const SPRING_SETTLE_MS: f64 = 600.0; // approximate time for the cell spring to come to rest
pub const FADE_BUFFER_MS: f64 = 500.0; // paint latency absorbed before fading out

// Cell spring (unit mass)
pub const CELL_SPRING_STIFFNESS: f32 = 600.0;
pub const CELL_SPRING_DAMPING: f32 = 20.0;

// Cell variants
pub const HIDDEN_SCALE: f32 = 0.5;
pub const HIDDEN_OPACITY: f32 = 0.0;
pub const VISIBLE_SCALE: f32 = 1.0;
pub const VISIBLE_OPACITY: f32 = 1.0;

// Cursor orientation
pub const SPIN_PERIOD_SEC: f32 = 3.0; // one full turn while free
pub const SNAP_STEP_DEG: f32 = 180.0; // reticule is symmetric under a half turn
pub const SNAP_BOUNCE: f32 = 0.3;
pub const SNAP_DURATION_SEC: f32 = 0.8; // perceptual duration used to derive the snap spring

// Cursor magnetism
pub const MAGNETIC_SNAP: f32 = 0.9; // fraction of the way pulled toward the target centre
pub const MAGNETIC_REACH_PX: f32 = 12.0; // slack around a target still counted as a hit
pub const PRESSED_SCALE_CAPTURED: f32 = 0.9;
pub const PRESSED_SCALE_FREE: f32 = 0.7;

// Spring integration
pub const SPRING_MAX_SUBSTEP_SEC: f32 = 1.0 / 240.0;
pub const SPRING_REST_DELTA: f32 = 0.001;
pub const SPRING_REST_SPEED: f32 = 0.01;
