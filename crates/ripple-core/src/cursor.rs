//! Magnetic cursor orientation.
//!
//! While no magnetic target is under the pointer the reticule spins at a
//! constant rate. Once a target captures it, the spin is cancelled and the
//! rotation springs to the nearest half turn. The reticule is symmetric under
//! 180 degrees, so snapping to half turns halves the travel without any
//! visible difference.

use crate::config::CursorParams;
use crate::geometry::Rect;
use crate::motion::{Spin, Spring};
use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

// rest thresholds for a value measured in degrees
const ROTATION_REST_DEG: f32 = 0.05;
const ROTATION_REST_DEG_PER_SEC: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrientationState {
    #[default]
    Free,
    Captured,
}

/// Per pointer-move report from the hit-testing side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProximityEvent {
    pub over_target: bool,
    pub target: Option<Rect>,
}

impl ProximityEvent {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn captured(target: Rect) -> Self {
        Self {
            over_target: true,
            target: Some(target),
        }
    }

    /// A target only counts when both the flag and the bounding box are present.
    fn captured_box(&self) -> Option<Rect> {
        if self.over_target {
            self.target
        } else {
            None
        }
    }
}

/// Everything a renderer needs to paint the cursor for one frame.
///
/// - `pointer`: raw pointer position (the small dot)
/// - `reticule`: reticule centre, pulled towards a captured target
/// - `rotation_deg`: reticule rotation, unbounded
/// - `scale`: reticule scale, reduced while pressed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    pub pointer: Vec2,
    pub reticule: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
}

#[derive(Clone, Debug)]
enum Rotation {
    Spin(Spin),
    Snap(Spring),
}

impl Rotation {
    fn velocity(&self) -> f32 {
        match self {
            Rotation::Spin(s) => s.velocity(),
            Rotation::Snap(s) => s.velocity(),
        }
    }
}

/// Nearest multiple of `step`; exact halves round towards +inf.
pub fn nearest_multiple(angle: f32, step: f32) -> f32 {
    if !(step > 0.0) || !angle.is_finite() {
        return angle;
    }
    (angle / step + 0.5).floor() * step
}

pub struct MagneticController {
    params: CursorParams,
    state: OrientationState,
    target: Option<Rect>,
    rotation: f32,
    motion: Rotation,
    pointer: Vec2,
    pressed: bool,
}

impl MagneticController {
    /// Starts free, spinning from 0 degrees.
    pub fn new(params: CursorParams) -> Self {
        let motion = Rotation::Spin(Spin::new(0.0, params.spin_period_sec));
        Self {
            params,
            state: OrientationState::Free,
            target: None,
            rotation: 0.0,
            motion,
            pointer: Vec2::ZERO,
            pressed: false,
        }
    }

    /// Restart the current motion from `deg`.
    pub fn with_rotation(mut self, deg: f32) -> Self {
        self.rotation = deg;
        match self.state {
            OrientationState::Free => self.start_spin(),
            OrientationState::Captured => self.start_snap(),
        }
        self
    }

    #[inline]
    pub fn state(&self) -> OrientationState {
        self.state
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    /// Angle the snap spring is heading to, if currently captured.
    pub fn snap_target(&self) -> Option<f32> {
        match &self.motion {
            Rotation::Snap(s) => Some(s.target()),
            Rotation::Spin(_) => None,
        }
    }

    pub fn on_proximity(&mut self, ev: ProximityEvent) {
        match (self.state, ev.captured_box()) {
            (OrientationState::Free, None) => {}
            (OrientationState::Captured, Some(rect)) if self.target == Some(rect) => {}
            (prev, Some(rect)) => {
                self.target = Some(rect);
                self.state = OrientationState::Captured;
                self.start_snap();
                log::debug!(
                    "[cursor] {:?} -> Captured at {:.1}deg, snapping to {:.0}deg",
                    prev,
                    self.rotation,
                    self.snap_target().unwrap_or(self.rotation)
                );
            }
            (OrientationState::Captured, None) => {
                self.target = None;
                self.state = OrientationState::Free;
                self.start_spin();
                log::debug!("[cursor] released at {:.1}deg, spinning", self.rotation);
            }
        }
    }

    fn start_spin(&mut self) {
        self.motion = Rotation::Spin(Spin::new(self.rotation, self.params.spin_period_sec));
    }

    fn start_snap(&mut self) {
        let target = nearest_multiple(self.rotation, self.params.snap_step_deg);
        let mut spring = Spring::new(self.params.snap_spring, self.rotation)
            .with_velocity(self.motion.velocity())
            .with_rest(ROTATION_REST_DEG, ROTATION_REST_DEG_PER_SEC);
        spring.set_target(target);
        self.motion = Rotation::Snap(spring);
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Advance the active rotation and return the frame to paint.
    pub fn tick(&mut self, dt: Duration) -> CursorFrame {
        let dt = dt.as_secs_f32();
        self.rotation = match &mut self.motion {
            Rotation::Spin(s) => s.step(dt),
            Rotation::Snap(s) => s.step(dt),
        };
        self.frame()
    }

    pub fn frame(&self) -> CursorFrame {
        let reticule = match self.target {
            Some(rect) if self.state == OrientationState::Captured => {
                self.pointer + (rect.center() - self.pointer) * self.params.magnetic_snap
            }
            _ => self.pointer,
        };
        let scale = match (self.pressed, self.state) {
            (false, _) => 1.0,
            (true, OrientationState::Captured) => self.params.pressed_scale_captured,
            (true, OrientationState::Free) => self.params.pressed_scale_free,
        };
        CursorFrame {
            pointer: self.pointer,
            reticule,
            rotation_deg: self.rotation,
            scale,
        }
    }
}

/// Bounding boxes of the magnetic elements currently on the page.
#[derive(Clone, Debug, Default)]
pub struct MagneticTargets {
    rects: SmallVec<[Rect; 8]>,
}

impl MagneticTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn push(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    pub fn proximity(&self, point: Vec2, reach: f32) -> ProximityEvent {
        match hit_test(&self.rects, point, reach) {
            Some(rect) => ProximityEvent::captured(rect),
            None => ProximityEvent::free(),
        }
    }
}

impl FromIterator<Rect> for MagneticTargets {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}

/// First target containing `point`, otherwise the nearest one within `reach`.
pub fn hit_test(targets: &[Rect], point: Vec2, reach: f32) -> Option<Rect> {
    if let Some(r) = targets.iter().find(|r| r.contains(point)) {
        return Some(*r);
    }
    targets
        .iter()
        .map(|r| (*r, r.distance_to(point)))
        .filter(|(_, d)| *d <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(r, _)| r)
}
