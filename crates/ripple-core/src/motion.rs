//! Frame-stepped animation primitives: a damped spring and a linear spin.
//!
//! Both are advanced explicitly with `step(dt)` by whoever owns the frame
//! loop; neither keeps a clock of its own.

use crate::constants::{SPRING_MAX_SUBSTEP_SEC, SPRING_REST_DELTA, SPRING_REST_SPEED};
use std::f32::consts::TAU;

/// Physical description of a spring: `a = (-k * (x - target) - c * v) / m`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringParams {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Derive stiffness/damping from a perceptual `bounce` (0 = critically
    /// damped, towards 1 = very springy) and an approximate duration.
    pub fn from_bounce(bounce: f32, duration_sec: f32) -> Self {
        let bounce = bounce.clamp(0.0, 0.95);
        let duration = duration_sec.max(0.01);
        let damping_ratio = 1.0 - bounce;
        let omega = TAU / duration;
        Self {
            stiffness: omega * omega,
            damping: 2.0 * damping_ratio * omega,
            mass: 1.0,
        }
    }

    /// Ratio to critical damping; below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A single scalar driven towards `target` by a spring.
#[derive(Clone, Debug)]
pub struct Spring {
    params: SpringParams,
    value: f32,
    velocity: f32,
    target: f32,
    rest_delta: f32,
    rest_speed: f32,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(params: SpringParams, value: f32) -> Self {
        Self {
            params,
            value,
            velocity: 0.0,
            target: value,
            rest_delta: SPRING_REST_DELTA,
            rest_speed: SPRING_REST_SPEED,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Override the rest thresholds, e.g. for values measured in degrees.
    pub fn with_rest(mut self, delta: f32, speed: f32) -> Self {
        self.rest_delta = delta;
        self.rest_speed = speed;
        self
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() <= self.rest_delta && self.velocity.abs() <= self.rest_speed
    }

    /// Advance by `dt` seconds using semi-implicit Euler with bounded substeps.
    pub fn step(&mut self, dt: f32) -> f32 {
        if !(dt > 0.0) || !dt.is_finite() {
            return self.value;
        }
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
            return self.value;
        }
        let n = (dt / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / n as f32;
        let SpringParams {
            stiffness: k,
            damping: c,
            mass: m,
        } = self.params;
        for _ in 0..n {
            let accel = (-k * (self.value - self.target) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

/// Unbounded linear rotation: `start + 360 * (t mod period) / period`,
/// repeating forever.
#[derive(Clone, Debug)]
pub struct Spin {
    start_deg: f32,
    period_sec: f32,
    phase_sec: f32,
}

impl Spin {
    pub fn new(start_deg: f32, period_sec: f32) -> Self {
        Self {
            start_deg,
            period_sec: period_sec.max(f32::EPSILON),
            phase_sec: 0.0,
        }
    }

    pub fn step(&mut self, dt: f32) -> f32 {
        if dt > 0.0 && dt.is_finite() {
            self.phase_sec = (self.phase_sec + dt) % self.period_sec;
        }
        self.value()
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.start_deg + 360.0 * (self.phase_sec / self.period_sec)
    }

    /// Degrees per second.
    #[inline]
    pub fn velocity(&self) -> f32 {
        360.0 / self.period_sec
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start_deg
    }
}
