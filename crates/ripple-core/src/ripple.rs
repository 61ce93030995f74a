//! Ripple lifecycle: `Idle -> Animating -> Idle`, keyed by a monotonically
//! increasing epoch.
//!
//! A trigger maps the interaction point to a cell, computes a fresh set of
//! radial delays, bumps the epoch and schedules the settle transition. The
//! settle transition only applies to the epoch it was scheduled for; anything
//! older is a silent no-op. Cell data is never patched in place: every
//! trigger installs a brand-new `CellPlan`.
//!
//! Typical usage:
//! - Construct with `RippleEngine::new(params, viewport, seed)`
//! - Call `resize(viewport)` from the resize listener before handling clicks
//! - Call `trigger(point)` per interaction and arm a timer for the returned
//!   `ScheduledSettle`, or call `tick(dt)` every frame and let the engine
//!   fire the settle itself
//! - Read `frames()` to drive the per-cell visuals

use crate::config::RippleParams;
use crate::delay::{compute_delays, settle_delay};
use crate::geometry::{OriginPoint, Rect};
use crate::grid::{compute_shape, GridLayout, GridShape};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::Duration;

/// Identifier of one trigger-to-settle cycle. Epoch 0 means "never triggered".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub u64);

impl Epoch {
    pub const ZERO: Epoch = Epoch(0);

    #[inline]
    pub fn next(self) -> Epoch {
        Epoch(self.0.saturating_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RippleState {
    #[default]
    Idle,
    Animating,
}

/// Externally observable phase. `Settled` behaves like `Idle` but is reached
/// through a settle transition rather than never having been triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RipplePhase {
    Idle,
    Animating,
    Settled,
}

/// Per-epoch cell data, replaced wholesale on every trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPlan {
    pub epoch: Epoch,
    pub origin_index: Option<usize>,
    pub delays: Vec<f32>,
}

impl CellPlan {
    fn hidden(epoch: Epoch, cell_count: usize) -> Self {
        Self {
            epoch,
            origin_index: None,
            delays: vec![0.0; cell_count],
        }
    }

    /// Stagger offset for a cell; the origin always starts immediately.
    pub fn stagger(&self, index: usize) -> f32 {
        if self.origin_index == Some(index) {
            return 0.0;
        }
        self.delays.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

/// What a renderer needs for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFrame {
    pub visible: bool,
    pub stagger_delay_sec: f32,
}

/// The settle transition a trigger scheduled.
///
/// - `after`: delay from the trigger until the settle should fire
/// - `due`: the same moment on the engine's own `tick` clock
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSettle {
    pub epoch: Epoch,
    pub origin_index: usize,
    pub after: Duration,
    pub due: Duration,
}

pub struct RippleEngine<R = StdRng> {
    params: RippleParams,
    layout: GridLayout,
    state: RippleState,
    epoch: Epoch,
    settled: Option<Epoch>,
    plan: CellPlan,
    pending: Option<ScheduledSettle>,
    clock: Duration,
    rng: R,
}

impl RippleEngine<StdRng> {
    /// Engine with a seeded `StdRng` for the delay noise.
    pub fn new(params: RippleParams, viewport: Vec2, seed: u64) -> Self {
        Self::with_rng(params, viewport, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RippleEngine<R> {
    /// Engine drawing delay noise from `rng`.
    pub fn with_rng(params: RippleParams, viewport: Vec2, rng: R) -> Self {
        let shape = compute_shape(
            viewport.x,
            viewport.y,
            params.grid.cell_size,
            params.grid.gap,
        );
        let layout = GridLayout::new(
            Rect::from_size(viewport),
            shape,
            params.grid.layout_gap,
            params.grid.padding,
        );
        log::info!(
            "[ripple] grid {}x{} for viewport {:.0}x{:.0}",
            shape.columns,
            shape.rows,
            viewport.x,
            viewport.y
        );
        Self {
            params,
            layout,
            state: RippleState::Idle,
            epoch: Epoch::ZERO,
            settled: None,
            plan: CellPlan::hidden(Epoch::ZERO, shape.cell_count()),
            pending: None,
            clock: Duration::ZERO,
            rng,
        }
    }

    #[inline]
    pub fn params(&self) -> &RippleParams {
        &self.params
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.layout.shape
    }

    #[inline]
    pub fn state(&self) -> RippleState {
        self.state
    }

    #[inline]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    #[inline]
    pub fn plan(&self) -> &CellPlan {
        &self.plan
    }

    #[inline]
    pub fn pending(&self) -> Option<ScheduledSettle> {
        self.pending
    }

    /// Time accumulated through `tick`.
    #[inline]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn phase(&self) -> RipplePhase {
        match self.state {
            RippleState::Animating => RipplePhase::Animating,
            RippleState::Idle if self.epoch != Epoch::ZERO && self.settled == Some(self.epoch) => {
                RipplePhase::Settled
            }
            RippleState::Idle => RipplePhase::Idle,
        }
    }

    /// Recompute the shape for a new viewport and make the grid span it.
    /// Returns true if the shape changed.
    ///
    /// A shape change stops a running ripple rather than replaying it on the
    /// new grid: the plan goes hidden, the state drops to `Idle` and the
    /// pending settle is forgotten. The epoch is kept, so a late settle for it
    /// is rejected by `settle`. Same-shape resizes leave the ripple running.
    pub fn resize(&mut self, viewport: Vec2) -> bool {
        let grid = &self.params.grid;
        let shape = compute_shape(viewport.x, viewport.y, grid.cell_size, grid.gap);
        self.layout.bounds = Rect::from_size(viewport);
        self.apply_shape(shape)
    }

    /// Place the grid somewhere other than the full viewport. The shape is
    /// still derived from the viewport passed to `resize`.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.layout.bounds = bounds;
    }

    fn apply_shape(&mut self, shape: GridShape) -> bool {
        if shape == self.layout.shape {
            return false;
        }
        log::info!(
            "[ripple] grid {}x{} -> {}x{}",
            self.layout.shape.columns,
            self.layout.shape.rows,
            shape.columns,
            shape.rows
        );
        self.layout.shape = shape;
        self.plan = CellPlan::hidden(self.epoch, shape.cell_count());
        if self.state == RippleState::Animating {
            log::debug!("[ripple] {} dropped by resize", self.epoch);
            self.state = RippleState::Idle;
            self.pending = None;
        }
        true
    }

    /// Start a new ripple from `point`, superseding any ripple in flight.
    pub fn trigger(&mut self, point: OriginPoint) -> ScheduledSettle {
        let origin_index = self.layout.cell_at(point.to_vec2());
        let centers = self.layout.cell_centers();
        let delays = compute_delays(
            &centers,
            origin_index,
            self.params.base_delay,
            self.params.noise,
            &mut self.rng,
        );
        let after = settle_delay(
            &delays,
            self.params.spring_settle_ms,
            self.params.fade_buffer_ms,
        );

        if let Some(old) = self.pending.take() {
            log::trace!("[ripple] {} superseded before settling", old.epoch);
        }
        self.epoch = self.epoch.next();
        self.plan = CellPlan {
            epoch: self.epoch,
            origin_index: Some(origin_index),
            delays,
        };
        self.state = RippleState::Animating;

        let scheduled = ScheduledSettle {
            epoch: self.epoch,
            origin_index,
            after,
            due: self.clock + after,
        };
        self.pending = Some(scheduled);

        let (row, col) = self.layout.row_col(origin_index);
        log::debug!(
            "[ripple] {} from ({:.1},{:.1}) -> cell {} (r{} c{}), settle in {} ms",
            self.epoch,
            point.x,
            point.y,
            origin_index,
            row,
            col,
            after.as_millis()
        );
        scheduled
    }

    /// Terminal transition for `epoch`. Stale or repeated settles are ignored.
    pub fn settle(&mut self, epoch: Epoch) -> bool {
        if epoch != self.epoch || self.state != RippleState::Animating {
            log::trace!(
                "[ripple] ignoring settle for {} (current {}, {:?})",
                epoch,
                self.epoch,
                self.state
            );
            return false;
        }
        self.state = RippleState::Idle;
        self.settled = Some(epoch);
        if self.pending.map(|p| p.epoch) == Some(epoch) {
            self.pending = None;
        }
        log::debug!("[ripple] {} settled", epoch);
        true
    }

    /// Advance the engine clock; fires the pending settle once it is due.
    pub fn tick(&mut self, dt: Duration) -> Option<Epoch> {
        self.clock += dt;
        let due = self.pending.filter(|p| p.due <= self.clock)?;
        self.pending = None;
        self.settle(due.epoch).then_some(due.epoch)
    }

    pub fn cell(&self, index: usize) -> Option<CellFrame> {
        if index >= self.plan.len() {
            return None;
        }
        Some(CellFrame {
            visible: self.state == RippleState::Animating,
            stagger_delay_sec: self.plan.stagger(index),
        })
    }

    pub fn frames(&self) -> impl Iterator<Item = CellFrame> + '_ {
        (0..self.plan.len()).filter_map(move |i| self.cell(i))
    }
}

impl<R> fmt::Debug for RippleEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RippleEngine")
            .field("shape", &self.layout.shape)
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("pending", &self.pending)
            .finish()
    }
}
