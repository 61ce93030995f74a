//! Per-cell animation state for painting the grid.
//!
//! Each cell runs a unit spring on a `progress` value (0 = hidden, 1 =
//! visible) that starts moving once the cell's stagger delay has elapsed.
//! The whole set is rebuilt from scratch whenever the engine's epoch changes,
//! so nothing from a previous ripple carries over into the next one.

use crate::constants::{HIDDEN_OPACITY, HIDDEN_SCALE, VISIBLE_OPACITY, VISIBLE_SCALE};
use crate::motion::{Spring, SpringParams};
use crate::ripple::{Epoch, RippleEngine};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLook {
    pub progress: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl CellLook {
    pub fn from_progress(progress: f32) -> Self {
        Self {
            progress,
            scale: HIDDEN_SCALE + (VISIBLE_SCALE - HIDDEN_SCALE) * progress,
            opacity: (HIDDEN_OPACITY + (VISIBLE_OPACITY - HIDDEN_OPACITY) * progress)
                .clamp(0.0, 1.0),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }
}

#[derive(Clone, Debug)]
struct CellAnim {
    spring: Spring,
    visible: bool,
    wait: f32,
}

#[derive(Clone, Debug)]
pub struct CellVisuals {
    params: SpringParams,
    epoch: Option<Epoch>,
    cells: Vec<CellAnim>,
}

impl CellVisuals {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            epoch: None,
            cells: Vec::new(),
        }
    }

    #[inline]
    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Follow the engine. A new epoch (or a new cell count) remounts every
    /// cell in the hidden variant; a visibility flip restarts the cell's
    /// stagger countdown.
    pub fn sync<R: Rng>(&mut self, engine: &RippleEngine<R>) {
        let epoch = engine.epoch();
        if self.epoch != Some(epoch) || self.cells.len() != engine.plan().len() {
            self.cells = (0..engine.plan().len())
                .map(|_| CellAnim {
                    spring: Spring::new(self.params, 0.0),
                    visible: false,
                    wait: 0.0,
                })
                .collect();
            self.epoch = Some(epoch);
        }
        for (cell, frame) in self.cells.iter_mut().zip(engine.frames()) {
            if cell.visible != frame.visible {
                cell.visible = frame.visible;
                cell.wait = frame.stagger_delay_sec.max(0.0);
            }
        }
    }

    /// Advance every cell by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        for cell in &mut self.cells {
            let mut remaining = dt;
            if cell.wait > 0.0 {
                if remaining < cell.wait {
                    cell.wait -= remaining;
                    continue;
                }
                remaining -= cell.wait;
                cell.wait = 0.0;
            }
            cell.spring.set_target(if cell.visible { 1.0 } else { 0.0 });
            cell.spring.step(remaining);
        }
    }

    pub fn look(&self, index: usize) -> Option<CellLook> {
        self.cells
            .get(index)
            .map(|c| CellLook::from_progress(c.spring.value()))
    }

    pub fn looks(&self) -> impl Iterator<Item = CellLook> + '_ {
        self.cells
            .iter()
            .map(|c| CellLook::from_progress(c.spring.value()))
    }

    /// True once no cell is waiting or moving; painting can be skipped.
    pub fn is_at_rest(&self) -> bool {
        self.cells
            .iter()
            .all(|c| c.wait <= 0.0 && c.spring.is_at_rest() && c.spring.target() == target_of(c))
    }
}

fn target_of(cell: &CellAnim) -> f32 {
    if cell.visible {
        1.0
    } else {
        0.0
    }
}
