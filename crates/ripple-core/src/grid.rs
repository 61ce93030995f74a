//! Responsive grid shape and on-screen cell layout.

use crate::constants::MIN_GRID_DIM;
use crate::geometry::Rect;
use glam::Vec2;

/// Column/row count of the ripple grid. Both are at least `MIN_GRID_DIM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub columns: u32,
    pub rows: u32,
}

impl GridShape {
    pub const MIN: GridShape = GridShape {
        columns: MIN_GRID_DIM,
        rows: MIN_GRID_DIM,
    };

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::MIN
    }
}

/// Derive the grid shape from the viewport size.
///
/// `columns = max(5, floor((width - gap) / (cell_size + gap)))`, rows alike.
/// Degenerate inputs (zero, negative, NaN) fall back to the minimum shape.
pub fn compute_shape(
    viewport_width: f32,
    viewport_height: f32,
    cell_size: f32,
    gap: f32,
) -> GridShape {
    GridShape {
        columns: fit_count(viewport_width, cell_size, gap),
        rows: fit_count(viewport_height, cell_size, gap),
    }
}

fn fit_count(extent: f32, cell_size: f32, gap: f32) -> u32 {
    let pitch = cell_size + gap;
    if !(pitch > 0.0) || !pitch.is_finite() || !extent.is_finite() {
        return MIN_GRID_DIM;
    }
    let n = ((extent - gap) / pitch).floor();
    if n > MIN_GRID_DIM as f32 {
        n as u32
    } else {
        MIN_GRID_DIM
    }
}

/// Placement of a `GridShape` on screen: evenly sized cells inside `bounds`,
/// inset by `padding` and separated by `gap`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub bounds: Rect,
    pub shape: GridShape,
    pub gap: f32,
    pub padding: f32,
}

impl GridLayout {
    pub fn new(bounds: Rect, shape: GridShape, gap: f32, padding: f32) -> Self {
        Self {
            bounds,
            shape,
            gap,
            padding,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }

    #[inline]
    pub fn index_of(&self, row: u32, col: u32) -> usize {
        row as usize * self.shape.columns as usize + col as usize
    }

    #[inline]
    pub fn row_col(&self, index: usize) -> (u32, u32) {
        let cols = self.shape.columns as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }

    /// Painted size of a single cell.
    pub fn cell_size(&self) -> Vec2 {
        let cols = self.shape.columns as f32;
        let rows = self.shape.rows as f32;
        let inner = self.bounds.size - Vec2::splat(2.0 * self.padding);
        Vec2::new(
            ((inner.x - self.gap * (cols - 1.0)) / cols).max(0.0),
            ((inner.y - self.gap * (rows - 1.0)) / rows).max(0.0),
        )
    }

    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.cell_count() {
            return None;
        }
        let (row, col) = self.row_col(index);
        let size = self.cell_size();
        let pitch = size + Vec2::splat(self.gap);
        let origin = self.bounds.origin
            + Vec2::splat(self.padding)
            + Vec2::new(col as f32 * pitch.x, row as f32 * pitch.y);
        Some(Rect { origin, size })
    }

    /// Centres of every cell in linear index order.
    pub fn cell_centers(&self) -> Vec<Vec2> {
        (0..self.cell_count())
            .filter_map(|i| self.cell_rect(i))
            .map(|r| r.center())
            .collect()
    }

    /// Map a point to the cell beneath it. Row and column are clamped
    /// independently, so points outside the bounds land on the nearest edge cell.
    pub fn cell_at(&self, point: Vec2) -> usize {
        let cell_w = self.bounds.width() / self.shape.columns as f32;
        let cell_h = self.bounds.height() / self.shape.rows as f32;
        let col = clamp_index((point.x - self.bounds.left()) / cell_w, self.shape.columns);
        let row = clamp_index((point.y - self.bounds.top()) / cell_h, self.shape.rows);
        self.index_of(row, col)
    }
}

fn clamp_index(raw: f32, count: u32) -> u32 {
    let v = raw.floor();
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, count.saturating_sub(1) as f32) as u32
}
