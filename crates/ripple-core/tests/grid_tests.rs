// Host-side tests for grid sizing and cell mapping.

use glam::Vec2;
use ripple_core::{compute_shape, GridLayout, GridShape, Rect};

fn layout_1000x600() -> GridLayout {
    let shape = compute_shape(1000.0, 600.0, 80.0, 2.0);
    GridLayout::new(Rect::new(0.0, 0.0, 1000.0, 600.0), shape, 10.0, 10.0)
}

#[test]
fn compute_shape_matches_floor_formula() {
    // (1920 - 2) / 82 = 23.39, (1080 - 2) / 82 = 13.14
    let shape = compute_shape(1920.0, 1080.0, 80.0, 2.0);
    assert_eq!(shape, GridShape { columns: 23, rows: 13 });
}

#[test]
fn compute_shape_never_drops_below_five() {
    let sizes = [-500.0, 0.0, 1.0, 99.0, 410.0, 799.0, 1280.0, 3840.0];
    let cells = [1.0, 10.0, 80.0, 500.0];
    let gaps = [0.0, 2.0, 10.0];
    for &w in &sizes {
        for &h in &sizes {
            for &cell in &cells {
                for &gap in &gaps {
                    let s = compute_shape(w, h, cell, gap);
                    assert!(
                        s.columns >= 5 && s.rows >= 5,
                        "shape {:?} for w={w} h={h} cell={cell} gap={gap}",
                        s
                    );
                }
            }
        }
    }
}

#[test]
fn compute_shape_degenerate_inputs_yield_minimum() {
    assert_eq!(compute_shape(0.0, 0.0, 80.0, 2.0), GridShape::MIN);
    assert_eq!(compute_shape(-100.0, -1.0, 80.0, 2.0), GridShape::MIN);
    assert_eq!(compute_shape(f32::NAN, 600.0, 80.0, 2.0).columns, 5);
    assert_eq!(compute_shape(1000.0, f32::INFINITY, 80.0, 2.0).rows, 5);
    // zero pitch must not divide by zero
    assert_eq!(compute_shape(1000.0, 1000.0, 0.0, 0.0), GridShape::MIN);
    assert_eq!(compute_shape(1000.0, 1000.0, -80.0, 2.0), GridShape::MIN);
}

#[test]
fn cell_at_maps_inside_points() {
    let layout = layout_1000x600();
    assert_eq!(layout.shape, GridShape { columns: 12, rows: 7 });
    let cell_w = 1000.0 / 12.0;
    let cell_h = 600.0 / 7.0;
    let p = Vec2::new(cell_w * 3.0 + 1.0, cell_h * 2.0 + 1.0);
    assert_eq!(layout.cell_at(p), 2 * 12 + 3);
    assert_eq!(layout.cell_at(Vec2::new(0.0, 0.0)), 0);
}

#[test]
fn cell_at_clamps_far_outside_points() {
    let layout = layout_1000x600();
    // far right and above: rightmost column of the top row
    assert_eq!(layout.cell_at(Vec2::new(1000.0 + 1000.0, -500.0)), 11);
    // far left and below: leftmost column of the bottom row
    assert_eq!(layout.cell_at(Vec2::new(-50.0, 5000.0)), 6 * 12);
    // far beyond both edges: last cell
    assert_eq!(layout.cell_at(Vec2::new(1e9, 1e9)), layout.cell_count() - 1);
}

#[test]
fn cell_at_handles_non_finite_points() {
    let layout = layout_1000x600();
    assert_eq!(layout.cell_at(Vec2::new(f32::NAN, f32::NAN)), 0);
    assert_eq!(
        layout.cell_at(Vec2::new(f32::INFINITY, f32::NEG_INFINITY)),
        11
    );
}

#[test]
fn cell_at_respects_offset_bounds() {
    let shape = GridShape { columns: 5, rows: 5 };
    let layout = GridLayout::new(Rect::new(100.0, 200.0, 500.0, 500.0), shape, 0.0, 0.0);
    assert_eq!(layout.cell_at(Vec2::new(150.0, 250.0)), 0);
    assert_eq!(layout.cell_at(Vec2::new(550.0, 650.0)), 24);
    assert_eq!(layout.cell_at(Vec2::new(50.0, 650.0)), 20);
}

#[test]
fn cell_rects_tile_the_padded_bounds() {
    let layout = layout_1000x600();
    // (1000 - 2*10 - 11*10) / 12 = 72.5, (600 - 2*10 - 6*10) / 7 = 74.2857
    let size = layout.cell_size();
    assert!((size.x - 72.5).abs() < 1e-4);
    assert!((size.y - 520.0 / 7.0).abs() < 1e-4);

    let first = layout.cell_rect(0).unwrap();
    assert!((first.left() - 10.0).abs() < 1e-4);
    assert!((first.top() - 10.0).abs() < 1e-4);

    let last = layout.cell_rect(layout.cell_count() - 1).unwrap();
    assert!((last.right() - 990.0).abs() < 1e-3);
    assert!((last.bottom() - 590.0).abs() < 1e-3);

    assert!(layout.cell_rect(layout.cell_count()).is_none());
}

#[test]
fn cell_centers_follow_index_order() {
    let layout = layout_1000x600();
    let centers = layout.cell_centers();
    assert_eq!(centers.len(), 84);
    assert!((centers[0].x - 46.25).abs() < 1e-3);
    assert!(centers[1].x > centers[0].x);
    assert!(centers[12].y > centers[0].y);
    assert!((centers[12].x - centers[0].x).abs() < 1e-4);
    for c in &centers {
        assert!(layout.bounds.contains(*c));
    }
}

#[test]
fn row_col_and_index_agree() {
    let layout = layout_1000x600();
    assert_eq!(layout.row_col(27), (2, 3));
    assert_eq!(layout.index_of(2, 3), 27);
    assert_eq!(layout.row_col(83), (6, 11));
}
