use glam::Vec2;
use ripple_core::Rect;

const CORNER_SIGNS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Four L-shaped brackets framing `center`, clockwise from the top-left.
/// Each bracket is `[arm end, corner, arm end]`, already rotated and scaled.
pub fn reticule_corners(
    center: Vec2,
    half_extent: f32,
    arm: f32,
    rotation_deg: f32,
    scale: f32,
) -> [[Vec2; 3]; 4] {
    let rot = Vec2::from_angle(rotation_deg.to_radians());
    let place = |p: Vec2| center + rot.rotate(p) * scale;
    CORNER_SIGNS.map(|(sx, sy)| {
        let corner = Vec2::new(sx * half_extent, sy * half_extent);
        [
            place(corner - Vec2::new(sx * arm, 0.0)),
            place(corner),
            place(corner - Vec2::new(0.0, sy * arm)),
        ]
    })
}

/// A cell rectangle scaled about its centre and mapped into canvas pixels.
pub fn cell_paint_rect(cell: Rect, scale: f32, canvas_origin: Vec2, dpr: f32) -> Rect {
    let r = cell.scaled(scale);
    Rect {
        origin: (r.origin - canvas_origin) * dpr,
        size: r.size * dpr,
    }
}

/// CSS colour with the cell opacity folded into the alpha channel.
pub fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        rgb[0],
        rgb[1],
        rgb[2],
        alpha.clamp(0.0, 1.0)
    )
}
