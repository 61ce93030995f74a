use crate::constants::*;
use crate::dom;
use crate::input;
use crate::shapes;
use glam::Vec2;
use ripple_core::{CellLook, CursorFrame, GridLayout, Rect};
use std::f64::consts::TAU;
use web_sys as web;

/// A canvas plus its 2D context, tracking the backing-store size and the
/// canvas's position in client space.
pub struct Surface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    client_rect: Rect,
    dpr: f32,
}

impl Surface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas)?;
        let mut surface = Self {
            canvas,
            ctx,
            client_rect: Rect::default(),
            dpr: 1.0,
        };
        surface.sync_size();
        Ok(surface)
    }

    /// Match the backing store to CSS size * devicePixelRatio. Returns true
    /// if anything moved or resized, meaning the previous paint is stale.
    pub fn sync_size(&mut self) -> bool {
        let dpr = dom::sync_canvas_backing_size(&self.canvas);
        let rect = dom::element_rect(&self.canvas);
        let changed = rect != self.client_rect || dpr != self.dpr;
        self.client_rect = rect;
        self.dpr = dpr;
        changed
    }

    fn backing(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn to_canvas(&self, client: Vec2) -> Vec2 {
        input::client_to_canvas_px(client, self.client_rect, self.backing())
    }

    fn clear(&self) {
        let size = self.backing();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }
}

/// Paint every visible cell. Positions come from the engine's layout (client
/// space); scale and opacity from the per-cell visuals.
pub fn paint_grid(surface: &Surface, layout: &GridLayout, looks: impl Iterator<Item = CellLook>) {
    surface.clear();
    let ctx = &surface.ctx;
    for (i, look) in looks.enumerate() {
        if look.is_hidden() {
            continue;
        }
        let Some(cell) = layout.cell_rect(i) else {
            continue;
        };
        let r = shapes::cell_paint_rect(cell, look.scale, surface.client_rect.origin, surface.dpr);
        ctx.set_fill_style_str(&shapes::rgba(CELL_RGB, look.opacity));
        ctx.fill_rect(
            r.left() as f64,
            r.top() as f64,
            r.width() as f64,
            r.height() as f64,
        );
    }
}

/// Pointer dot plus the four-bracket reticule.
pub fn paint_cursor(surface: &Surface, frame: &CursorFrame) {
    surface.clear();
    let ctx = &surface.ctx;
    let dpr = surface.dpr;

    let dot = surface.to_canvas(frame.pointer);
    ctx.set_fill_style_str(&shapes::rgba(RETICULE_RGB, 1.0));
    ctx.begin_path();
    _ = ctx.arc(
        dot.x as f64,
        dot.y as f64,
        DOT_RADIUS_PX * dpr as f64,
        0.0,
        TAU,
    );
    ctx.fill();

    let center = surface.to_canvas(frame.reticule);
    let corners = shapes::reticule_corners(
        center,
        RETICULE_HALF_EXTENT_PX * dpr,
        RETICULE_ARM_PX * dpr,
        frame.rotation_deg,
        frame.scale,
    );
    ctx.set_stroke_style_str(&shapes::rgba(RETICULE_RGB, 1.0));
    ctx.set_line_width(RETICULE_LINE_WIDTH_PX * dpr as f64);
    for [a, corner, b] in corners {
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(corner.x as f64, corner.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.stroke();
    }
}
