use crate::constants::MAGNETIC_SELECTOR;
use crate::input;
use anyhow::anyhow;
use glam::Vec2;
use ripple_core::{MagneticTargets, Rect};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn window_document() -> anyhow::Result<(web::Window, web::Document)> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;
    Ok((window, document))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("#{} is not a canvas: {:?}", id, e))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow!("get_context threw: {:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))
}

/// Resize the backing store to CSS size * devicePixelRatio; returns the ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f32 {
    let Some(w) = web::window() else {
        return 1.0;
    };
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    dpr as f32
}

pub fn viewport_size(window: &web::Window) -> Vec2 {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Vec2::new(read(window.inner_width()), read(window.inner_height()))
}

#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Current client-space boxes of every `.magnetic` element.
pub fn magnetic_targets(document: &web::Document) -> MagneticTargets {
    let mut targets = MagneticTargets::new();
    let Ok(list) = document.query_selector_all(MAGNETIC_SELECTOR) else {
        return targets;
    };
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            targets.push(element_rect(&el));
        }
    }
    targets
}

/// `(key, value)` pairs from the element's `data-*` attributes.
pub fn data_overrides(el: &web::Element) -> Vec<(String, String)> {
    let names: js_sys::Array = el.get_attribute_names();
    let attrs = names
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| el.get_attribute(&name).map(|value| (name, value)))
        .collect::<Vec<_>>();
    input::collect_overrides(attrs)
}
