use crate::dom;
use crate::settle::SettleTimer;
use gloo::events::EventListener;
use ripple_core::RippleEngine;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Recompute the grid for the current viewport and place it over the grid
/// canvas. Returns true if the shape changed.
pub fn fit_engine(
    engine: &mut RippleEngine,
    window: &web::Window,
    grid_canvas: &web::HtmlCanvasElement,
) -> bool {
    let reshaped = engine.resize(dom::viewport_size(window));
    engine.set_bounds(dom::element_rect(grid_canvas));
    reshaped
}

/// Runs synchronously in the resize event so the next click already maps
/// against the new shape.
pub fn wire_resize(
    window: &web::Window,
    engine: Rc<RefCell<RippleEngine>>,
    grid_canvas: web::HtmlCanvasElement,
    settle_timer: Rc<SettleTimer>,
) -> EventListener {
    let win = window.clone();
    EventListener::new(window, "resize", move |_| {
        let reshaped = fit_engine(&mut engine.borrow_mut(), &win, &grid_canvas);
        if reshaped {
            // the engine dropped its pending settle along with the plan
            settle_timer.cancel();
        }
    })
}
