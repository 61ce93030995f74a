use crate::dom;
use glam::Vec2;
use gloo::events::EventListener;
use ripple_core::MagneticController;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer move/down/up/cancel on the window, feeding the cursor controller.
/// Magnetic targets are re-read on every move so scrolled or re-laid-out
/// elements are hit-tested where they currently are.
pub fn wire_pointer(
    window: &web::Window,
    document: web::Document,
    cursor: Rc<RefCell<MagneticController>>,
    reach: f32,
) -> Vec<EventListener> {
    let on_move = {
        let cursor = cursor.clone();
        EventListener::new(window, "pointermove", move |ev: &web::Event| {
            let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let point = Vec2::new(pe.client_x() as f32, pe.client_y() as f32);
            let proximity = dom::magnetic_targets(&document).proximity(point, reach);
            let mut c = cursor.borrow_mut();
            c.pointer_moved(point);
            c.on_proximity(proximity);
        })
    };

    let pressed = |name: &'static str, down: bool| {
        let cursor = cursor.clone();
        EventListener::new(window, name, move |_| {
            cursor.borrow_mut().set_pressed(down);
        })
    };

    vec![
        on_move,
        pressed("pointerdown", true),
        pressed("pointerup", false),
        pressed("pointercancel", false),
    ]
}
