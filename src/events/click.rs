use crate::constants::{LOGO_ID, TRIGGER_SELECTOR};
use gloo::events::EventListener;
use ripple_core::OriginPublisher;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One delegated click listener on the document: any click inside a
/// `.ripple-trigger` element or the logo publishes its client position.
pub fn wire_triggers(document: &web::Document, publisher: OriginPublisher) -> EventListener {
    let selector = format!("{}, #{}", TRIGGER_SELECTOR, LOGO_ID);
    EventListener::new(document, "click", move |ev: &web::Event| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        if !matches!(target.closest(&selector), Ok(Some(_))) {
            return;
        }
        if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
            let (x, y) = (m.client_x() as f32, m.client_y() as f32);
            log::debug!("[origin] click at ({}, {})", x, y);
            publisher.publish(x, y);
        }
    })
}
