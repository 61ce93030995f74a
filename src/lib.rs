#![cfg(target_arch = "wasm32")]
use crate::constants::{CURSOR_CANVAS_ID, GRID_CANVAS_ID};
use crate::settle::SettleTimer;
use gloo::events::EventListener;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_core::{CellVisuals, Config, MagneticController, RippleEngine, Session, Subscription};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod paint;
mod settle;
mod shapes;

/// Everything that must live as long as the page: the session, the grid's
/// subscription and every DOM listener. Dropping it unwires the effect.
struct App {
    _session: Session,
    _subscription: Subscription,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Defaults overridden by the grid canvas's `data-*` attributes. A bad
/// override is logged and skipped; the rest still apply.
fn load_config(grid_canvas: &web::HtmlCanvasElement) -> Config {
    let mut config = Config::default();
    for (key, value) in dom::data_overrides(grid_canvas) {
        if let Err(e) = config.apply_override(&key, &value) {
            log::warn!("[config] ignoring data-{}=\"{}\": {}", key, value, e);
        }
    }
    config
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ripple-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let (window, document) = dom::window_document()?;

    let grid_canvas = dom::canvas_by_id(&document, GRID_CANVAS_ID)?;
    let cursor_surface = match dom::canvas_by_id(&document, CURSOR_CANVAS_ID)
        .and_then(paint::Surface::new)
    {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("[cursor] not painted: {:?}", e);
            None
        }
    };

    let session = Session::new(load_config(&grid_canvas))?;
    let config = session.config().clone();

    let engine = Rc::new(RefCell::new(RippleEngine::with_rng(
        config.ripple.clone(),
        dom::viewport_size(&window),
        StdRng::from_entropy(),
    )));
    events::fit_engine(&mut engine.borrow_mut(), &window, &grid_canvas);

    // Grid owner: each published origin starts a ripple and arms its settle.
    let settle_timer = Rc::new(SettleTimer::default());
    let subscription = {
        let engine = engine.clone();
        let settle_timer = settle_timer.clone();
        session.subscriber().on_publish(move |origin| {
            let scheduled = engine.borrow_mut().trigger(origin);
            settle_timer.arm(&engine, scheduled);
        })
    };

    let cursor = Rc::new(RefCell::new(MagneticController::new(config.cursor.clone())));

    let mut listeners = vec![
        events::wire_triggers(&document, session.publisher()),
        events::wire_resize(&window, engine.clone(), grid_canvas.clone(), settle_timer),
    ];
    listeners.extend(events::wire_pointer(
        &window,
        document.clone(),
        cursor.clone(),
        config.cursor.magnetic_reach_px,
    ));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine: engine.clone(),
        cursor,
        visuals: CellVisuals::new(config.ripple.cell_spring),
        grid: paint::Surface::new(grid_canvas)?,
        cursor_surface,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    log::info!("[ripple] ready, grid {:?}", engine.borrow().shape());
    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _session: session,
            _subscription: subscription,
            _listeners: listeners,
        });
    });
    Ok(())
}
