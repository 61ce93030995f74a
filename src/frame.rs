use crate::constants::MAX_FRAME_DT_SEC;
use crate::input;
use crate::paint::{self, Surface};
use instant::Instant;
use ripple_core::{CellVisuals, MagneticController, RippleEngine};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<RippleEngine>>,
    pub cursor: Rc<RefCell<MagneticController>>,
    pub visuals: CellVisuals,
    pub grid: Surface,
    pub cursor_surface: Option<Surface>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = input::clamp_frame_dt((now - self.last_instant).as_secs_f32(), MAX_FRAME_DT_SEC);
        self.last_instant = now;

        // ---------------- Grid ----------------
        {
            let engine = self.engine.borrow();
            let before = self.visuals.epoch();
            self.visuals.sync(&*engine);
            let remounted = before != self.visuals.epoch();
            let moving = !self.visuals.is_at_rest();
            self.visuals.step(dt);
            let resized = self.grid.sync_size();
            if moving || remounted || resized {
                paint::paint_grid(&self.grid, engine.layout(), self.visuals.looks());
            }
        }

        // ---------------- Cursor ----------------
        let frame = self
            .cursor
            .borrow_mut()
            .tick(Duration::from_secs_f32(dt));
        if let Some(surface) = self.cursor_surface.as_mut() {
            surface.sync_size();
            paint::paint_cursor(surface, &frame);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
