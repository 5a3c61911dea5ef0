use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-terminating `requestAnimationFrame` loop.
///
/// `step` runs once per frame and returns whether another frame is wanted.
/// `start` is a no-op while a frame is pending, so a loop never runs twice
/// concurrently; `stop` cancels the pending frame.
pub struct FrameLoop {
    name: &'static str,
    handle: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl FrameLoop {
    pub fn new(name: &'static str, mut step: impl FnMut() -> bool + 'static) -> Self {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let tick_weak = Rc::downgrade(&tick);
        let handle_tick = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_tick.set(None);
            if !step() {
                return;
            }
            // step may have restarted us already
            if handle_tick.get().is_some() {
                return;
            }
            if let Some(tick) = tick_weak.upgrade() {
                handle_tick.set(request_frame(&tick));
            }
        }) as Box<dyn FnMut()>));
        Self { name, handle, tick }
    }

    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        self.handle.set(request_frame(&self.tick));
        if self.handle.get().is_none() {
            log::error!("[frame] could not schedule {} loop", self.name);
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// Frame duration in sixtieths of a second, measured between consecutive ticks
/// of one loop. The first tick after a (re)start counts as one frame.
#[derive(Default)]
pub struct FrameClock {
    last: Cell<Option<Instant>>,
}

impl FrameClock {
    pub fn dt_frames(&self) -> f32 {
        let now = Instant::now();
        let dt = match self.last.replace(Some(now)) {
            Some(prev) => (now - prev).as_secs_f32() * 60.0,
            None => 1.0,
        };
        dt.max(0.0)
    }

    pub fn reset(&self) {
        self.last.set(None);
    }
}
