pub mod orientation;
pub mod pointer;
pub mod scroll;

use crate::core::Event;
use crate::dom;
use crate::plaza::Plaza;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM event listener that deregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Listen for `kind` events of type `E` on `target`. Events that are not
    /// an `E` are ignored. `passive: false` lets the handler call `prevent_default`.
    pub fn new<E>(
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: impl FnMut(E) + 'static,
    ) -> Self
    where
        E: JsCast + 'static,
    {
        let callback = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &opts,
        );
        Self {
            target: target.clone(),
            kind,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Re-run layout when the window size changes.
pub fn wire_resize(plaza: &Rc<Plaza>) -> Option<Listener> {
    let window = web::window()?;
    let weak = Rc::downgrade(plaza);
    let win = window.clone();
    Some(Listener::new(
        window.as_ref(),
        "resize",
        true,
        move |_: web::Event| {
            if let Some(p) = weak.upgrade() {
                p.dispatch(Event::ViewportChanged(dom::viewport(&win)));
            }
        },
    ))
}
