use super::Listener;
use crate::core::{tilt_to_parallax, Event};
use crate::plaza::Plaza;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

enum Permission {
    Unsupported,
    NotRequired,
    Pending(js_sys::Promise),
}

/// On the first touch of a compact viewport, ask for device-orientation access
/// (iOS gates it behind a user gesture) and feed tilt into the parallax.
/// Denied or unsupported simply leaves the parallax pointer-driven.
pub fn wire_first_touch(plaza: &Rc<Plaza>) -> Option<Listener> {
    let window = web::window()?;
    let weak = Rc::downgrade(plaza);
    let asked = Cell::new(false);
    Some(Listener::new(
        window.as_ref(),
        "touchstart",
        true,
        move |_: web::TouchEvent| {
            if asked.get() {
                return;
            }
            let Some(p) = weak.upgrade() else { return };
            if !p.state.borrow().viewport.is_compact() {
                return;
            }
            asked.set(true);
            match request_permission() {
                Permission::Unsupported => log::info!("[input] device orientation unsupported"),
                Permission::NotRequired => attach(&weak),
                Permission::Pending(promise) => {
                    let weak = weak.clone();
                    spawn_local(async move {
                        match JsFuture::from(promise).await {
                            Ok(v) if v.as_string().as_deref() == Some("granted") => attach(&weak),
                            _ => log::info!("[input] device orientation permission denied"),
                        }
                    });
                }
            }
        },
    ))
}

fn request_permission() -> Permission {
    let ctor = match js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("DeviceOrientationEvent")) {
        Ok(c) if !c.is_undefined() => c,
        _ => return Permission::Unsupported,
    };
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    let Some(request) = request else {
        return Permission::NotRequired;
    };
    match request.call0(&ctor).map(|v| v.dyn_into::<js_sys::Promise>()) {
        Ok(Ok(promise)) => Permission::Pending(promise),
        _ => Permission::Unsupported,
    }
}

fn attach(weak: &Weak<Plaza>) {
    let (Some(plaza), Some(window)) = (weak.upgrade(), web::window()) else {
        return;
    };
    let weak = weak.clone();
    let listener = Listener::new(
        window.as_ref(),
        "deviceorientation",
        true,
        move |ev: web::DeviceOrientationEvent| {
            let (Some(gamma), Some(beta)) = (ev.gamma(), ev.beta()) else {
                return;
            };
            if let Some(p) = weak.upgrade() {
                p.dispatch(Event::PointerTarget(tilt_to_parallax(gamma as f32, beta as f32)));
            }
        },
    );
    plaza.keep_listener(listener);
    log::info!("[input] device orientation attached");
}
