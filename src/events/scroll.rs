use super::Listener;
use crate::constants::DROPDOWN_SELECTOR;
use crate::core::{Event, ScrollInput};
use crate::dom;
use crate::plaza::Plaza;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Wheel and touch-drag listeners driving the depth scroll.
///
/// Only alive while no filter is active; the plaza drops them on entering
/// filtered mode so the page scrolls normally there.
pub fn wire(plaza: &Rc<Plaza>) -> Vec<Listener> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let target: &web::EventTarget = window.as_ref();
    let last_touch_y: Rc<Cell<Option<f32>>> = Rc::new(Cell::new(None));

    let weak = Rc::downgrade(plaza);
    let wheel = Listener::new(target, "wheel", false, move |ev: web::WheelEvent| {
        if dom::target_within(&ev, DROPDOWN_SELECTOR) {
            return;
        }
        ev.prevent_default();
        if let Some(p) = weak.upgrade() {
            p.dispatch(Event::Scroll(ScrollInput::Wheel {
                delta_y: ev.delta_y() as f32,
            }));
        }
    });

    let last_start = last_touch_y.clone();
    let touch_start = Listener::new(target, "touchstart", false, move |ev: web::TouchEvent| {
        last_start.set(first_touch_y(&ev));
    });

    let weak = Rc::downgrade(plaza);
    let last_move = last_touch_y.clone();
    let touch_move = Listener::new(target, "touchmove", false, move |ev: web::TouchEvent| {
        let Some(last) = last_move.get() else {
            return;
        };
        if dom::target_within(&ev, DROPDOWN_SELECTOR) {
            return;
        }
        let Some(y) = first_touch_y(&ev) else {
            return;
        };
        ev.prevent_default();
        last_move.set(Some(y));
        if let Some(p) = weak.upgrade() {
            p.dispatch(Event::Scroll(ScrollInput::Touch { delta_y: last - y }));
        }
    });

    let last_end = last_touch_y;
    let touch_end = Listener::new(target, "touchend", true, move |_: web::TouchEvent| {
        last_end.set(None);
    });

    vec![wheel, touch_start, touch_move, touch_end]
}

#[inline]
fn first_touch_y(ev: &web::TouchEvent) -> Option<f32> {
    ev.touches().get(0).map(|t| t.client_y() as f32)
}
