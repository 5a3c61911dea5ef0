use super::Listener;
use crate::constants::{FADE_IN_CLASS, HOVER_ANIMATION};
use crate::core::{pointer_to_parallax, Event};
use crate::dom;
use crate::plaza::Plaza;
use crate::render::AvatarNodes;
use std::rc::Rc;
use web_sys as web;

/// Window-wide pointer position feeds the parallax target.
pub fn wire_parallax(plaza: &Rc<Plaza>) -> Option<Listener> {
    let window = web::window()?;
    let weak = Rc::downgrade(plaza);
    Some(Listener::new(
        window.as_ref(),
        "mousemove",
        true,
        move |ev: web::MouseEvent| {
            let Some(p) = weak.upgrade() else { return };
            let v = p.state.borrow().viewport;
            let target =
                pointer_to_parallax(ev.client_x() as f32, ev.client_y() as f32, v.width, v.height);
            p.dispatch(Event::PointerTarget(target));
        },
    ))
}

/// Per-avatar hover animation and entry-transition bookkeeping.
///
/// Wide viewports start the animation on `mouseenter` and leave it running;
/// compact ones start it on tap and clear it on `animationend`.
pub fn wire_avatars(plaza: &Rc<Plaza>, nodes: &[AvatarNodes]) -> Vec<Listener> {
    let mut out = Vec::with_capacity(nodes.len() * 3);
    for (id, node) in nodes.iter().enumerate() {
        let root: &web::EventTarget = node.root.as_ref();

        let weak = Rc::downgrade(plaza);
        let el = node.root.clone();
        out.push(Listener::new(root, "mouseenter", true, move |_: web::MouseEvent| {
            if weak.upgrade().is_some_and(|p| !is_compact(&p)) {
                dom::set_class(&el, HOVER_ANIMATION, true);
            }
        }));

        let weak = Rc::downgrade(plaza);
        let el = node.root.clone();
        out.push(Listener::new(root, "click", true, move |_: web::MouseEvent| {
            if weak.upgrade().is_some_and(|p| is_compact(&p)) {
                dom::set_class(&el, HOVER_ANIMATION, true);
            }
        }));

        let weak = Rc::downgrade(plaza);
        let el = node.root.clone();
        out.push(Listener::new(root, "animationend", true, move |_: web::AnimationEvent| {
            let Some(p) = weak.upgrade() else { return };
            if el.class_list().contains(FADE_IN_CLASS) {
                p.dispatch(Event::EntryTransitionEnded(id));
            } else if is_compact(&p) {
                dom::set_class(&el, HOVER_ANIMATION, false);
            }
        }));
    }
    out
}

#[inline]
fn is_compact(plaza: &Plaza) -> bool {
    plaza.state.borrow().viewport.is_compact()
}
