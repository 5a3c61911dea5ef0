use crate::core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Inner size of the window in CSS pixels.
pub fn viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

#[inline]
pub fn html_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn input_by_id(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

/// Create `<tag class="...">` as an `HtmlElement`.
pub fn create_html(
    document: &web::Document,
    tag: &str,
    class: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("<{}> is not an HtmlElement", tag))
}

pub fn create_image(
    document: &web::Document,
    class: &str,
    src: &str,
    alt: &str,
) -> anyhow::Result<web::HtmlImageElement> {
    let img = create_html(document, "img", class)?
        .dyn_into::<web::HtmlImageElement>()
        .map_err(|_| anyhow::anyhow!("<img> is not an HtmlImageElement"))?;
    img.set_src(src);
    img.set_alt(alt);
    img.set_draggable(false);
    Ok(img)
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

#[inline]
pub fn set_shown(el: &web::HtmlElement, shown: bool) {
    _ = el
        .style()
        .set_property("display", if shown { "" } else { "none" });
}

/// True when the event target sits inside an element matching `selector`.
pub fn target_within(ev: &web::Event, selector: &str) -> bool {
    closest_target(ev, selector).is_some()
}

/// Closest ancestor-or-self of the event target matching `selector`.
pub fn closest_target(ev: &web::Event, selector: &str) -> Option<web::Element> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}
