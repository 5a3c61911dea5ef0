use crate::core::Basket;
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(el: &web::HtmlElement) {
    _ = el.class_list().remove_1("hidden");
    dom::set_shown(el, true);
}

#[inline]
pub fn hide(el: &web::HtmlElement) {
    _ = el.class_list().add_1("hidden");
    dom::set_shown(el, false);
}

#[inline]
fn plural(n: usize) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// "N drops available" counter shown while a filter is active.
pub fn update_available(el: &web::HtmlElement, visible: usize, filtered: bool) {
    if !filtered {
        hide(el);
        return;
    }
    el.set_text_content(Some(&format!("{} drop{} available", visible, plural(visible))));
    show(el);
}

/// Label of the confirm button for `count` selected drops.
pub fn confirm_label(count: usize) -> String {
    format!("+ Add {} drop{}", count, plural(count))
}

/// Rebuild the basket panel; hidden while the basket is empty.
/// Remove buttons carry `data-entry-id` for the delegated click handler.
pub fn render_basket(el: &web::HtmlElement, basket: &Basket) {
    if basket.is_empty() {
        el.set_inner_html("");
        hide(el);
        return;
    }
    let mut html = format!(
        "<div class='basket-header'>BASKET ({})</div><div class='basket-items'>",
        basket.len()
    );
    for entry in basket.entries() {
        html.push_str("<div class='basket-item'><div class='basket-item-header'><div class='basket-item-criteria'>");
        for tags in [&entry.genres[..], &entry.locations[..], &entry.bpms[..]] {
            if !tags.is_empty() {
                html.push_str(&format!(
                    "<span class='basket-tag'>{}</span>",
                    escape(&tags.join(", "))
                ));
            }
        }
        html.push_str(&format!(
            "</div><button class='basket-remove-btn' data-entry-id='{}'>×</button></div><div class='basket-item-count'>{} DJs</div></div>",
            entry.id,
            entry.djs.len()
        ));
    }
    html.push_str("</div>");
    el.set_inner_html(&html);
    show(el);
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
