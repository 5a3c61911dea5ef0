use crate::constants::*;
use crate::core::{BasketChange, Catalog, Event, Filters, PlazaState};
use crate::dom;
use crate::events::Listener;
use crate::overlay;
use crate::plaza::Plaza;
use std::rc::Rc;
use web_sys as web;

/// Filter, slider and basket controls. Every element is optional: a page that
/// leaves one out just loses that control.
pub struct Controls {
    locations: Vec<(String, web::HtmlElement)>,
    genres: Vec<(String, web::HtmlElement)>,
    bpm_min: Option<web::HtmlInputElement>,
    bpm_max: Option<web::HtmlInputElement>,
    bpm_label: Option<web::HtmlElement>,
    clear: Option<web::HtmlElement>,
    filter_panel: Option<web::HtmlElement>,
    available: Option<web::HtmlElement>,
    slider: Option<web::HtmlInputElement>,
    confirm: Option<web::HtmlElement>,
    basket: Option<web::HtmlElement>,
}

impl Controls {
    pub fn build(document: &web::Document, catalog: &Catalog) -> anyhow::Result<Self> {
        let locations = dropdown_buttons(document, LOCATION_DROPDOWN_ID, &catalog.locations)?;
        let genres = dropdown_buttons(document, GENRE_DROPDOWN_ID, &catalog.genres)?;

        let bpm_min = dom::input_by_id(document, BPM_MIN_ID);
        let bpm_max = dom::input_by_id(document, BPM_MAX_ID);
        let steps = catalog.bpms.len().saturating_sub(1).to_string();
        for input in bpm_min.iter().chain(bpm_max.iter()) {
            input.set_min("0");
            input.set_max(&steps);
            input.set_step("1");
        }
        let slider = dom::input_by_id(document, DISPLAY_SLIDER_ID);
        if let Some(s) = &slider {
            s.set_min("1");
        }

        Ok(Self {
            locations,
            genres,
            bpm_min,
            bpm_max,
            bpm_label: dom::html_by_id(document, BPM_LABEL_ID),
            clear: dom::html_by_id(document, CLEAR_BUTTON_ID),
            filter_panel: dom::html_by_id(document, FILTER_PANEL_ID),
            available: dom::html_by_id(document, AVAILABLE_COUNT_ID),
            slider,
            confirm: dom::html_by_id(document, CONFIRM_BUTTON_ID),
            basket: dom::html_by_id(document, BASKET_PANEL_ID),
        })
    }

    /// Sync every control with `state`.
    pub fn refresh(&self, state: &PlazaState) {
        let f = &state.filters;
        let filtered = f.is_active();

        let top_location = state.top_location();
        for (loc, btn) in &self.locations {
            dom::set_class(btn, ACTIVE_CLASS, f.locations.contains(loc));
            dom::set_class(btn, TOP_CLASS, top_location == Some(loc.as_str()));
        }
        let top_genre = state.top_genre();
        for (genre, btn) in &self.genres {
            dom::set_class(btn, ACTIVE_CLASS, f.genres.contains(genre));
            dom::set_class(btn, TOP_CLASS, top_genre == Some(genre.as_str()));
        }

        let bands = &state.catalog.bpms;
        let (lo, hi) = f.bpm_handles(bands.len());
        if let Some(input) = &self.bpm_min {
            input.set_value(&lo.to_string());
        }
        if let Some(input) = &self.bpm_max {
            input.set_value(&hi.to_string());
        }
        if let Some(label) = &self.bpm_label {
            label.set_text_content(Some(&bpm_label(f, bands)));
        }

        if let Some(clear) = &self.clear {
            dom::set_shown(clear, filtered);
        }
        if let Some(panel) = &self.filter_panel {
            if filtered {
                overlay::show(panel);
            } else {
                overlay::hide(panel);
            }
        }

        let visible = state.visible_count();
        if let Some(el) = &self.available {
            overlay::update_available(el, visible, filtered);
        }
        let shown = state.display_count();
        if let Some(s) = &self.slider {
            // range inputs need max >= min, so an empty result still shows 1
            s.set_max(&visible.max(1).to_string());
            s.set_value(&shown.max(1).to_string());
        }
        if let Some(btn) = &self.confirm {
            btn.set_text_content(Some(&overlay::confirm_label(shown)));
        }
        if let Some(el) = &self.basket {
            overlay::render_basket(el, &state.basket);
        }
    }
}

fn bpm_label(f: &Filters, bands: &[String]) -> String {
    let Some((lo, hi)) = f.bpm_range else {
        return "Any BPM".to_string();
    };
    if lo == hi {
        return bands.get(lo).cloned().unwrap_or_default();
    }
    let label = |i: usize| {
        BPM_HANDLE_LABELS
            .get(i)
            .map(|s| s.to_string())
            .or_else(|| bands.get(i).cloned())
            .unwrap_or_default()
    };
    format!("{} – {}", label(lo), label(hi))
}

fn dropdown_buttons(
    document: &web::Document,
    container_id: &str,
    values: &[String],
) -> anyhow::Result<Vec<(String, web::HtmlElement)>> {
    let Some(container) = document.get_element_by_id(container_id) else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        let btn = dom::create_html(document, "button", "dropdown-btn")?;
        btn.set_text_content(Some(v));
        container
            .append_child(&btn)
            .map_err(|e| anyhow::anyhow!("append {} button: {:?}", container_id, e))?;
        out.push((v.clone(), btn));
    }
    Ok(out)
}

fn click<F>(plaza: &Rc<Plaza>, target: &web::EventTarget, make: F) -> Listener
where
    F: Fn(&Plaza) -> Option<Event> + 'static,
{
    let weak = Rc::downgrade(plaza);
    Listener::new(target, "click", true, move |_: web::MouseEvent| {
        let Some(p) = weak.upgrade() else { return };
        if let Some(ev) = make(&p) {
            p.dispatch(ev);
        }
    })
}

/// Attach listeners for every control present on the page.
pub fn wire(plaza: &Rc<Plaza>) -> Vec<Listener> {
    let c = &plaza.controls;
    let mut out = Vec::new();

    for (loc, btn) in &c.locations {
        let loc = loc.clone();
        out.push(click(plaza, btn.as_ref(), move |p| {
            let next = p.state.borrow().filters.toggle_location(&loc);
            Some(Event::FilterChanged(next))
        }));
    }
    for (genre, btn) in &c.genres {
        let genre = genre.clone();
        out.push(click(plaza, btn.as_ref(), move |p| {
            let next = p.state.borrow().filters.toggle_genre(&genre);
            Some(Event::FilterChanged(next))
        }));
    }

    if let (Some(min), Some(max)) = (&c.bpm_min, &c.bpm_max) {
        // the handle being dragged may not pass the other one
        for moving_min in [true, false] {
            let weak = Rc::downgrade(plaza);
            let (min, max) = (min.clone(), max.clone());
            let target: web::EventTarget = if moving_min {
                min.clone().into()
            } else {
                max.clone().into()
            };
            out.push(Listener::new(&target, "input", true, move |_: web::Event| {
                let Some(p) = weak.upgrade() else { return };
                let lo = min.value().parse::<usize>().unwrap_or(0);
                let hi = max.value().parse::<usize>().unwrap_or(0);
                let (lo, hi) = if moving_min {
                    (lo.min(hi), hi)
                } else {
                    (lo, hi.max(lo))
                };
                let next = {
                    let s = p.state.borrow();
                    s.filters.with_bpm_range(&s.catalog.bpms, lo, hi)
                };
                p.dispatch(Event::FilterChanged(next));
            }));
        }
    }

    if let Some(clear) = &c.clear {
        out.push(click(plaza, clear.as_ref(), |_| {
            Some(Event::FilterChanged(Filters::default()))
        }));
    }

    if let Some(slider) = &c.slider {
        let weak = Rc::downgrade(plaza);
        let input = slider.clone();
        out.push(Listener::new(slider.as_ref(), "input", true, move |_: web::Event| {
            let Some(p) = weak.upgrade() else { return };
            if let Ok(n) = input.value().parse::<usize>() {
                p.dispatch(Event::DisplayCountChanged(n));
            }
        }));
    }

    if let Some(confirm) = &c.confirm {
        out.push(click(plaza, confirm.as_ref(), |_| {
            Some(Event::BasketChanged(BasketChange::Confirm))
        }));
    }

    if let Some(panel) = &c.basket {
        let weak = Rc::downgrade(plaza);
        out.push(Listener::new(panel.as_ref(), "click", true, move |ev: web::MouseEvent| {
            let Some(p) = weak.upgrade() else { return };
            let id = dom::closest_target(&ev, BASKET_REMOVE_SELECTOR)
                .and_then(|btn| btn.get_attribute("data-entry-id"))
                .and_then(|s| s.parse::<u64>().ok());
            if let Some(id) = id {
                p.dispatch(Event::BasketChanged(BasketChange::Remove(id)));
            }
        }));
    }

    out
}
