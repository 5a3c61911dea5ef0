#![cfg(target_arch = "wasm32")]
use crate::core::{Catalog, PlazaState, CATALOG_JSON};
use crate::plaza::Plaza;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod plaza;
mod render;
mod ui;

thread_local! {
    static PLAZA: RefCell<Option<Rc<Plaza>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("plaza-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the plaza down: cancels pending frames and removes listeners and nodes.
#[wasm_bindgen]
pub fn unmount() {
    let plaza = PLAZA.with(|slot| slot.borrow_mut().take());
    if let Some(p) = plaza {
        p.teardown();
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = dom::html_by_id(&document, constants::PLAZA_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::PLAZA_ID))?;

    let catalog = Catalog::from_json(CATALOG_JSON)?;
    log::info!(
        "[catalog] djs={} genres={} locations={} bpm bands={}",
        catalog.len(),
        catalog.genres.len(),
        catalog.locations.len(),
        catalog.bpms.len()
    );

    let viewport = dom::viewport(&window);
    let state = PlazaState::new(catalog, viewport, None);
    log::info!(
        "[layout] avatars={} viewport={}x{}",
        state.avatars.len(),
        viewport.width as i32,
        viewport.height as i32
    );

    // A second start (hot reload) replaces the previous mount
    unmount();
    let plaza = Plaza::mount(&document, &container, state)?;
    PLAZA.with(|slot| *slot.borrow_mut() = Some(plaza));
    Ok(())
}
