#![cfg(target_arch = "wasm32")]
mod chat;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use city_core::{CityScene, SceneConfig, ScrollCell};
use constants::CANVAS_ID;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("city-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;

    // Scroll listener and chat are independent of the GPU and work without it
    let scroll = ScrollCell::new();
    events::wire_scroll(&window, scroll.clone());
    chat::ChatWidget::new(document.clone()).wire();

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    events::wire_canvas_resize(&window, canvas.clone());

    let Some(gpu) = frame::init_gpu(&canvas).await else {
        log::warn!("[gpu] WebGPU unavailable; background disabled");
        return Ok(());
    };

    let scene = CityScene::from_entropy(SceneConfig::default());
    let ctx = frame::FrameContext::new(scene, scroll, canvas, gpu);
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}
