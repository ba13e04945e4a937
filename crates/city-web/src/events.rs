use crate::dom;
use city_core::ScrollCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep `scroll` in step with the page. Scroll events only ever overwrite
/// the shared cell; the frame loop reads it once per frame.
pub fn wire_scroll(window: &web::Window, scroll: ScrollCell) {
    scroll.set(dom::scroll_metrics(window));
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        scroll.set(dom::scroll_metrics(&win));
    }) as Box<dyn FnMut()>);
    for event in ["scroll", "resize"] {
        if window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("[scroll] could not listen for {}", event);
        }
    }
    closure.forget();
}

/// Resize the canvas backing store with the window.
pub fn wire_canvas_resize(window: &web::Window, canvas: web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(&canvas);
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
