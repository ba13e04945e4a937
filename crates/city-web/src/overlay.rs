use crate::constants::{CHAT_INPUT_ID, CHAT_PANEL_ID, CHAT_TOGGLE_ID, HIDDEN_CLASS};
use web_sys as web;

// The chat panel and its floating toggle button swap visibility.

#[inline]
pub fn show(document: &web::Document) {
    set_hidden(document, CHAT_PANEL_ID, false);
    set_hidden(document, CHAT_TOGGLE_ID, true);
    if let Some(input) = crate::dom::element_by_id::<web::HtmlElement>(document, CHAT_INPUT_ID) {
        let _ = input.focus();
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    set_hidden(document, CHAT_PANEL_ID, true);
    set_hidden(document, CHAT_TOGGLE_ID, false);
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(CHAT_PANEL_ID)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
    }
}
