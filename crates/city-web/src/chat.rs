use crate::constants::*;
use crate::dom;
use city_core::chat::{ask, ChatConfig, ChatError, ChatTranscript, ChatTransport, Role};
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Browser fetch via gloo-net.
pub struct FetchTransport;

impl ChatTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String, ChatError> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| ChatError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(ChatError::Status(response.status()));
        }
        response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))
    }
}

/// Chat panel state shared between DOM callbacks.
#[derive(Clone)]
pub struct ChatWidget {
    document: web::Document,
    transcript: Rc<RefCell<ChatTranscript>>,
    config: Rc<ChatConfig>,
}

impl ChatWidget {
    pub fn new(document: web::Document) -> Self {
        let config = ChatConfig::default().with_api_key(option_env!("GEMINI_API_KEY"));
        if config.api_key.is_none() {
            log::warn!("[chat] GEMINI_API_KEY not set at build time; replies will fall back");
        }
        Self {
            document,
            transcript: Rc::new(RefCell::new(ChatTranscript::new())),
            config: Rc::new(config),
        }
    }

    /// Hook up toggle/close buttons, the send button and Enter in the input.
    pub fn wire(&self) {
        let doc = self.document.clone();
        dom::add_click_listener(&self.document, CHAT_TOGGLE_ID, move || {
            crate::overlay::toggle(&doc)
        });
        let doc = self.document.clone();
        dom::add_click_listener(&self.document, CHAT_CLOSE_ID, move || {
            crate::overlay::hide(&doc)
        });
        let widget = self.clone();
        dom::add_click_listener(&self.document, CHAT_SEND_ID, move || widget.send_from_input());

        if let Some(input) = self.document.get_element_by_id(CHAT_INPUT_ID) {
            let widget = self.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.key() == "Enter" && !ev.shift_key() {
                    ev.prevent_default();
                    widget.send_from_input();
                }
            }) as Box<dyn FnMut(_)>);
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        crate::overlay::hide(&self.document);
        self.render();
    }

    fn send_from_input(&self) {
        let Some(input) = dom::element_by_id::<web::HtmlInputElement>(&self.document, CHAT_INPUT_ID)
        else {
            return;
        };
        let Some(prompt) = self.transcript.borrow_mut().begin_send(&input.value()) else {
            return;
        };
        input.set_value("");
        self.render();
        log::info!("[chat] sending {} chars", prompt.len());

        let widget = self.clone();
        spawn_local(async move {
            let reply = ask(&FetchTransport, &widget.config, &prompt).await;
            widget.transcript.borrow_mut().finish(reply);
            widget.render();
        });
    }

    /// Rebuild the message log from the transcript.
    fn render(&self) {
        let Some(log_el) = self.document.get_element_by_id(CHAT_LOG_ID) else {
            return;
        };
        log_el.set_inner_html("");
        let transcript = self.transcript.borrow();
        for msg in transcript.messages() {
            let class = match msg.role {
                Role::User => USER_ROW_CLASS,
                Role::Model => MODEL_ROW_CLASS,
            };
            self.append_row(&log_el, class, &msg.text);
        }
        if transcript.is_loading() {
            self.append_row(&log_el, LOADING_ROW_CLASS, LOADING_TEXT);
        }
        if let Some(send) = dom::element_by_id::<web::HtmlButtonElement>(&self.document, CHAT_SEND_ID) {
            send.set_disabled(transcript.is_loading());
        }
        log_el.set_scroll_top(log_el.scroll_height());
    }

    fn append_row(&self, parent: &web::Element, class: &str, text: &str) {
        if let Ok(row) = self.document.create_element("div") {
            row.set_class_name(class);
            row.set_text_content(Some(text));
            let _ = parent.append_child(&row);
        }
    }
}
