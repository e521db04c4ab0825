//! Browser binding for the chat widget.
//!
//! Mounts the chat input handler on the page's `#chat-form`, reading
//! `#message` and appending to `.chat-log`.

use std::rc::Rc;

use chatwidget_core::config::{HandlerConfig, endpoint_for_origin, parse_endpoint};
use chatwidget_core::view::{Alerter, ChatLog, InputField, ViewError};
use chatwidget_core::{ChatEntry, ChatInputHandler, HttpTransport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, Window};

const FORM_ID: &str = "chat-form";
const INPUT_ID: &str = "message";
const LOG_SELECTOR: &str = ".chat-log";

fn view_error(e: JsValue) -> ViewError {
    ViewError(format!("{e:?}"))
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("chat widget: {what} not found"))
}

struct DomInput(HtmlInputElement);

impl InputField for DomInput {
    fn value(&self) -> String {
        self.0.value()
    }

    fn clear(&self) -> Result<(), ViewError> {
        self.0.set_value("");
        Ok(())
    }
}

struct DomLog {
    document: Document,
    container: Element,
}

impl ChatLog for DomLog {
    /// Nodes are built off-document and attached with a single insertion.
    fn append(&self, entries: &[ChatEntry]) -> Result<(), ViewError> {
        let fragment = self.document.create_document_fragment();
        for entry in entries {
            let node = self.document.create_element("div").map_err(view_error)?;
            node.class_list()
                .add_1(entry.role.css_class())
                .map_err(view_error)?;
            match node.dyn_ref::<HtmlElement>() {
                Some(el) => el.set_inner_text(&entry.text),
                None => node.set_text_content(Some(&entry.text)),
            }
            fragment.append_child(&node).map_err(view_error)?;
        }
        self.container.append_child(&fragment).map_err(view_error)?;
        Ok(())
    }

    fn scroll_to_bottom(&self) -> Result<(), ViewError> {
        self.container.set_scroll_top(self.container.scroll_height());
        Ok(())
    }
}

struct WindowAlerter(Window);

impl Alerter for WindowAlerter {
    fn alert(&self, message: &str) {
        if let Err(e) = self.0.alert_with_message(message) {
            log::warn!("alert failed: {e:?}");
        }
    }
}

/// Installs the panic hook and routes `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("chatwidget v{} loaded", chatwidget_core::version());
}

/// Returns the version of the chatwidget-wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    chatwidget_core::version().to_string()
}

/// Mount with the defensive handler, posting to `<origin>/chat`.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    mount_with(None, false)
}

/// Mount with an explicit endpoint and/or the minimal handler.
#[wasm_bindgen]
pub fn mount_with(endpoint: Option<String>, minimal: bool) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;

    let form = document
        .get_element_by_id(FORM_ID)
        .ok_or_else(|| missing("#chat-form"))?;
    let input = document
        .get_element_by_id(INPUT_ID)
        .ok_or_else(|| missing("#message"))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str("chat widget: #message is not an <input>"))?;
    let container = document
        .query_selector(LOG_SELECTOR)?
        .ok_or_else(|| missing(".chat-log"))?;

    let endpoint = match endpoint {
        Some(url) => parse_endpoint(&url),
        None => endpoint_for_origin(&window.location().origin()?),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let config = if minimal {
        HandlerConfig::minimal()
    } else {
        HandlerConfig::defensive()
    };

    log::debug!("mounting chat widget on #{FORM_ID}, endpoint {endpoint}");

    let handler = Rc::new(ChatInputHandler::new(
        config,
        HttpTransport::new(endpoint),
        DomInput(input),
        DomLog {
            document,
            container,
        },
        WindowAlerter(window),
    ));

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let handler = Rc::clone(&handler);
        spawn_local(async move {
            if let Err(e) = handler.submit().await {
                log::debug!("submission not rendered: {e}");
            }
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_submit.forget();

    Ok(())
}
