//! Small helpers around the host document
//!
//! Every lookup is optional: the host renders asynchronously and may remove
//! nodes at any time, so a missing element means "nothing to do".

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventInit, EventTarget, HtmlElement, HtmlInputElement};

/// Attribute marking an enhanced input; its value is the field key.
pub const ENHANCED_ATTR: &str = "data-category-enhanced";

const STYLESHEET_ID: &str = "category-enhancer-styles";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

/// Finds the host input carrying the given enhancement key.
pub fn find_marked_input(key: &str) -> Option<HtmlInputElement> {
    document()?
        .query_selector(&format!("input[{}=\"{}\"]", ENHANCED_ATTR, key))
        .ok()??
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Writes `value` and notifies the host's data binding with bubbling
/// `input` and `change` events.
pub fn write_input_value(input: &HtmlInputElement, value: &str) -> Result<(), String> {
    input.set_value(value);
    dispatch_bubbling(input, "input")?;
    dispatch_bubbling(input, "change")
}

fn dispatch_bubbling(target: &EventTarget, name: &str) -> Result<(), String> {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict(name, &init)
        .map_err(|e| format!("failed to create {} event: {:?}", name, e))?;
    target
        .dispatch_event(&event)
        .map(|_| ())
        .map_err(|e| format!("failed to dispatch {} event: {:?}", name, e))
}

pub fn create_element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, String> {
    let element = document
        .create_element(tag)
        .map_err(|e| format!("failed to create <{}>: {:?}", tag, e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("<{}> is not an HtmlElement", tag))?;
    element.set_class_name(class);
    Ok(element)
}

/// Injects the enhancer stylesheet into `<head>` once.
pub fn ensure_stylesheet(css: &str) -> Result<(), String> {
    let document = document().ok_or_else(|| "document is unavailable".to_string())?;
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| "document head is unavailable".to_string())?;

    let style = create_element(&document, "style", "")?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(css));
    head.append_child(&style)
        .map(|_| ())
        .map_err(|e| format!("failed to append stylesheet: {:?}", e))
}
