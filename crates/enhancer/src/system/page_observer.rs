//! Turns DOM mutations and history navigation into [`EnhancerEvent`]s.

use super::config::Selectors;
use super::enhancer::EnhancerEvent;
use crate::shared::dom;
use js_sys::Array;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MutationObserver, MutationObserverInit, MutationRecord};

pub type EventSink = Rc<dyn Fn(EnhancerEvent)>;

/// Keeps the mutation observer and popstate listener alive; both are detached
/// on drop.
pub struct PageObserver {
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(Array, MutationObserver)>,
    on_popstate: Closure<dyn FnMut(Event)>,
}

impl PageObserver {
    pub fn install(selectors: Rc<Selectors>, sink: EventSink) -> Result<Self, String> {
        let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
        let target = dom::document()
            .and_then(|d| d.document_element())
            .ok_or_else(|| "document element is unavailable".to_string())?;

        let mutation_sink = Rc::clone(&sink);
        let on_mutation = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                // one event per batch is enough, the scan covers the whole page
                let appeared = records
                    .iter()
                    .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
                    .any(|record| added_editor(&record, &selectors));
                if appeared {
                    mutation_sink(EnhancerEvent::ContainerAppeared);
                }
            },
        );

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())
            .map_err(|e| format!("failed to create mutation observer: {:?}", e))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&target, &init)
            .map_err(|e| format!("failed to observe document: {:?}", e))?;

        let on_popstate = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Some(path) = dom::current_path() {
                sink(EnhancerEvent::PageChanged(path));
            }
        });
        window
            .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
            .map_err(|e| format!("failed to listen for popstate: {:?}", e))?;

        Ok(Self {
            observer,
            _on_mutation: on_mutation,
            on_popstate,
        })
    }
}

impl Drop for PageObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "popstate",
                self.on_popstate.as_ref().unchecked_ref(),
            );
        }
    }
}

fn added_editor(record: &MutationRecord, selectors: &Selectors) -> bool {
    let added = record.added_nodes();
    (0..added.length())
        .filter_map(|i| added.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .any(|element| looks_like_editor(&element, selectors))
}

/// Is, or contains, an object-list editor or one of its field rows.
fn looks_like_editor(element: &Element, selectors: &Selectors) -> bool {
    element.matches(&selectors.editor).unwrap_or(false)
        || element
            .query_selector(&selectors.editor)
            .ok()
            .flatten()
            .is_some()
        || element
            .query_selector(&selectors.field_row)
            .ok()
            .flatten()
            .is_some()
}
