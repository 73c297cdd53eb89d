//! Browser implementation of the host page traits.

use crate::domain::a001_category::catalog::Catalog;
use crate::domain::a001_category::detection::{FieldMeta, HostField, HostPage};
use crate::domain::a001_category::ui::helper::{CategoryHelper, HELPER_CLASS};
use crate::domain::a001_category::ui::picker::CategoryPicker;
use crate::domain::a001_category::ui::EnhancementMode;
use crate::shared::dom::{self, ENHANCED_ATTR};
use crate::system::config::Selectors;
use leptos::mount::mount_to;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

/// A mounted picker or helper, unmounted when dropped.
struct Mounted {
    input: HtmlInputElement,
    _handle: Box<dyn Any>,
}

type Mounts = Rc<RefCell<Vec<Mounted>>>;

pub struct DomPage {
    selectors: Rc<Selectors>,
    mounts: Mounts,
}

impl DomPage {
    pub fn new(selectors: Rc<Selectors>) -> Self {
        Self {
            selectors,
            mounts: Mounts::default(),
        }
    }
}

impl HostPage for DomPage {
    type Field = DomField;

    fn current_path(&self) -> Option<String> {
        dom::current_path()
    }

    fn candidate_fields(&self) -> Vec<DomField> {
        let Some(document) = dom::document() else {
            return Vec::new();
        };
        let Ok(editors) = document.query_selector_all(&self.selectors.editor) else {
            log::debug!("invalid editor selector {:?}", self.selectors.editor);
            return Vec::new();
        };

        let editors = (0..editors.length())
            .filter_map(|i| editors.get(i).and_then(|n| n.dyn_into::<Element>().ok()));
        let inputs = collect_unique(editors, |editor| {
            let Ok(inputs) = editor.query_selector_all(&self.selectors.input) else {
                return Vec::new();
            };
            (0..inputs.length())
                .filter_map(|j| inputs.get(j).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()))
                .collect()
        });

        inputs
            .into_iter()
            .map(|input| DomField {
                input,
                selectors: Rc::clone(&self.selectors),
                mounts: Rc::clone(&self.mounts),
            })
            .collect()
    }

    fn release_detached(&self) -> usize {
        let detached: Vec<Mounted> = {
            let mut mounts = self.mounts.borrow_mut();
            let (live, detached) = mounts
                .drain(..)
                .partition(|m: &Mounted| m.input.is_connected());
            *mounts = live;
            detached
        };
        // Unmounting runs Leptos cleanups, so the registry borrow is released first
        let released = detached.len();
        drop(detached);
        released
    }
}

/// Items of every container in order, each item once even when containers
/// nest and report the same item twice.
fn collect_unique<C, T, I>(containers: I, items_of: impl Fn(&C) -> Vec<T>) -> Vec<T>
where
    I: IntoIterator<Item = C>,
    T: PartialEq,
{
    let mut out: Vec<T> = Vec::new();
    for container in containers {
        for item in items_of(&container) {
            if !out.contains(&item) {
                out.push(item);
            }
        }
    }
    out
}

pub struct DomField {
    input: HtmlInputElement,
    selectors: Rc<Selectors>,
    mounts: Mounts,
}

impl DomField {
    fn row(&self) -> Option<Element> {
        self.input.closest(&self.selectors.field_row).ok().flatten()
    }

    fn label_text(&self) -> Option<String> {
        let from_row = self
            .row()
            .and_then(|row| row.query_selector(&self.selectors.label).ok().flatten())
            .and_then(|label| label.text_content());

        let text = from_row.or_else(|| {
            let id = self.input.id();
            if id.is_empty() {
                return None;
            }
            dom::document()?
                .query_selector(&format!("label[for=\"{}\"]", id))
                .ok()??
                .text_content()
        })?;

        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn field_name(&self) -> Option<String> {
        self.input
            .get_attribute("data-field-name")
            .or_else(|| self.input.get_attribute("name"))
            .filter(|name| !name.is_empty())
    }

    fn keep_mounted(&self, handle: impl Any) {
        self.mounts.borrow_mut().push(Mounted {
            input: self.input.clone(),
            _handle: Box::new(handle),
        });
    }

    fn attach_picker(&self, key: &str, catalog: &Arc<Catalog>) -> Result<(), String> {
        let document = dom::document().ok_or_else(|| "document is unavailable".to_string())?;
        let container = dom::create_element(&document, "span", "category-picker-host")?;
        self.input
            .after_with_node_1(&container)
            .map_err(|e| format!("failed to insert picker: {:?}", e))?;

        let field_key = key.to_string();
        let catalog = Arc::clone(catalog);
        let handle = mount_to(container, move || {
            view! { <CategoryPicker field_key=field_key catalog=catalog /> }
        });
        self.keep_mounted(handle);
        Ok(())
    }

    fn attach_helper(&self) -> Result<(), String> {
        let wrapper = self
            .row()
            .or_else(|| self.input.parent_element())
            .ok_or_else(|| "field has no wrapper".to_string())?;

        let existing = wrapper
            .query_selector(&format!(".{}", HELPER_CLASS))
            .ok()
            .flatten();
        if existing.is_some() {
            return Ok(());
        }

        let wrapper = wrapper
            .dyn_into::<HtmlElement>()
            .map_err(|_| "field wrapper is not an HtmlElement".to_string())?;
        self.keep_mounted(mount_to(wrapper, CategoryHelper));
        Ok(())
    }
}

impl HostField for DomField {
    fn meta(&self) -> FieldMeta {
        FieldMeta::new(self.label_text(), self.field_name())
    }

    fn is_enhanced(&self) -> bool {
        self.input.has_attribute(ENHANCED_ATTR)
    }

    fn mark_enhanced(&self) -> Result<String, String> {
        let key = Uuid::new_v4().to_string();
        self.input
            .set_attribute(ENHANCED_ATTR, &key)
            .map_err(|e| format!("failed to mark field: {:?}", e))?;
        Ok(key)
    }

    fn attach(
        &self,
        key: &str,
        mode: EnhancementMode,
        catalog: &Arc<Catalog>,
    ) -> Result<(), String> {
        match mode {
            EnhancementMode::Picker => self.attach_picker(key, catalog),
            EnhancementMode::Helper => self.attach_helper(),
        }
    }
}
