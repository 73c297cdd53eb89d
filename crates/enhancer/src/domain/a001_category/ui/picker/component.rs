use super::state::PickerState;
use crate::domain::a001_category::catalog::Catalog;
use crate::shared::dom;
use leptos::ev;
use leptos::portal::Portal;
use leptos::prelude::*;
use std::sync::Arc;

/// "Select" button for one categories field, with its checkbox dialog.
///
/// The button sits next to the host input; the dialog is portalled to
/// `<body>` so its own input/change events never bubble through the host
/// editor. The host input is looked up by its enhancement key whenever the
/// dialog opens or applies, since the host may re-render it in between.
#[component]
pub fn CategoryPicker(
    /// Enhancement key of the host input
    field_key: String,
    /// Categories offered for selection
    catalog: Arc<Catalog>,
) -> impl IntoView {
    let state = RwSignal::new(PickerState::default());

    // Escape behaves like Cancel; the listener goes away with the picker
    let escape_listener = window_event_listener(ev::keydown, move |ev: ev::KeyboardEvent| {
        if state.with_untracked(|s| s.is_open()) {
            state.update(|s| {
                s.close_on_key(&ev.key());
            });
        }
    });
    on_cleanup(move || escape_listener.remove());

    let dialog_key = field_key.clone();

    let handle_open = move |_| match dom::find_marked_input(&field_key) {
        Some(input) => state.update(|s| s.open(&input.value())),
        None => log::debug!("categories field {} is gone, not opening picker", field_key),
    };

    view! {
        <button type="button" class="btn category-picker__open" on:click=handle_open>
            "Select categories"
        </button>
        <Portal>
            <PickerDialog
                field_key=dialog_key.clone()
                catalog=Arc::clone(&catalog)
                state=state
            />
        </Portal>
    }
}

/// Backdrop and dialog, rendered once and only shown/hidden.
#[component]
fn PickerDialog(
    field_key: String,
    catalog: Arc<Catalog>,
    state: RwSignal<PickerState>,
) -> impl IntoView {
    let handle_apply = {
        let key = field_key;
        let catalog = Arc::clone(&catalog);
        move |_| {
            let mut committed = None;
            state.update(|s| committed = s.apply(&catalog));
            let Some(value) = committed else {
                return;
            };
            match dom::find_marked_input(&key) {
                Some(input) => {
                    if let Err(e) = dom::write_input_value(&input, &value) {
                        log::warn!("could not update categories field {}: {}", key, e);
                    }
                }
                None => log::debug!("categories field {} is gone, selection dropped", key),
            }
        }
    };

    let handle_cancel = move |_| state.update(|s| s.close());

    // Only clicks on the backdrop itself reach this handler
    let handle_backdrop_click = move |_| state.update(|s| s.close());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let selected_count = {
        let catalog = Arc::clone(&catalog);
        move || state.with(|s| s.checked_count(&catalog))
    };

    let rows = catalog
        .entries()
        .iter()
        .map(|category| {
            let id = category.id_string();
            let id_for_checked = id.clone();
            let id_for_toggle = id.clone();
            let category_for_filter = category.clone();

            view! {
                <label
                    class="category-picker__row"
                    class:is-hidden=move || !state.with(|s| s.is_visible(&category_for_filter))
                >
                    <input
                        type="checkbox"
                        value=id
                        prop:checked=move || state.with(|s| s.is_checked(&id_for_checked))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            state.update(|s| s.set_checked(&id_for_toggle, checked));
                        }
                    />
                    <span class="category-picker__name">{category.full_name.clone()}</span>
                    <span class="category-picker__id">{format!("#{}", category.id)}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <div
            class="category-picker__backdrop"
            class:is-open=move || state.with(|s| s.is_open())
            on:click=handle_backdrop_click
        >
            <div
                class="category-picker__dialog"
                role="dialog"
                aria-modal="true"
                on:click=stop_propagation
            >
                <div class="category-picker__header">
                    <h3>"Select categories"</h3>
                    <span class="category-picker__count">
                        {move || format!("{} selected", selected_count())}
                    </span>
                </div>
                <input
                    type="search"
                    class="category-picker__search"
                    placeholder="Search categories..."
                    prop:value=move || state.with(|s| s.query().to_string())
                    on:input=move |ev| {
                        let query = event_target_value(&ev);
                        state.update(|s| s.set_query(&query));
                    }
                />
                <div class="category-picker__list">{rows}</div>
                <div class="category-picker__actions">
                    <button type="button" class="btn btn-primary" on:click=handle_apply>
                        "Apply"
                    </button>
                    <button type="button" class="btn" on:click=handle_cancel>
                        "Cancel"
                    </button>
                </div>
            </div>
        </div>
    }
}
