use leptos::prelude::*;

/// Class of the helper block; a wrapper already holding one gets no other.
pub const HELPER_CLASS: &str = "category-helper";

/// Static hint shown under a categories field in helper mode.
///
/// The id ↔ name listing it refers to is logged when the catalog loads.
#[component]
pub fn CategoryHelper() -> impl IntoView {
    view! {
        <div class=HELPER_CLASS>
            <strong>"Category IDs Helper:"</strong>
            " Open browser console to see available category IDs and their names."
            <br />
            "Format: Use comma-separated IDs like \"90,110,118\""
        </div>
    }
}
