//! Category picker
//!
//! Per-field dialog listing the whole catalog as checkboxes with a live
//! search box. `state` holds the open/closed state machine, `component`
//! renders it and talks to the host input.

pub mod component;
pub mod state;

pub use component::CategoryPicker;
pub use state::{parse_id_list, PickerState};

/// Styles for the picker and helper, injected once into the host page.
pub const STYLES: &str = r#"
.category-picker-host { display: inline-block; margin-left: 8px; }
.category-picker__backdrop { display: none; position: fixed; inset: 0; z-index: 1100;
  align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.45); }
.category-picker__backdrop.is-open { display: flex; }
.category-picker__dialog { display: flex; flex-direction: column; gap: 8px; width: min(560px, 92vw);
  max-height: 80vh; padding: 16px; border-radius: 6px; background: #fff;
  box-shadow: 0 8px 24px rgba(0, 0, 0, 0.25); }
.category-picker__header { display: flex; align-items: baseline; justify-content: space-between; }
.category-picker__header h3 { margin: 0; }
.category-picker__count { font-size: 12px; color: #666; }
.category-picker__list { overflow-y: auto; border: 1px solid #ddd; border-radius: 4px; }
.category-picker__row { display: flex; align-items: center; gap: 8px; padding: 4px 8px; margin: 0; }
.category-picker__row.is-hidden { display: none; }
.category-picker__name { flex: 1; }
.category-picker__id { font-size: 12px; color: #888; }
.category-picker__actions { display: flex; gap: 8px; }
.category-helper { margin-top: 8px; padding: 8px; background: #f8f9fa; border-radius: 4px;
  font-size: 12px; color: #666; }
"#;
