use crate::domain::a001_category::catalog::{Catalog, Category};
use std::collections::HashSet;

/// Splits a field value like `"90, 110,,118"` into its non-empty ids.
pub fn parse_id_list(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// State of one picker dialog.
///
/// Selection and query only mean something while the dialog is open; both are
/// rebuilt from the host field on every open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerState {
    open: bool,
    selection: HashSet<String>,
    query: String,
    filter: String,
}

impl PickerState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, field_value: &str) {
        self.selection = parse_id_list(field_value);
        self.query.clear();
        self.filter.clear();
        self.open = true;
    }

    /// Search box text as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.filter = query.to_lowercase();
    }

    pub fn is_visible(&self, category: &Category) -> bool {
        category.matches_filter(&self.filter)
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if checked {
            self.selection.insert(id.to_string());
        } else {
            self.selection.remove(id);
        }
    }

    /// Checked rows, ignoring ids the catalog does not offer.
    pub fn checked_count(&self, catalog: &Catalog) -> usize {
        catalog
            .entries()
            .iter()
            .filter(|c| self.selection.contains(&c.id_string()))
            .count()
    }

    /// Ids of every checked row in catalog order, visible or not.
    pub fn committed_value(&self, catalog: &Catalog) -> String {
        catalog
            .entries()
            .iter()
            .map(Category::id_string)
            .filter(|id| self.selection.contains(id))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Closes the dialog and returns the value to write to the host field.
    pub fn apply(&mut self, catalog: &Catalog) -> Option<String> {
        if !self.open {
            return None;
        }
        let value = self.committed_value(catalog);
        self.close();
        Some(value)
    }

    /// Escape cancels an open dialog; returns whether it closed.
    pub fn close_on_key(&mut self, key: &str) -> bool {
        if self.open && key == "Escape" {
            self.close();
            return true;
        }
        false
    }

    /// Closes the dialog, discarding selection and query.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::catalog::tests::{dto, sample_catalog};

    fn visible_names(state: &PickerState, catalog: &Catalog) -> Vec<String> {
        catalog
            .entries()
            .iter()
            .filter(|c| state.is_visible(c))
            .map(|c| c.full_name.clone())
            .collect()
    }

    #[test]
    fn test_parse_id_list() {
        let ids = parse_id_list(" 90, 110,,118 ,");
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("90") && ids.contains("110") && ids.contains("118"));
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ").is_empty());
    }

    #[test]
    fn test_open_prechecks_field_ids() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("90,110,118");

        let checked: Vec<i64> = catalog
            .entries()
            .iter()
            .filter(|c| state.is_checked(&c.id_string()))
            .map(|c| c.id)
            .collect();
        // catalog order: General, General > Plugins, Staff, Themes, Themes > Theme Generator
        assert_eq!(checked, vec![90, 110, 118]);
        assert_eq!(state.checked_count(&catalog), 3);
    }

    #[test]
    fn test_apply_round_trip() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("90,110,118");
        assert_eq!(state.apply(&catalog).as_deref(), Some("90,110,118"));
        assert!(!state.is_open());
    }

    #[test]
    fn test_apply_normalizes_to_catalog_order() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("118, 4 ,90");
        assert_eq!(state.apply(&catalog).as_deref(), Some("4,90,118"));
    }

    #[test]
    fn test_apply_drops_unknown_ids() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("999,5");
        assert_eq!(state.checked_count(&catalog), 1);
        assert_eq!(state.apply(&catalog).as_deref(), Some("5"));
    }

    #[test]
    fn test_apply_when_closed() {
        let mut state = PickerState::default();
        assert_eq!(state.apply(&sample_catalog()), None);
    }

    #[test]
    fn test_filter_hides_rows() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("");
        assert_eq!(visible_names(&state, &catalog).len(), catalog.len());

        state.set_query("GEN");
        assert_eq!(state.query(), "GEN");
        assert_eq!(
            visible_names(&state, &catalog),
            vec!["General", "General > Plugins", "Themes > Theme Generator"]
        );
    }

    #[test]
    fn test_hidden_checked_row_is_committed() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("5");

        state.set_query("gen");
        let staff = catalog.get(5).unwrap();
        assert!(!state.is_visible(staff));
        assert!(state.is_checked("5"));

        state.set_checked("90", true);
        assert_eq!(state.apply(&catalog).as_deref(), Some("90,5"));
    }

    #[test]
    fn test_uncheck() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("4,90");
        state.set_checked("4", false);
        state.set_checked("4", false);
        assert_eq!(state.apply(&catalog).as_deref(), Some("90"));
    }

    #[test]
    fn test_close_discards_changes() {
        let mut state = PickerState::default();
        state.open("90");
        state.set_checked("110", true);
        state.set_query("the");
        state.close();

        assert_eq!(state, PickerState::default());
    }

    #[test]
    fn test_escape_cancels_open_dialog() {
        let mut state = PickerState::default();
        assert!(!state.close_on_key("Escape"));

        state.open("90");
        assert!(!state.close_on_key("Enter"));
        assert!(state.is_open());

        state.set_checked("110", true);
        assert!(state.close_on_key("Escape"));
        assert_eq!(state, PickerState::default());
    }

    #[test]
    fn test_reopen_resets_query_and_selection() {
        let catalog = sample_catalog();
        let mut state = PickerState::default();
        state.open("90");
        state.set_query("staff");
        state.set_checked("5", true);
        state.close();

        state.open("110");
        assert_eq!(state.query(), "");
        assert!(!state.is_checked("5"));
        assert!(state.is_checked("110"));
        assert_eq!(visible_names(&state, &catalog).len(), catalog.len());
    }

    #[test]
    fn test_empty_selection_commits_empty_value() {
        let catalog = Catalog::from_categories(vec![dto(1, "Only", None)]);
        let mut state = PickerState::default();
        state.open("1");
        state.set_checked("1", false);
        assert_eq!(state.apply(&catalog).as_deref(), Some(""));
    }
}
