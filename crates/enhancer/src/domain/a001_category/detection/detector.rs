use super::matcher::{FieldMatcher, FieldMeta};
use crate::domain::a001_category::catalog::{Catalog, CatalogSlot};
use crate::domain::a001_category::ui::EnhancementMode;
use std::sync::Arc;

/// A candidate input on the host page.
pub trait HostField {
    fn meta(&self) -> FieldMeta;

    fn is_enhanced(&self) -> bool;

    /// Sets the permanent enhancement marker and returns the field's key.
    fn mark_enhanced(&self) -> Result<String, String>;

    fn attach(&self, key: &str, mode: EnhancementMode, catalog: &Arc<Catalog>)
        -> Result<(), String>;
}

/// The rendered host admin page.
pub trait HostPage {
    type Field: HostField;

    fn current_path(&self) -> Option<String>;

    /// Text inputs inside object-list editors, in document order, each once.
    fn candidate_fields(&self) -> Vec<Self::Field>;

    /// Drops the enhancements of fields the host has removed from the
    /// document; returns how many were released.
    fn release_detached(&self) -> usize;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub candidates: usize,
    pub enhanced: usize,
    pub already_enhanced: usize,
    pub released: usize,
}

pub fn route_matches(path: &str, marker: &str) -> bool {
    !marker.is_empty() && path.contains(marker)
}

/// Releases enhancements of removed fields, then marks and enhances every
/// matching field not enhanced yet.
///
/// Off-route or without a usable catalog this returns an empty report without
/// touching the page.
pub fn scan_and_enhance<P, M>(
    page: &P,
    catalog: &CatalogSlot,
    matcher: &M,
    route_marker: &str,
    mode: EnhancementMode,
) -> ScanReport
where
    P: HostPage,
    M: FieldMatcher + ?Sized,
{
    let mut report = ScanReport::default();

    let on_route = page
        .current_path()
        .is_some_and(|path| route_matches(&path, route_marker));
    if !on_route {
        return report;
    }
    let Some(catalog) = catalog.ready() else {
        return report;
    };

    report.released = page.release_detached();

    for field in page.candidate_fields() {
        report.candidates += 1;

        if field.is_enhanced() {
            report.already_enhanced += 1;
            continue;
        }
        if !matcher.matches(&field.meta()) {
            continue;
        }

        let key = match field.mark_enhanced() {
            Ok(key) => key,
            Err(e) => {
                log::warn!("could not mark categories field: {}", e);
                continue;
            }
        };
        match field.attach(&key, mode, &catalog) {
            Ok(()) => report.enhanced += 1,
            Err(e) => log::warn!("could not enhance categories field {}: {}", key, e),
        }
    }

    report
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::a001_category::catalog::tests::sample_catalog;
    use crate::domain::a001_category::detection::DetectionRule;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub(crate) struct FakeInput {
        pub meta: FieldMeta,
        pub marker: Option<String>,
        pub attached: Vec<EnhancementMode>,
        pub detached: bool,
        pub released: bool,
    }

    /// In-memory host page; counts every write made through the traits.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct FakePage {
        pub path: Rc<RefCell<String>>,
        pub inputs: Rc<RefCell<Vec<FakeInput>>>,
        pub writes: Rc<RefCell<usize>>,
    }

    impl FakePage {
        pub fn at(path: &str) -> Self {
            let page = Self::default();
            *page.path.borrow_mut() = path.to_string();
            page
        }

        pub fn add_input(&self, label: &str, name: &str) {
            self.inputs.borrow_mut().push(FakeInput {
                meta: FieldMeta::new(Some(label.to_string()), Some(name.to_string())),
                ..FakeInput::default()
            });
        }

        pub fn attached_counts(&self) -> Vec<usize> {
            self.inputs
                .borrow()
                .iter()
                .map(|i| i.attached.len())
                .collect()
        }

        pub fn writes(&self) -> usize {
            *self.writes.borrow()
        }

        /// The host removes the input and renders a fresh one in its place.
        pub fn rerender_input(&self, index: usize) {
            let meta = {
                let mut inputs = self.inputs.borrow_mut();
                inputs[index].detached = true;
                inputs[index].meta.clone()
            };
            self.inputs.borrow_mut().push(FakeInput {
                meta,
                ..FakeInput::default()
            });
        }

        /// Enhancements still held for their field.
        pub fn live_enhancements(&self) -> usize {
            self.inputs
                .borrow()
                .iter()
                .filter(|i| !i.attached.is_empty() && !i.released)
                .count()
        }
    }

    pub(crate) struct FakeField {
        page: FakePage,
        index: usize,
    }

    impl HostField for FakeField {
        fn meta(&self) -> FieldMeta {
            self.page.inputs.borrow()[self.index].meta.clone()
        }

        fn is_enhanced(&self) -> bool {
            self.page.inputs.borrow()[self.index].marker.is_some()
        }

        fn mark_enhanced(&self) -> Result<String, String> {
            let key = format!("field-{}", self.index);
            self.page.inputs.borrow_mut()[self.index].marker = Some(key.clone());
            *self.page.writes.borrow_mut() += 1;
            Ok(key)
        }

        fn attach(
            &self,
            _key: &str,
            mode: EnhancementMode,
            _catalog: &Arc<Catalog>,
        ) -> Result<(), String> {
            self.page.inputs.borrow_mut()[self.index].attached.push(mode);
            *self.page.writes.borrow_mut() += 1;
            Ok(())
        }
    }

    impl HostPage for FakePage {
        type Field = FakeField;

        fn current_path(&self) -> Option<String> {
            Some(self.path.borrow().clone())
        }

        fn candidate_fields(&self) -> Vec<FakeField> {
            let inputs = self.inputs.borrow();
            (0..inputs.len())
                .filter(|&index| !inputs[index].detached)
                .map(|index| FakeField {
                    page: self.clone(),
                    index,
                })
                .collect()
        }

        fn release_detached(&self) -> usize {
            let mut released = 0;
            for input in self.inputs.borrow_mut().iter_mut() {
                if input.detached && !input.attached.is_empty() && !input.released {
                    input.released = true;
                    released += 1;
                }
            }
            released
        }
    }

    const MARKER: &str = "/admin/customize";

    fn loaded_slot() -> CatalogSlot {
        let slot = CatalogSlot::new();
        slot.fill(sample_catalog());
        slot
    }

    fn sample_page() -> FakePage {
        let page = FakePage::at("/admin/customize/themes/3");
        page.add_input("Featured categories", "featured");
        page.add_input("Title", "title");
        page.add_input("", "sidebar_categories");
        page
    }

    #[test]
    fn test_scan_enhances_matching_fields() {
        let page = sample_page();
        let report = scan_and_enhance(
            &page,
            &loaded_slot(),
            &DetectionRule::default_rules(),
            MARKER,
            EnhancementMode::Picker,
        );

        assert_eq!(
            report,
            ScanReport {
                candidates: 3,
                enhanced: 2,
                already_enhanced: 0,
                released: 0,
            }
        );
        assert_eq!(page.attached_counts(), vec![1, 0, 1]);
    }

    #[test]
    fn test_repeated_scans_are_idempotent() {
        let page = sample_page();
        let slot = loaded_slot();
        let rules = DetectionRule::default_rules();

        for _ in 0..5 {
            scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Picker);
        }

        assert_eq!(page.attached_counts(), vec![1, 0, 1]);
        let last = scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Picker);
        assert_eq!(last.enhanced, 0);
        assert_eq!(last.already_enhanced, 2);
    }

    #[test]
    fn test_new_fields_picked_up_by_later_scan() {
        let page = sample_page();
        let slot = loaded_slot();
        let rules = DetectionRule::default_rules();

        scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Helper);
        page.add_input("Excluded Categories", "excluded");
        let report = scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Helper);

        assert_eq!(report.enhanced, 1);
        assert_eq!(page.attached_counts(), vec![1, 0, 1, 1]);
        assert_eq!(
            page.inputs.borrow()[3].attached,
            vec![EnhancementMode::Helper]
        );
    }

    #[test]
    fn test_rerendered_field_releases_old_enhancement() {
        let page = sample_page();
        let slot = loaded_slot();
        let rules = DetectionRule::default_rules();

        scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Picker);
        assert_eq!(page.live_enhancements(), 2);

        let mut current = 0;
        for _ in 0..4 {
            page.rerender_input(current);
            current = page.inputs.borrow().len() - 1;

            let report = scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Picker);
            assert_eq!(report.released, 1);
            assert_eq!(report.enhanced, 1);
            assert_eq!(page.inputs.borrow()[current].attached.len(), 1);
        }

        assert_eq!(page.live_enhancements(), 2);
        let report = scan_and_enhance(&page, &slot, &rules, MARKER, EnhancementMode::Picker);
        assert_eq!(report.released, 0);
    }

    #[test]
    fn test_off_route_scan_writes_nothing() {
        let page = sample_page();
        *page.path.borrow_mut() = "/latest".to_string();

        let report = scan_and_enhance(
            &page,
            &loaded_slot(),
            &DetectionRule::default_rules(),
            MARKER,
            EnhancementMode::Picker,
        );

        assert_eq!(report, ScanReport::default());
        assert_eq!(page.writes(), 0);
    }

    #[test]
    fn test_scan_waits_for_catalog() {
        let page = sample_page();
        let rules = DetectionRule::default_rules();

        let pending = CatalogSlot::new();
        scan_and_enhance(&page, &pending, &rules, MARKER, EnhancementMode::Picker);
        assert_eq!(page.writes(), 0);

        let empty = CatalogSlot::new();
        empty.fill(Catalog::default());
        scan_and_enhance(&page, &empty, &rules, MARKER, EnhancementMode::Picker);
        assert_eq!(page.writes(), 0);
    }

    #[test]
    fn test_scan_without_fields() {
        let page = FakePage::at("/admin/customize/themes");
        let report = scan_and_enhance(
            &page,
            &loaded_slot(),
            &DetectionRule::default_rules(),
            MARKER,
            EnhancementMode::Picker,
        );
        assert_eq!(report, ScanReport::default());
    }

    #[test]
    fn test_route_matches() {
        assert!(route_matches("/admin/customize/themes/7", MARKER));
        assert!(!route_matches("/admin/plugins", MARKER));
        assert!(!route_matches("/admin/customize", ""));
    }
}
