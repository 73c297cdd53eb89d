use super::config::EnhancerConfig;
use crate::domain::a001_category::catalog::{Catalog, CatalogSlot};
use crate::domain::a001_category::detection::{self, route_matches, HostPage, ScanReport};
use crate::shared::scheduler::Scheduler;
use std::rc::Rc;

/// Everything that can make a scan worthwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancerEvent {
    /// The module was just installed on the current page
    Installed,
    /// The host navigated to `path`
    PageChanged(String),
    /// An object-list editor (or one of its rows) was inserted into the DOM
    ContainerAppeared,
    /// The catalog slot has been filled
    CatalogLoaded,
    /// A scheduled scan is due
    ScanDue,
}

/// Owns the catalog and decides when to scan the host page.
pub struct Enhancer<P, S> {
    config: EnhancerConfig,
    page: P,
    scheduler: S,
    catalog: CatalogSlot,
}

impl<P, S> Enhancer<P, S>
where
    P: HostPage + 'static,
    S: Scheduler + 'static,
{
    pub fn new(config: EnhancerConfig, page: P, scheduler: S) -> Rc<Self> {
        Rc::new(Self {
            config,
            page,
            scheduler,
            catalog: CatalogSlot::new(),
        })
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogSlot {
        &self.catalog
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_on_route(&self) -> bool {
        self.page
            .current_path()
            .is_some_and(|path| route_matches(&path, &self.config.route_marker))
    }

    pub fn dispatch(self: &Rc<Self>, event: EnhancerEvent) {
        match event {
            EnhancerEvent::Installed => {
                if self.is_on_route() {
                    self.scan_and_enhance();
                    self.schedule_route_scans();
                }
            }
            EnhancerEvent::PageChanged(path) => {
                if route_matches(&path, &self.config.route_marker) {
                    self.schedule_route_scans();
                }
            }
            EnhancerEvent::ContainerAppeared => {
                if self.is_on_route() {
                    self.schedule_scan(self.config.mutation_delay_ms);
                }
            }
            EnhancerEvent::CatalogLoaded => {
                if self.is_on_route() {
                    self.scan_and_enhance();
                }
            }
            EnhancerEvent::ScanDue => {
                self.scan_and_enhance();
            }
        }
    }

    /// Fills the catalog slot from the loader's result.
    ///
    /// A failed load leaves the slot "loaded empty", which keeps every later
    /// scan a no-op for this page load.
    pub fn catalog_loaded(self: &Rc<Self>, result: Result<Catalog, String>) {
        let catalog = match result {
            Ok(catalog) => {
                log::info!("loaded {} categories", catalog.len());
                log::info!("available categories (id: name):\n{}", catalog.describe());
                catalog
            }
            Err(e) => {
                log::warn!("could not load categories, enhancements disabled: {}", e);
                Catalog::default()
            }
        };

        if !self.catalog.fill(catalog) {
            log::warn!("categories already loaded, ignoring second load");
            return;
        }
        self.dispatch(EnhancerEvent::CatalogLoaded);
    }

    pub fn scan_and_enhance(&self) -> ScanReport {
        let report = detection::scan_and_enhance(
            &self.page,
            &self.catalog,
            &self.config.detection,
            &self.config.route_marker,
            self.config.mode,
        );
        if report.enhanced > 0 || report.released > 0 {
            log::debug!(
                "enhanced {} categories field(s), {} already enhanced, {} released",
                report.enhanced,
                report.already_enhanced,
                report.released
            );
        }
        report
    }

    fn schedule_route_scans(self: &Rc<Self>) {
        for &delay in &self.config.scan_delays_ms {
            self.schedule_scan(delay);
        }
    }

    fn schedule_scan(self: &Rc<Self>, delay_ms: u32) {
        let this = Rc::clone(self);
        self.scheduler.schedule(
            delay_ms,
            Box::new(move || this.dispatch(EnhancerEvent::ScanDue)),
        );
    }
}
