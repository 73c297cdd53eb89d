pub mod domain;
pub mod shared;
pub mod system;

use domain::a001_category::api::load_catalog;
use domain::a001_category::ui::picker::STYLES;
use shared::dom;
use shared::scheduler::BrowserScheduler;
use std::rc::Rc;
use system::config::EnhancerConfig;
use system::enhancer::{Enhancer, EnhancerEvent};
use system::host::DomPage;
use system::page_observer::{EventSink, PageObserver};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

type BrowserEnhancer = Enhancer<DomPage, BrowserScheduler>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Returned to the host page by [`install`]; dropping it stops observing.
#[wasm_bindgen]
pub struct EnhancerHandle {
    enhancer: Rc<BrowserEnhancer>,
    _observer: PageObserver,
}

#[wasm_bindgen]
impl EnhancerHandle {
    /// Hook for the host router, called after every client-side navigation.
    #[wasm_bindgen(js_name = pageChanged)]
    pub fn page_changed(&self, path: String) {
        self.enhancer.dispatch(EnhancerEvent::PageChanged(path));
    }

    /// Scans right away; returns how many fields were newly enhanced.
    pub fn scan(&self) -> usize {
        self.enhancer.scan_and_enhance().enhanced
    }
}

/// Installs the category enhancer on the current page.
///
/// `config` is an optional plain object, see `EnhancerConfig`.
#[wasm_bindgen]
pub fn install(config: JsValue) -> Result<EnhancerHandle, JsValue> {
    let config = EnhancerConfig::from_js(config).map_err(|e| JsValue::from_str(&e))?;

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.level().unwrap_or(log::Level::Debug));
    if config.level().is_none() {
        log::warn!("unknown log level {:?}, using debug", config.log_level);
    }

    if let Err(e) = dom::ensure_stylesheet(STYLES) {
        log::warn!("could not inject picker styles: {}", e);
    }

    let catalog_url = config.catalog_url.clone();
    let selectors = Rc::new(config.selectors.clone());
    let enhancer = Enhancer::new(config, DomPage::new(Rc::clone(&selectors)), BrowserScheduler);

    let sink: EventSink = {
        let enhancer = Rc::clone(&enhancer);
        Rc::new(move |event: EnhancerEvent| enhancer.dispatch(event))
    };
    let observer = PageObserver::install(selectors, sink).map_err(|e| JsValue::from_str(&e))?;

    {
        let enhancer = Rc::clone(&enhancer);
        spawn_local(async move {
            let result = load_catalog(&catalog_url).await;
            enhancer.catalog_loaded(result);
        });
    }

    enhancer.dispatch(EnhancerEvent::Installed);
    log::info!(
        "category enhancer installed ({:?} mode, route {:?})",
        enhancer.config().mode,
        enhancer.config().route_marker
    );

    Ok(EnhancerHandle {
        enhancer,
        _observer: observer,
    })
}
