//! Enhancer configuration
//!
//! Passed from the host page as a plain JS object; every key is optional and
//! `undefined`/`null` means "all defaults".

use crate::domain::a001_category::detection::DetectionRule;
use crate::domain::a001_category::ui::EnhancementMode;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub const DEFAULT_ROUTE_MARKER: &str = "/admin/customize";
pub const DEFAULT_CATALOG_URL: &str = "/site.json";

/// CSS selectors describing the host's object-list editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Object-list editor container
    pub editor: String,
    /// One property row of an object, holding a label and an input
    pub field_row: String,
    /// Label inside a field row
    pub label: String,
    /// Text inputs inside the editor
    pub input: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            editor: ".schema-theme-setting-editor, .admin-objects-setting".to_string(),
            field_row: ".schema-field, .admin-object-setting-property".to_string(),
            label: "label, .schema-field__label".to_string(),
            input: "input[type='text'], input:not([type])".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Path substring of the theme-customization admin area
    pub route_marker: String,
    pub catalog_url: String,
    pub mode: EnhancementMode,
    pub detection: Vec<DetectionRule>,
    /// Scans scheduled after entering the admin route
    pub scan_delays_ms: Vec<u32>,
    /// Delay of the scan scheduled when an editor appears in the DOM
    pub mutation_delay_ms: u32,
    pub selectors: Selectors,
    pub log_level: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            mode: EnhancementMode::default(),
            detection: DetectionRule::default_rules(),
            scan_delays_ms: vec![100, 500, 1500],
            mutation_delay_ms: 100,
            selectors: Selectors::default(),
            log_level: "debug".to_string(),
        }
    }
}

impl EnhancerConfig {
    pub fn from_js(value: JsValue) -> Result<Self, String> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| format!("invalid enhancer config: {}", e))
    }

    /// Parsed `log_level`, `None` if it is not a `log` level name.
    pub fn level(&self) -> Option<log::Level> {
        self.log_level.parse().ok()
    }
}
