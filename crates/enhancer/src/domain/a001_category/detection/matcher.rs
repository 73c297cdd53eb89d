use serde::{Deserialize, Serialize};

/// Static metadata of a candidate input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Text of the label associated with the input
    pub label: Option<String>,
    /// `data-field-name` attribute, falling back to `name`
    pub name: Option<String>,
}

impl FieldMeta {
    pub fn new(label: Option<String>, name: Option<String>) -> Self {
        Self { label, name }
    }
}

/// Decides whether a field holds a comma-separated list of category ids.
pub trait FieldMatcher {
    fn matches(&self, field: &FieldMeta) -> bool;
}

/// Built-in detection strategies.
///
/// Host UI versions differ: older object editors expose the setting key as a
/// `data-field-name` ending in `_categories`, newer ones only render a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum DetectionRule {
    /// Label text contains the value, case-insensitive
    LabelContains(String),
    /// Field name ends with the value, case-insensitive
    NameSuffix(String),
}

impl DetectionRule {
    pub fn default_rules() -> Vec<DetectionRule> {
        vec![
            DetectionRule::LabelContains("categories".to_string()),
            DetectionRule::NameSuffix("_categories".to_string()),
        ]
    }
}

impl FieldMatcher for DetectionRule {
    fn matches(&self, field: &FieldMeta) -> bool {
        match self {
            DetectionRule::LabelContains(needle) => field
                .label
                .as_deref()
                .is_some_and(|label| label.to_lowercase().contains(&needle.to_lowercase())),
            DetectionRule::NameSuffix(suffix) => field
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().ends_with(&suffix.to_lowercase())),
        }
    }
}

/// Any rule matching is enough; an empty list matches nothing.
impl<M: FieldMatcher> FieldMatcher for Vec<M> {
    fn matches(&self, field: &FieldMeta) -> bool {
        self.iter().any(|m| m.matches(field))
    }
}
