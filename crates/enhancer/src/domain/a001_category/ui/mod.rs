pub mod helper;
pub mod picker;

use serde::{Deserialize, Serialize};

/// What gets attached to a detected categories field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementMode {
    /// "Select" button opening the checkbox picker
    #[default]
    Picker,
    /// Static hint under the field
    Helper,
}
