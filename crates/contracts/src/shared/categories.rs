use serde::{Deserialize, Serialize};

/// Category as served by the host's site payload.
///
/// The payload carries many more keys per category; only the ones needed to
/// label and pick categories are kept, the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub parent_category_id: Option<i64>,
}

/// Response of the catalog endpoint (`GET /site.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteCategoriesResponse {
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
}
