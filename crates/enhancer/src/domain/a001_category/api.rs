//! Catalog loading
//!
//! A single read of the host's site payload per page load; no retries.

use super::catalog::Catalog;
use contracts::shared::categories::SiteCategoriesResponse;
use gloo_net::http::Request;

/// Fetch the category list and build the sorted catalog.
pub async fn load_catalog(url: &str) -> Result<Catalog, String> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", url, response.status()));
    }

    let payload: SiteCategoriesResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(Catalog::from_categories(payload.categories))
}
