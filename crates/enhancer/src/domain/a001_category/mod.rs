pub mod api;
pub mod catalog;
pub mod detection;
pub mod ui;

pub use catalog::{Catalog, CatalogSlot, CatalogState, Category};
