//! Category catalog
//!
//! The catalog is built once per page load from the host's site payload and
//! shared read-only with the detector and every picker instance.

use contracts::shared::categories::CategoryDto;
use deunicode::deunicode_char;
use once_cell::unsync::OnceCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub parent_id: Option<i64>,
    /// `"<parent name> > <name>"`, or just `name` for top-level categories
    pub full_name: String,
    search_key: String,
}

impl Category {
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Case-insensitive substring match; `filter` must already be lowercase.
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter.is_empty() || self.search_key.contains(filter)
    }
}

/// Sorted, immutable category list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Category>,
}

impl Catalog {
    pub fn from_categories(categories: Vec<CategoryDto>) -> Self {
        let names: HashMap<i64, String> = categories
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();

        let mut entries: Vec<Category> = categories
            .into_iter()
            .map(|dto| {
                let full_name = match dto.parent_category_id.and_then(|pid| names.get(&pid)) {
                    Some(parent) => format!("{} > {}", parent, dto.name),
                    None => dto.name.clone(),
                };
                Category {
                    id: dto.id,
                    slug: dto.slug,
                    name: dto.name,
                    parent_id: dto.parent_category_id,
                    search_key: full_name.to_lowercase(),
                    full_name,
                }
            })
            .collect();

        // sort_by is stable: categories with identical full names keep payload order
        entries.sort_by(|a, b| compare_full_names(&a.full_name, &b.full_name));

        Self { entries }
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// One `"<id>: <full name>"` line per category, in catalog order.
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|c| format!("{}: {}", c.id, c.full_name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Locale-aware ordering of full names.
///
/// Primary key is the accent-folded, lowercased name ("Épicerie" sorts with
/// "epicerie"), the raw name breaks ties so the order stays total. Non-Latin
/// names follow all Latin ones.
pub fn compare_full_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercased name with Latin letters stripped of their accents. Other
/// scripts keep their own letters so they sort after Latin as whole blocks.
fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        match deunicode_char(c) {
            Some(folded) if is_latin(c) => key.push_str(folded),
            _ => key.push(c),
        }
    }
    key.to_lowercase()
}

fn is_latin(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    NotLoaded,
    LoadedEmpty,
    Loaded(usize),
}

/// Single-initialization holder for the catalog.
///
/// Stays in `NotLoaded` until the loader reports back; a failed load fills it
/// with an empty catalog so "loaded empty" can be told apart from "pending".
#[derive(Debug, Default)]
pub struct CatalogSlot {
    cell: OnceCell<Arc<Catalog>>,
}

impl CatalogSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the slot was already filled; the new value is dropped.
    pub fn fill(&self, catalog: Catalog) -> bool {
        self.cell.set(Arc::new(catalog)).is_ok()
    }

    pub fn get(&self) -> Option<&Arc<Catalog>> {
        self.cell.get()
    }

    /// The catalog, if loaded and non-empty.
    pub fn ready(&self) -> Option<Arc<Catalog>> {
        self.cell.get().filter(|c| !c.is_empty()).cloned()
    }

    pub fn state(&self) -> CatalogState {
        match self.cell.get() {
            None => CatalogState::NotLoaded,
            Some(c) if c.is_empty() => CatalogState::LoadedEmpty,
            Some(c) => CatalogState::Loaded(c.len()),
        }
    }
}
