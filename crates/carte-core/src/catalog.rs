use std::collections::BTreeMap;

use serde::Serialize;

use crate::vocabulary::VocabularyStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub spelling: String,
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sorted ids of documents whose names matched this dish
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogGroup {
    pub category_tag: String,
    pub entries: Vec<CatalogEntry>,
}

/// Dish entries grouped by category tag, with the documents that reference
/// each dish
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DishCatalog {
    pub groups: Vec<CatalogGroup>,
}

impl DishCatalog {
    /// Snapshot of `store` after annotation. Groups are ordered by tag and
    /// entries by gloss.
    pub fn build(store: &VocabularyStore) -> Self {
        let mut by_tag: BTreeMap<&str, Vec<CatalogEntry>> = BTreeMap::new();

        for dish in store.dishes() {
            let (Some(tag), Some(spelling)) = (dish.category_tag(), dish.primary_spelling()) else {
                continue;
            };
            by_tag.entry(tag).or_default().push(CatalogEntry {
                spelling: spelling.to_string(),
                gloss: dish.gloss().to_string(),
                reference_url: dish.reference_url().map(str::to_string),
                image_url: dish.image_url().map(str::to_string),
                description: dish.description().map(str::to_string),
                documents: dish.referencing_documents(),
            });
        }

        let groups: Vec<CatalogGroup> = by_tag
            .into_iter()
            .map(|(tag, mut entries)| {
                entries.sort_by(|a, b| a.gloss.cmp(&b.gloss));
                CatalogGroup {
                    category_tag: tag.to_string(),
                    entries,
                }
            })
            .collect();

        tracing::info!(
            "Dish catalog: {} groups, {} dishes",
            groups.len(),
            groups.iter().map(|g| g.entries.len()).sum::<usize>()
        );

        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.entries.is_empty())
    }
}
