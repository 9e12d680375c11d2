//! Static catalog searched with simulated latency

use anyhow::{Context, Result};
use async_trait::async_trait;
use autosuggest_core::{Category, RawItem, ResultSet, SearchBackend};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const DEMO_CATALOG: &str = include_str!("../assets/catalog.json");

/// Filters a fixed result set by case-insensitive substring match on any
/// scalar field of each item
#[derive(Debug, Clone)]
pub struct CatalogBackend {
    catalog: ResultSet,
    latency: Duration,
}

impl CatalogBackend {
    pub fn new(catalog: ResultSet, latency: Duration) -> Self {
        Self { catalog, latency }
    }

    pub fn demo(latency: Duration) -> Result<Self> {
        let catalog = serde_json::from_str(DEMO_CATALOG).context("built-in catalog is invalid")?;
        Ok(Self::new(catalog, latency))
    }

    pub async fn load(path: &Path, latency: Duration) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        Ok(Self::new(catalog, latency))
    }

    pub fn catalog(&self) -> &ResultSet {
        &self.catalog
    }

    /// Items matching `query` in every category, preserving catalog order
    pub fn matching(&self, query: &str) -> ResultSet {
        let needle = query.to_lowercase();
        let mut result_set = ResultSet::new();
        for category in Category::ALL {
            let items = self.catalog.items(category);
            if items.is_empty() {
                continue;
            }
            result_set.insert(
                category,
                items
                    .iter()
                    .filter(|item| matches(item, &needle))
                    .cloned(),
            );
        }
        result_set
    }
}

fn matches(item: &RawItem, needle: &str) -> bool {
    let Some(fields) = item.value().as_object() else {
        return false;
    };
    fields
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "url" | "image"))
        .filter_map(|(_, value)| value.as_str())
        .any(|text| text.to_lowercase().contains(needle))
}

#[async_trait(?Send)]
impl SearchBackend for CatalogBackend {
    async fn search(&self, query: &str) -> anyhow::Result<ResultSet> {
        tokio::time::sleep(self.latency).await;
        let result_set = self.matching(query);
        debug!(query, items = result_set.total_items(), "catalog searched");
        Ok(result_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn demo() -> CatalogBackend {
        CatalogBackend::demo(Duration::from_millis(50)).unwrap()
    }

    #[test]
    fn demo_catalog_parses() {
        let backend = demo();
        assert_eq!(backend.catalog().items(Category::Suggestion).len(), 4);
        assert_eq!(backend.catalog().items(Category::Product).len(), 3);
    }

    #[test_case("sho", 2, 2, 2 ; "prefix")]
    #[test_case("SHO", 2, 2, 2 ; "case insensitive")]
    #[test_case("northpeak", 0, 0, 2 ; "brand")]
    #[test_case("zzz", 0, 0, 0 ; "no match")]
    fn filters_by_substring(query: &str, suggestions: usize, collections: usize, products: usize) {
        let result_set = demo().matching(query);
        assert_eq!(result_set.items(Category::Suggestion).len(), suggestions);
        assert_eq!(result_set.items(Category::Collection).len(), collections);
        assert_eq!(result_set.items(Category::Product).len(), products);
    }

    #[test]
    fn urls_are_not_searched() {
        assert_eq!(demo().matching("search").total_items(), 0);
        assert_eq!(demo().matching("/img").total_items(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn search_waits_for_latency() {
        let backend = demo();
        let start = tokio::time::Instant::now();

        let result_set = backend.search("boot").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(result_set.items(Category::Suggestion)[0].field("term"), "boots");
    }
}
