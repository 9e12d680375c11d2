//! Popup and per-block render options

use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Inline style declarations, property name to value
pub type StyleMap = BTreeMap<String, String>;

/// Render options for one block
///
/// Immutable after the popup is constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockConfig {
    /// Tag of the block container element
    #[serde(default = "default_container_elm_type")]
    pub container_elm_type: String,
    /// Extra class added to the container next to `block-container`
    #[serde(default)]
    pub container_class_name: Option<String>,
    /// Inline style applied to the container
    #[serde(default)]
    pub container_style: StyleMap,
    /// Tag of each item element
    #[serde(default = "default_child_elm_type")]
    pub child_elm_type: String,
    /// Extra class added to each item next to `block-item`
    #[serde(default)]
    pub child_class_name: Option<String>,
    /// Inline style applied to each item
    #[serde(default)]
    pub child_style: StyleMap,
}

fn default_container_elm_type() -> String {
    "div".to_string()
}

fn default_child_elm_type() -> String {
    "a".to_string()
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            container_elm_type: default_container_elm_type(),
            container_class_name: None,
            container_style: StyleMap::new(),
            child_elm_type: default_child_elm_type(),
            child_class_name: None,
            child_style: StyleMap::new(),
        }
    }
}

/// Popup-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopupConfig {
    /// Blocks to render, in display order
    #[serde(default = "default_enabled_blocks")]
    pub enabled_blocks: Vec<Category>,
    /// Options for the Suggestion block
    #[serde(default)]
    pub suggestion: BlockConfig,
    /// Options for the Collection block
    #[serde(default)]
    pub collection: BlockConfig,
    /// Options for the Product block
    #[serde(default)]
    pub product: BlockConfig,
    /// Extra class added to the popup next to `suggestion-popup`
    #[serde(default)]
    pub popup_class_name: Option<String>,
    /// Inline style applied to the popup after anchoring
    #[serde(default)]
    pub popup_style: StyleMap,
}

fn default_enabled_blocks() -> Vec<Category> {
    Category::ALL.to_vec()
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            enabled_blocks: default_enabled_blocks(),
            suggestion: BlockConfig::default(),
            collection: BlockConfig::default(),
            product: BlockConfig::default(),
            popup_class_name: None,
            popup_style: StyleMap::new(),
        }
    }
}

impl PopupConfig {
    /// Config restricted to the given blocks, everything else defaulted
    pub fn with_blocks(blocks: impl IntoIterator<Item = Category>) -> Self {
        Self {
            enabled_blocks: blocks.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Render options for a category
    pub fn block(&self, category: Category) -> &BlockConfig {
        match category {
            Category::Suggestion => &self.suggestion,
            Category::Collection => &self.collection,
            Category::Product => &self.product,
        }
    }

    /// Enabled blocks in configured order, repeated entries dropped
    pub fn enabled_blocks(&self) -> Vec<Category> {
        let mut seen = Vec::with_capacity(self.enabled_blocks.len());
        for &category in &self.enabled_blocks {
            if seen.contains(&category) {
                warn!(%category, "ignoring repeated entry in enabled_blocks");
                continue;
            }
            seen.push(category);
        }
        seen
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Popup and block options
    #[serde(default)]
    pub popup: PopupConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_defaults_match_anchor_items() {
        let block = BlockConfig::default();
        assert_eq!(block.container_elm_type, "div");
        assert_eq!(block.child_elm_type, "a");
        assert!(block.container_class_name.is_none());
        assert!(block.child_style.is_empty());
    }

    #[test]
    fn all_blocks_enabled_by_default() {
        let config = PopupConfig::default();
        assert_eq!(config.enabled_blocks(), Category::ALL.to_vec());
    }

    #[test]
    fn repeated_blocks_keep_first_position() {
        let config = PopupConfig::with_blocks([
            Category::Product,
            Category::Suggestion,
            Category::Product,
        ]);
        assert_eq!(
            config.enabled_blocks(),
            vec![Category::Product, Category::Suggestion]
        );
    }

    #[test]
    fn partial_block_config_keeps_tag_defaults() {
        let toml = r#"
            child_class_name = "hit"
            [child_style]
            color = "red"
        "#;
        let block: BlockConfig = toml::from_str(toml).unwrap();
        assert_eq!(block.child_elm_type, "a");
        assert_eq!(block.child_class_name.as_deref(), Some("hit"));
        assert_eq!(block.child_style.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn block_lookup_by_category() {
        let mut config = PopupConfig::default();
        config.product.child_elm_type = "li".to_string();
        assert_eq!(config.block(Category::Product).child_elm_type, "li");
        assert_eq!(config.block(Category::Collection).child_elm_type, "a");
    }
}
