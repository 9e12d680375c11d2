//! Ordered set of enabled blocks

use crate::block::{Block, BlockHooks};
use crate::state::{ResultSet, SearchState};
use crate::surface::Element;
use autosuggest_config::{Category, PopupConfig};
use std::collections::HashMap;

/// Blocks built once from `enabled_blocks` and reused for every render
#[derive(Debug)]
pub struct BlockRegistry {
    blocks: Vec<Block>,
}

impl BlockRegistry {
    /// Instantiate one block per enabled category, in configured order
    pub fn new(config: &PopupConfig, hooks: &HashMap<Category, BlockHooks>) -> Self {
        let blocks = config
            .enabled_blocks()
            .into_iter()
            .map(|category| {
                Block::new(
                    category,
                    config.block(category).clone(),
                    hooks.get(&category).cloned().unwrap_or_default(),
                )
            })
            .collect();
        Self { blocks }
    }

    /// Render every block, one container per block in configured order
    ///
    /// Categories absent from `result_set` render as empty blocks.
    pub fn render(&mut self, result_set: &ResultSet, state: &SearchState) -> Vec<Element> {
        self.blocks
            .iter_mut()
            .map(|block| block.render(result_set.items(block.category()), state))
            .collect()
    }

    /// Current container of each block
    pub fn elements(&self) -> Vec<Element> {
        self.blocks.iter().map(|b| b.element().clone()).collect()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.blocks.iter().map(Block::category).collect()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
