//! Search state and result payloads

use crate::cancel::CancelHandle;
use autosuggest_config::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Category-specific result payload
///
/// The core only routes items to their block's renderer; individual fields
/// are read by the renderer for that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawItem(Value);

impl RawItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Display text of a field; numbers and booleans are stringified,
    /// missing or structured fields give an empty string
    pub fn field(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(value) => display_text(value),
            None => String::new(),
        }
    }

    /// Display text of the whole payload
    pub fn display(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

impl From<Value> for RawItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Results of one search, keyed by category
///
/// A category missing from the map renders as an empty block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(HashMap<Category, Vec<RawItem>>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, category: Category, items: impl IntoIterator<Item = RawItem>) -> Self {
        self.insert(category, items);
        self
    }

    pub fn insert(&mut self, category: Category, items: impl IntoIterator<Item = RawItem>) {
        self.0.insert(category, items.into_iter().collect());
    }

    /// Items for a category, empty when absent
    pub fn items(&self, category: Category) -> &[RawItem] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn total_items(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &Vec<RawItem>)> {
        self.0.iter()
    }
}

/// Conversation state owned by the search controller
///
/// Blocks and the popup read it during rendering; only the controller
/// mutates it. `pending` is set exactly while a request is in flight.
#[derive(Debug, Default)]
pub struct SearchState {
    pub(crate) query: String,
    pub(crate) result_set: ResultSet,
    pub(crate) pending: Option<CancelHandle>,
}

impl SearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Current input text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Latest accepted result set
    pub fn result_set(&self) -> &ResultSet {
        &self.result_set
    }

    /// Whether a search request is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
