//! Result categories a popup can render

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of search results, each rendered as its own block
///
/// Serialised by its bare name (`"Suggestion"`, `"Collection"`, `"Product"`),
/// which is also the key used in backend result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Free-text query suggestions (`{url, term}`)
    Suggestion,
    /// Product collections (`{url, title}`)
    Collection,
    /// Individual products (`{url, title, image, brand, price}`)
    Product,
}

impl Category {
    /// All categories in their default display order
    pub const ALL: [Category; 3] = [Category::Suggestion, Category::Collection, Category::Product];

    /// The category name as used in result sets
    pub fn name(self) -> &'static str {
        match self {
            Category::Suggestion => "Suggestion",
            Category::Collection => "Collection",
            Category::Product => "Product",
        }
    }

    /// Upper-cased name shown in the block title
    pub fn title(self) -> String {
        self.name().to_uppercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
