use serde::{Deserialize, Serialize};

use crate::book::BookSummary;

/// The `{ "data": ... }` wrapper around every catalog response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response of the category-listing endpoint.
pub type CategoryList = Envelope<Categories>;

/// Response of the ranked-works endpoint.
pub type WorkList = Envelope<Works>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Categories {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Catalog-assigned category URI, used as the genre id.
    pub cat_uri: String,
    /// Display name of the category.
    pub menu_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Works {
    pub works: Vec<BookSummary>,
}

impl Works {
    /// The rank-1 entry, if the catalog returned any.
    pub fn top(&self) -> Option<&BookSummary> {
        self.works.first()
    }

    pub fn into_top(self) -> Option<BookSummary> {
        self.works.into_iter().next()
    }
}
