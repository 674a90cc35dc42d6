use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::upstream::Category;

/// A selectable genre, shaped as a picker option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Genre {
    #[serde(rename = "value", alias = "id")]
    pub id: String,
    pub label: String,
}

impl Genre {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Maps catalog categories to genres, keeping upstream order and the
    /// first occurrence of a duplicated id.
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Vec<Genre> {
        let mut seen = HashSet::new();
        categories
            .into_iter()
            .filter(|&category| seen.insert(category.cat_uri.as_str()))
            .map(Genre::from)
            .collect()
    }

    pub fn matches(&self, query: &str) -> bool {
        self.label.to_lowercase().contains(&query.to_lowercase())
    }
}

impl From<&Category> for Genre {
    fn from(category: &Category) -> Self {
        Self::new(&category.cat_uri, &category.menu_text)
    }
}

/// Genres whose label contains `query`, case-insensitively.
pub fn filter_genres(genres: &[Genre], query: &str) -> Vec<Genre> {
    genres
        .iter()
        .filter(|genre| genre.matches(query))
        .cloned()
        .collect()
}
