//! Persisted configuration of one block instance.
//!
//! Attributes are the only state that survives an edit/save cycle. Documents
//! written before attributes were versioned carry no `version` field and are
//! migrated on load.

use bestseller_types::BookSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BlockError, Result};

/// Version written by this block.
pub const ATTRIBUTES_VERSION: u32 = 1;

pub const DEFAULT_TITLE: &str = "Bestsellers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BlockAttributes {
    pub version: u32,
    /// Editable heading shown above the book card.
    #[serde(default = "default_title")]
    pub title: String,
    /// Id of the chosen genre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_genre: Option<String>,
    /// Top seller of `selected_genre` at the time it was fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_book: Option<BookSummary>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for BlockAttributes {
    fn default() -> Self {
        Self {
            version: ATTRIBUTES_VERSION,
            title: default_title(),
            selected_genre: None,
            selected_book: None,
        }
    }
}

impl BlockAttributes {
    pub fn with_genre(mut self, genre_id: impl Into<String>) -> Self {
        self.selected_genre = Some(genre_id.into());
        self
    }

    pub fn with_book(mut self, book: BookSummary) -> Self {
        self.selected_book = Some(book);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Decodes a stored document, migrating older shapes.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(BlockError::InvalidAttributes {
                message: "attributes must be a JSON object".to_string(),
            });
        };

        let version = object.get("version").cloned();
        let attributes = match version {
            None | Some(Value::Null) => migrate_unversioned(&mut object)?,
            Some(Value::Number(n)) => match n.as_u64() {
                Some(1) => serde_json::from_value(Value::Object(object))?,
                Some(found) => {
                    return Err(BlockError::UnsupportedVersion {
                        found,
                        latest: ATTRIBUTES_VERSION,
                    });
                }
                None => {
                    return Err(BlockError::InvalidAttributes {
                        message: format!("version must be a positive integer, got {}", n),
                    });
                }
            },
            Some(other) => {
                return Err(BlockError::InvalidAttributes {
                    message: format!("version must be a number, got {}", other),
                });
            }
        };

        Ok(attributes.normalized())
    }

    pub fn to_value(&self) -> Value {
        // Serializing plain structs and strings cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// A book without a genre has nothing to refer to.
    fn normalized(mut self) -> Self {
        if self.selected_genre.is_none() && self.selected_book.take().is_some() {
            debug!("Dropping selected book without a selected genre");
        }
        self
    }
}

/// Unversioned documents stored the raw catalog record as `selectedBook` and
/// may carry `null` for unset fields.
fn migrate_unversioned(object: &mut serde_json::Map<String, Value>) -> Result<BlockAttributes> {
    let title = match object.remove("title") {
        Some(Value::String(title)) => title,
        _ => default_title(),
    };

    let selected_genre = match object.remove("selectedGenre") {
        Some(Value::String(genre)) if !genre.is_empty() => Some(genre),
        _ => None,
    };

    let selected_book = match object.remove("selectedBook") {
        None | Some(Value::Null) => None,
        Some(book) => match serde_json::from_value::<BookSummary>(book) {
            Ok(book) => Some(book),
            Err(e) => {
                warn!("Discarding unreadable selected book during migration: {}", e);
                None
            }
        },
    };

    debug!(version = ATTRIBUTES_VERSION, "Migrated unversioned block attributes");

    Ok(BlockAttributes {
        version: ATTRIBUTES_VERSION,
        title,
        selected_genre,
        selected_book,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let attributes = BlockAttributes::default();
        assert_eq!(attributes.title, "Bestsellers");
        assert_eq!(attributes.version, ATTRIBUTES_VERSION);
        assert!(attributes.selected_genre.is_none());
        assert!(attributes.selected_book.is_none());
    }

    #[test]
    fn test_current_version_round_trips() {
        let attributes = BlockAttributes::default()
            .with_title("Top picks")
            .with_genre("fiction")
            .with_book(BookSummary::new("123", "T").with_author("A"));

        let decoded = BlockAttributes::from_value(attributes.to_value()).unwrap();
        assert_eq!(decoded, attributes);
    }

    #[test]
    fn test_migrates_unversioned_document() {
        let legacy = json!({
            "title": "Weekly",
            "selectedGenre": "fiction",
            "selectedBook": {
                "isbn": 9780241988268u64,
                "title": "T",
                "authors": [{ "authorDisplay": "A" }],
                "coverUrls": { "medium": { "coverUrl": "" } },
                "workId": 42
            }
        });

        let attributes = BlockAttributes::from_value(legacy).unwrap();
        assert_eq!(attributes.version, 1);
        assert_eq!(attributes.title, "Weekly");
        assert_eq!(attributes.selected_genre.as_deref(), Some("fiction"));
        assert_eq!(attributes.selected_book.unwrap().isbn, "9780241988268");
    }

    #[test]
    fn test_migration_drops_unreadable_book() {
        let legacy = json!({ "selectedGenre": "fiction", "selectedBook": { "name": "?" } });

        let attributes = BlockAttributes::from_value(legacy).unwrap();
        assert_eq!(attributes.title, DEFAULT_TITLE);
        assert!(attributes.selected_book.is_none());
    }

    #[test]
    fn test_book_without_genre_is_dropped() {
        let document = json!({ "version": 1, "selectedBook": { "isbn": "1", "title": "T" } });
        let attributes = BlockAttributes::from_value(document).unwrap();
        assert!(attributes.selected_book.is_none());
    }

    #[test]
    fn test_rejects_unknown_versions_and_shapes() {
        assert!(matches!(
            BlockAttributes::from_value(json!({ "version": 2 })),
            Err(BlockError::UnsupportedVersion { found: 2, .. })
        ));
        assert!(BlockAttributes::from_value(json!({ "version": "1" })).is_err());
        assert!(BlockAttributes::from_value(json!(["title"])).is_err());
        assert!(BlockAttributes::from_json("not json").is_err());
    }

    #[test]
    fn test_versioned_document_is_strict() {
        let document = json!({
            "version": 1,
            "selectedGenre": "fiction",
            "selectedBook": { "isbn": "1" },
        });
        assert!(BlockAttributes::from_value(document).is_err());
    }
}
