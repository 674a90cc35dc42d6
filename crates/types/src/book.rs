use serde::{Deserialize, Deserializer, Serialize};

/// Number of author names shown on a book card.
pub const MAX_DISPLAYED_AUTHORS: usize = 2;

/// A ranked work as returned by the catalog, and as persisted in the block's
/// `selectedBook` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// The catalog sometimes sends ISBNs as JSON numbers.
    #[serde(deserialize_with = "string_or_number")]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_urls: Option<CoverUrls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
    /// Retailer-facing slug of the work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_friendly_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub author_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct CoverUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Cover>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Cover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub series_name: String,
    /// Slug of the public series page.
    pub seo_friendly_url: String,
}

impl BookSummary {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            authors: Vec::new(),
            cover_urls: None,
            series: None,
            seo_friendly_url: None,
        }
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.authors.push(Author {
            author_display: name.into(),
        });
        self
    }

    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_urls = Some(CoverUrls {
            medium: Some(Cover {
                cover_url: Some(url.into()),
            }),
        });
        self
    }

    pub fn with_series(mut self, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.series = Some(Series {
            series_name: name.into(),
            seo_friendly_url: slug.into(),
        });
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.seo_friendly_url = Some(slug.into());
        self
    }

    /// Medium cover URL, ignoring blank values.
    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_urls
            .as_ref()
            .and_then(|urls| urls.medium.as_ref())
            .and_then(|cover| cover.cover_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Names shown on the card: at most [`MAX_DISPLAYED_AUTHORS`].
    pub fn displayed_authors(&self) -> impl Iterator<Item = &str> {
        self.authors
            .iter()
            .take(MAX_DISPLAYED_AUTHORS)
            .map(|author| author.author_display.as_str())
    }

    pub fn authors_line(&self) -> String {
        self.displayed_authors().collect::<Vec<_>>().join(", ")
    }

    /// Slug used for the retailer link, falling back to the ISBN.
    pub fn retail_slug(&self) -> &str {
        self.seo_friendly_url
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or(&self.isbn)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
