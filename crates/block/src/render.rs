//! Markup for the block.
//!
//! The display output is a pure function of the persisted attributes. The
//! edit output adds the interactive controls and keeps every link inert.

use std::fmt::Write;

use bestseller_types::{BookSummary, Genre};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::api::BestsellerApi;
use crate::attributes::BlockAttributes;
use crate::widget::{BestsellerWidget, LoadError, WidgetPhase};

/// Class of the block wrapper, derived from the block name.
pub const BLOCK_CLASS: &str = "wp-block-pwn-bestseller-bestseller-block";

const BLOCK_STYLE: &str = "text-align:center;max-width:600px;margin:0 auto;padding:20px";

const BUY_LABEL: &str = "BUY FROM AMAZON";

const GENRE_PROMPT: &str = "Choose a genre...";

/// Characters kept verbatim in a single path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Slugs may span several segments.
const SLUG: &AsciiSet = &SEGMENT.remove(b'/');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Inside the editor: links are inert.
    Edit,
    /// Saved page output.
    Display,
}

/// Static inputs of the markup: bundled assets and link targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Public URL prefix of the bundled images.
    pub asset_base_url: String,
    pub publisher_base_url: String,
    pub retailer_base_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            asset_base_url: "/wp-content/plugins/pwn-bestseller-block/build/images/".to_string(),
            publisher_base_url: "https://www.penguin.co.uk".to_string(),
            retailer_base_url: "https://amazon.co.uk".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn placeholder_cover_url(&self) -> String {
        self.asset_url("placeholder.png")
    }

    pub fn logo_url(&self) -> String {
        self.asset_url("logo.svg")
    }

    pub fn book_page_url(&self, book: &BookSummary) -> String {
        format!(
            "{}/books/{}",
            self.publisher_base_url.trim_end_matches('/'),
            utf8_percent_encode(&book.isbn, SEGMENT)
        )
    }

    pub fn series_page_url(&self, slug: &str) -> String {
        format!(
            "{}/series/{}",
            self.publisher_base_url.trim_end_matches('/'),
            utf8_percent_encode(slug.trim_start_matches('/'), SLUG)
        )
    }

    pub fn retailer_url(&self, book: &BookSummary) -> String {
        format!(
            "{}/{}",
            self.retailer_base_url.trim_end_matches('/'),
            utf8_percent_encode(book.retail_slug().trim_start_matches('/'), SLUG)
        )
    }

    fn asset_url(&self, name: &str) -> String {
        format!("{}/{}", self.asset_base_url.trim_end_matches('/'), name)
    }
}

/// Saved output of a block: heading and card when a book is stored, an
/// empty wrapper otherwise.
pub fn render_display(attributes: &BlockAttributes, options: &RenderOptions) -> String {
    let mut html = String::new();
    open_wrapper(&mut html);

    if let Some(book) = &attributes.selected_book {
        let _ = write!(html, "<h2>{}</h2>", escape(&attributes.title));
        render_book_card(&mut html, book, RenderMode::Display, options);
    }

    html.push_str("</div>");
    html
}

/// Editor output of a mounted widget.
pub fn render_edit<A: BestsellerApi>(
    widget: &BestsellerWidget<A>,
    options: &RenderOptions,
) -> String {
    let attributes = widget.attributes();
    let selected = attributes.selected_genre.as_deref();

    let mut html = String::new();
    open_wrapper(&mut html);

    match widget.phase() {
        WidgetPhase::NoGenreSelected => {
            html.push_str("<div class=\"genre-selection-initial\">");
            let _ = write!(html, "<h2>{}</h2>", GENRE_PROMPT);
            html.push_str("<div class=\"genre-select-wrapper\">");
            render_genre_picker(
                &mut html,
                widget.genres(),
                selected,
                GENRE_PROMPT,
                widget.genre_error(),
            );
            html.push_str("</div></div>");
        }
        phase => {
            let _ = write!(
                html,
                "<h2 class=\"block-title\" contenteditable=\"true\" \
                 data-placeholder=\"Enter title...\">{}</h2>",
                escape(&attributes.title)
            );

            if phase == WidgetPhase::Loading {
                html.push_str(
                    "<div class=\"bestseller-loading\">\
                     <div class=\"loading-text\">Loading...</div></div>",
                );
            }

            if let WidgetPhase::LoadError(error) = &phase {
                render_load_error(&mut html, "Could not load the bestseller", error);
            }

            if let Some(book) = &attributes.selected_book {
                render_book_card(&mut html, book, RenderMode::Edit, options);
            }
        }
    }

    html.push_str("<aside class=\"block-inspector\"><section class=\"panel-body\">");
    html.push_str("<h3 class=\"panel-title\">Block Settings</h3>");
    render_genre_picker(
        &mut html,
        widget.genres(),
        selected,
        "Select genre...",
        widget.genre_error(),
    );
    html.push_str("</section></aside>");

    html.push_str("</div>");
    html
}

/// The cover, title, authors, links and publisher strip of one book.
pub fn render_book_card(
    html: &mut String,
    book: &BookSummary,
    mode: RenderMode,
    options: &RenderOptions,
) {
    let cover = match book.cover_image_url() {
        Some(url) => url.to_string(),
        None => options.placeholder_cover_url(),
    };

    html.push_str("<div class=\"book-display\">");

    match mode {
        RenderMode::Edit => html.push_str("<a>"),
        RenderMode::Display => {
            let _ = write!(
                html,
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                escape(&options.book_page_url(book))
            );
        }
    }
    let _ = write!(
        html,
        "<img src=\"{}\" alt=\"{}\" class=\"book-cover\"></a>",
        escape(&cover),
        escape(&book.title)
    );

    let _ = write!(html, "<h3 class=\"book-title\">{}</h3>", escape(&book.title));
    let _ = write!(html, "<p class=\"book-authors\">{}</p>", escape(&book.authors_line()));

    if let Some(series) = &book.series {
        let href = match mode {
            RenderMode::Edit => "#".to_string(),
            RenderMode::Display => options.series_page_url(&series.seo_friendly_url),
        };
        let _ = write!(
            html,
            "<a href=\"{}\" class=\"series-link\">{}</a>",
            escape(&href),
            escape(&series.series_name)
        );
    }

    let href = match mode {
        RenderMode::Edit => "#".to_string(),
        RenderMode::Display => options.retailer_url(book),
    };
    let _ = write!(
        html,
        "<a href=\"{}\" class=\"buy-button\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape(&href),
        BUY_LABEL
    );

    html.push_str("</div>");

    let _ = write!(
        html,
        "<div class=\"penguin-wrap\"><div class=\"penguin-logo\">\
         <img src=\"{}\" alt=\"\"></div></div>",
        escape(&options.logo_url())
    );
}

fn render_genre_picker(
    html: &mut String,
    genres: &[Genre],
    selected: Option<&str>,
    placeholder: &str,
    error: Option<&LoadError>,
) {
    let is_selected = |genre: &Genre| Some(genre.id.as_str()) == selected;
    let has_selection = genres.iter().any(is_selected);

    html.push_str("<select class=\"genre-select\" name=\"genre\">");
    let _ = write!(
        html,
        "<option value=\"\" disabled{}>{}</option>",
        if has_selection { "" } else { " selected" },
        escape(placeholder)
    );

    for genre in genres {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(&genre.id),
            if is_selected(genre) { " selected" } else { "" },
            escape(&genre.label)
        );
    }

    html.push_str("</select>");

    if let Some(error) = error {
        render_load_error(html, "Could not load genres", error);
    }
}

fn render_load_error(html: &mut String, summary: &str, error: &LoadError) {
    let _ = write!(
        html,
        "<div class=\"bestseller-error\" role=\"alert\" title=\"{}\">{}</div>",
        escape(&error.message),
        escape(summary)
    );
}

fn open_wrapper(html: &mut String) {
    let _ = write!(html, "<div class=\"{}\" style=\"{}\">", BLOCK_CLASS, BLOCK_STYLE);
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(book: &BookSummary, mode: RenderMode) -> String {
        let mut html = String::new();
        render_book_card(&mut html, book, mode, &RenderOptions::default());
        html
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_link_targets() {
        let options = RenderOptions::default();
        let book = BookSummary::new("978 1", "T").with_slug("the-title/9781");

        assert_eq!(options.book_page_url(&book), "https://www.penguin.co.uk/books/978%201");
        assert_eq!(options.retailer_url(&book), "https://amazon.co.uk/the-title/9781");
        assert_eq!(
            options.series_page_url("discworld"),
            "https://www.penguin.co.uk/series/discworld"
        );
        assert_eq!(
            options.placeholder_cover_url(),
            "/wp-content/plugins/pwn-bestseller-block/build/images/placeholder.png"
        );
    }

    #[test]
    fn test_edit_card_links_are_inert() {
        let book = BookSummary::new("1", "T").with_series("S", "s");
        let html = card(&book, RenderMode::Edit);

        assert!(html.contains("<a><img"));
        assert!(html.contains("<a href=\"#\" class=\"series-link\">S</a>"));
        assert!(html.contains("<a href=\"#\" class=\"buy-button\""));
        assert!(!html.contains("penguin.co.uk"));
        assert!(!html.contains("amazon.co.uk"));
    }

    #[test]
    fn test_display_card_links() {
        let book = BookSummary::new("1", "T").with_series("S", "s").with_slug("t-1");
        let html = card(&book, RenderMode::Display);

        assert!(html.contains("href=\"https://www.penguin.co.uk/books/1\""));
        assert!(html.contains("href=\"https://www.penguin.co.uk/series/s\" class=\"series-link\""));
        assert!(html.contains("href=\"https://amazon.co.uk/t-1\" class=\"buy-button\""));
    }

    #[test]
    fn test_card_escapes_upstream_text() {
        let book = BookSummary::new("1", "<script>alert(1)</script>").with_author("A & B");
        let html = card(&book, RenderMode::Display);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<p class=\"book-authors\">A &amp; B</p>"));
    }

    #[test]
    fn test_picker_marks_selection() {
        let genres = vec![Genre::new("fiction", "Fiction"), Genre::new("scifi", "Sci-Fi")];

        let mut html = String::new();
        render_genre_picker(&mut html, &genres, Some("scifi"), "Pick", None);
        assert!(html.contains("<option value=\"scifi\" selected>Sci-Fi</option>"));
        assert!(html.contains("<option value=\"\" disabled>Pick</option>"));

        let mut html = String::new();
        render_genre_picker(&mut html, &genres, Some("unknown"), "Pick", None);
        assert!(html.contains("<option value=\"\" disabled selected>Pick</option>"));
    }
}
