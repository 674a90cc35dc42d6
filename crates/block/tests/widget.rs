//! End-to-end behaviour of the widget against a scripted catalog.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bestseller_block::{
    BestsellerApi, BestsellerWidget, BlockAttributes, BlockError, RenderOptions, WidgetPhase,
    render_display, render_edit,
};
use bestseller_catalog::http::{HttpExecutor, Request, Response, ResponseError, ResponseErrorKind};
use bestseller_catalog::{CatalogClient, CatalogConfig};
use bestseller_types::{BookSummary, CategoryList, Envelope, Genre, WorkList, Works};

const GENRES: &str = r#"{"data":{"categories":[
    {"catUri":"fiction","menuText":"Fiction"},
    {"catUri":"scifi","menuText":"Sci-Fi"}
]}}"#;

const FICTION_TOP: &str =
    r#"{"data":{"works":[{"isbn":"123","title":"T","authors":[{"authorDisplay":"A"}]}]}}"#;

// Catalog executor answering by endpoint and genre
#[derive(Default)]
struct CatalogExecutor {
    genres: Option<Result<Response, ResponseError>>,
    works: HashMap<String, Result<Response, ResponseError>>,
    calls: AtomicUsize,
}

impl CatalogExecutor {
    fn ok(body: &str) -> Result<Response, ResponseError> {
        Ok(Response {
            status: 200,
            data: body.as_bytes().to_vec(),
        })
    }

    fn with_genres(mut self, body: &str) -> Self {
        self.genres = Some(Self::ok(body));
        self
    }

    fn with_works(mut self, genre: &str, outcome: Result<Response, ResponseError>) -> Self {
        self.works.insert(genre.to_string(), outcome);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpExecutor for CatalogExecutor {
    async fn execute(&self, request: Request) -> Result<Response, ResponseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let missing = Err(ResponseError::new(ResponseErrorKind::Connection, "no route"));
        if request.url.path().ends_with("/categories") {
            return self.genres.clone().unwrap_or(missing);
        }

        let genre = request.param_value("catUri").unwrap_or_default();
        self.works.get(genre).cloned().unwrap_or(missing)
    }
}

fn widget(
    executor: Arc<CatalogExecutor>,
    attributes: BlockAttributes,
) -> BestsellerWidget<CatalogClient> {
    let client = CatalogClient::new(executor, CatalogConfig::default().with_api_key("k")).unwrap();
    BestsellerWidget::new(client, attributes)
}

#[tokio::test]
async fn test_load_genres_filters_by_label() {
    let executor = Arc::new(CatalogExecutor::default().with_genres(GENRES));
    let mut widget = widget(executor.clone(), BlockAttributes::default());

    let genres = widget.load_genres("sci").await;
    assert_eq!(genres, vec![Genre::new("scifi", "Sci-Fi")]);
    assert_eq!(
        serde_json::to_value(&genres).unwrap(),
        serde_json::json!([{ "value": "scifi", "label": "Sci-Fi" }])
    );

    // The unfiltered set is kept for the selected-option lookup
    assert_eq!(widget.genres().len(), 2);

    let genres = widget.load_genres("").await;
    assert_eq!(genres.len(), 2);
    assert_eq!(executor.calls(), 2, "each picker interaction refetches");
}

#[tokio::test]
async fn test_bestseller_becomes_selected_book() {
    let executor = Arc::new(
        CatalogExecutor::default()
            .with_genres(GENRES)
            .with_works("fiction", CatalogExecutor::ok(FICTION_TOP)),
    );
    let mut widget = widget(executor, BlockAttributes::default());
    widget.mount().await;
    assert_eq!(widget.phase(), WidgetPhase::NoGenreSelected);

    widget.select_genre("fiction").await;

    assert_eq!(widget.phase(), WidgetPhase::Loaded);
    assert!(!widget.is_loading());
    assert_eq!(widget.selected_genre(), Some(&Genre::new("fiction", "Fiction")));
    assert_eq!(
        widget.attributes().selected_book,
        Some(BookSummary::new("123", "T").with_author("A"))
    );

    let options = RenderOptions::default();
    let html = render_display(widget.attributes(), &options);
    assert!(html.contains("<h3 class=\"book-title\">T</h3>"));
    assert!(html.contains("<p class=\"book-authors\">A</p>"));
    assert!(html.contains(&format!("src=\"{}\"", options.placeholder_cover_url())));
    assert!(!html.contains("series-link"));
}

#[tokio::test]
async fn test_upstream_timeout_keeps_previous_book() {
    let previous = BookSummary::new("999", "Previous");
    let executor = Arc::new(CatalogExecutor::default().with_genres(GENRES).with_works(
        "fiction",
        Err(ResponseError::new(ResponseErrorKind::Timeout, "operation timed out")),
    ));
    let attributes = BlockAttributes::default()
        .with_genre("scifi")
        .with_book(previous.clone());
    let mut widget = widget(executor, attributes);

    widget.select_genre("fiction").await;

    assert!(!widget.is_loading());
    assert_eq!(widget.attributes().selected_book, Some(previous));
    assert!(matches!(widget.phase(), WidgetPhase::LoadError(_)));

    let html = render_edit(&widget, &RenderOptions::default());
    assert!(html.contains("bestseller-error"));
    assert!(html.contains("<h3 class=\"book-title\">Previous</h3>"));
}

#[tokio::test]
async fn test_loading_flag_cleared_after_success_and_failure() {
    let executor = Arc::new(
        CatalogExecutor::default()
            .with_works("fiction", CatalogExecutor::ok(FICTION_TOP))
            .with_works("broken", CatalogExecutor::ok("{\"data\":{}}")),
    );
    let mut widget = widget(executor, BlockAttributes::default().with_genre("fiction"));

    for genre in ["fiction", "broken", "unknown", "fiction"] {
        let pending = widget.begin_bestseller(genre);
        assert!(widget.is_loading());

        let completed = widget.fetch_pending(pending).await;
        assert!(widget.complete_bestseller(completed));
        assert!(!widget.is_loading(), "loading flag stuck after {}", genre);
    }

    assert_eq!(widget.phase(), WidgetPhase::Loaded);
}

#[tokio::test]
async fn test_genre_failure_yields_empty_list() {
    let executor = Arc::new(CatalogExecutor::default());
    let mut widget = widget(executor, BlockAttributes::default());

    assert!(widget.load_genres("").await.is_empty());
    assert!(widget.genre_error().is_some());

    let html = render_edit(&widget, &RenderOptions::default());
    assert!(html.contains("Could not load genres"));
    assert!(html.contains("Choose a genre..."));
}

// Api resolving bestseller requests in an order chosen by the test
struct ScriptedApi {
    books: Mutex<HashMap<String, BookSummary>>,
}

impl ScriptedApi {
    fn new(books: &[(&str, &str)]) -> Self {
        Self {
            books: Mutex::new(
                books
                    .iter()
                    .map(|(genre, title)| (genre.to_string(), BookSummary::new("1", *title)))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl BestsellerApi for ScriptedApi {
    async fn genres(&self) -> bestseller_block::Result<CategoryList> {
        Err(BlockError::Fetch {
            what: "genres",
            message: "not scripted".to_string(),
        })
    }

    async fn bestseller(&self, genre_id: &str) -> bestseller_block::Result<WorkList> {
        let book = self.books.lock().unwrap().get(genre_id).cloned();
        Ok(Envelope::new(Works {
            works: book.into_iter().collect(),
        }))
    }
}

#[tokio::test]
async fn test_superseded_fetch_is_discarded() {
    let mut widget = BestsellerWidget::new(
        ScriptedApi::new(&[("fiction", "Old pick"), ("crime", "New pick")]),
        BlockAttributes::default(),
    );

    let first = widget.choose_genre("fiction");
    let second = widget.choose_genre("crime");

    let (first, second) = tokio::join!(widget.fetch_pending(first), widget.fetch_pending(second));

    // The newer request resolves first, the older one last
    assert!(widget.complete_bestseller(second));
    assert!(!widget.is_loading());
    assert!(!widget.complete_bestseller(first));

    assert_eq!(widget.attributes().selected_genre.as_deref(), Some("crime"));
    assert_eq!(
        widget.attributes().selected_book.as_ref().unwrap().title,
        "New pick"
    );
    assert!(!widget.is_loading());
}

#[tokio::test]
async fn test_stale_completion_does_not_clear_newer_loading() {
    let mut widget = BestsellerWidget::new(
        ScriptedApi::new(&[("fiction", "Old pick"), ("crime", "New pick")]),
        BlockAttributes::default(),
    );

    let first = widget.choose_genre("fiction");
    let first = widget.fetch_pending(first).await;
    let _second = widget.choose_genre("crime");

    assert!(!widget.complete_bestseller(first));
    assert!(widget.is_loading());
    assert!(widget.attributes().selected_book.is_none());
}

#[tokio::test]
async fn test_empty_ranking_clears_book() {
    let mut widget = BestsellerWidget::new(
        ScriptedApi::new(&[]),
        BlockAttributes::default()
            .with_genre("fiction")
            .with_book(BookSummary::new("1", "Old")),
    );

    widget.load_bestseller("fiction").await;
    assert_eq!(widget.phase(), WidgetPhase::Loaded);
    assert!(widget.attributes().selected_book.is_none());
}

#[tokio::test]
async fn test_loaded_book_always_belongs_to_selected_genre() {
    let api = ScriptedApi::new(&[("crime", "Crime pick")]);
    let mut widget = BestsellerWidget::new(api, BlockAttributes::default());

    widget.load_bestseller("crime").await;
    assert_eq!(widget.attributes().selected_genre.as_deref(), Some("crime"));

    let options = RenderOptions::default();
    let before = render_display(widget.attributes(), &options);
    let reloaded = BlockAttributes::from_value(widget.attributes().to_value()).unwrap();
    assert_eq!(render_display(&reloaded, &options), before);
    assert!(before.contains("Crime pick"));

    let api = ScriptedApi::new(&[("crime", "Crime pick")]);
    let mut widget = BestsellerWidget::new(api, BlockAttributes::default().with_genre("fiction"));

    widget.load_bestseller("crime").await;
    assert_eq!(widget.phase(), WidgetPhase::Loaded);
    assert_eq!(widget.attributes().selected_genre.as_deref(), Some("crime"));
    assert_eq!(
        widget.attributes().selected_book.as_ref().unwrap().title,
        "Crime pick"
    );
}

#[tokio::test]
async fn test_edit_markup_follows_phase() {
    let mut widget = BestsellerWidget::new(
        ScriptedApi::new(&[("fiction", "Pick")]),
        BlockAttributes::default(),
    );
    let options = RenderOptions::default();

    let html = render_edit(&widget, &options);
    assert!(html.contains("genre-selection-initial"));
    assert!(html.contains("Block Settings"));
    assert!(!html.contains("contenteditable"));

    let pending = widget.choose_genre("fiction");
    let html = render_edit(&widget, &options);
    assert!(html.contains("bestseller-loading"));
    assert!(html.contains("contenteditable"));
    assert!(!html.contains("genre-selection-initial"));
    assert!(html.contains("Block Settings"), "settings picker is always available");

    let completed = widget.fetch_pending(pending).await;
    widget.complete_bestseller(completed);
    widget.set_title("This week");

    let html = render_edit(&widget, &options);
    assert!(!html.contains("bestseller-loading"));
    assert!(html.contains(">This week</h2>"));
    assert!(html.contains("<h3 class=\"book-title\">Pick</h3>"));
    assert!(html.contains("<a href=\"#\" class=\"buy-button\""));
}
