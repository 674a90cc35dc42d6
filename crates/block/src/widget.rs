//! The genre selector and bestseller display state machine.
//!
//! ```text
//! NoGenreSelected --choose--> Loading --ok--> Loaded
//!                                 \--err--> LoadError
//! ```
//!
//! Choosing another genre from the settings panel restarts the fetch from any
//! phase but `NoGenreSelected` is never re-entered.

use std::fmt;

use bestseller_types::{Genre, WorkList, filter_genres};
use tracing::{debug, error, info};

use crate::api::BestsellerApi;
use crate::attributes::BlockAttributes;
use crate::error::{BlockError, Result};

/// A failed load, kept so it can be shown next to the content it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&BlockError> for LoadError {
    fn from(error: &BlockError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetPhase {
    NoGenreSelected,
    Loading,
    Loaded,
    LoadError(LoadError),
}

/// A bestseller fetch that has been issued but not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    ticket: u64,
    genre_id: String,
}

impl PendingFetch {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn genre_id(&self) -> &str {
        &self.genre_id
    }
}

/// A fetch whose response (or failure) has arrived.
#[derive(Debug)]
pub struct CompletedFetch {
    pending: PendingFetch,
    result: Result<WorkList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FetchState {
    NotStarted,
    Idle,
    Loading { ticket: u64 },
    Failed(LoadError),
}

pub struct BestsellerWidget<A> {
    api: A,
    attributes: BlockAttributes,
    genres: Vec<Genre>,
    genre_error: Option<LoadError>,
    fetch: FetchState,
    last_ticket: u64,
}

impl<A: BestsellerApi> BestsellerWidget<A> {
    pub fn new(api: A, attributes: BlockAttributes) -> Self {
        Self {
            api,
            attributes,
            genres: Vec::new(),
            genre_error: None,
            fetch: FetchState::NotStarted,
            last_ticket: 0,
        }
    }

    /// Loads the genre list and, for a block that already has a genre,
    /// refreshes its bestseller.
    pub async fn mount(&mut self) {
        self.load_genres("").await;

        if let Some(genre_id) = self.attributes.selected_genre.clone() {
            self.load_bestseller(&genre_id).await;
        }
    }

    pub fn attributes(&self) -> &BlockAttributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> BlockAttributes {
        self.attributes
    }

    /// Unfiltered genres from the last successful load.
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn genre_error(&self) -> Option<&LoadError> {
        self.genre_error.as_ref()
    }

    /// The cached genre matching the selected id.
    pub fn selected_genre(&self) -> Option<&Genre> {
        let selected = self.attributes.selected_genre.as_deref()?;
        self.genres.iter().find(|genre| genre.id == selected)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchState::Loading { .. })
    }

    /// A block restored with a genre reports `Loading` until its first fetch
    /// completes, since [`mount`](Self::mount) refreshes the stored book.
    pub fn phase(&self) -> WidgetPhase {
        if self.attributes.selected_genre.is_none() {
            return WidgetPhase::NoGenreSelected;
        }

        match &self.fetch {
            FetchState::NotStarted => WidgetPhase::Loading,
            FetchState::Idle => WidgetPhase::Loaded,
            FetchState::Loading { .. } => WidgetPhase::Loading,
            FetchState::Failed(error) => WidgetPhase::LoadError(error.clone()),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.attributes.title = title.into();
    }

    /// Fetches the genre list and returns the entries whose label contains
    /// `query`, case-insensitively.
    ///
    /// Failures are recorded and yield an empty list.
    pub async fn load_genres(&mut self, query: &str) -> Vec<Genre> {
        match self.api.genres().await {
            Ok(list) => {
                self.genres = Genre::from_categories(&list.data.categories);
                self.genre_error = None;
                debug!(count = self.genres.len(), query, "Loaded genres");
                filter_genres(&self.genres, query)
            }
            Err(e) => {
                error!("Failed to load genres: {}", e);
                self.genre_error = Some(LoadError::from(&e));
                Vec::new()
            }
        }
    }

    /// Selects a genre and fetches its bestseller.
    pub async fn select_genre(&mut self, genre_id: &str) {
        let pending = self.choose_genre(genre_id);
        let completed = self.fetch_pending(pending).await;
        self.complete_bestseller(completed);
    }

    /// Records the selection and issues the bestseller fetch for it.
    pub fn choose_genre(&mut self, genre_id: &str) -> PendingFetch {
        info!(genre = genre_id, "Genre selected");
        self.begin_bestseller(genre_id)
    }

    /// Fetches the bestseller of `genre_id`, which becomes the selected genre.
    pub async fn load_bestseller(&mut self, genre_id: &str) {
        let pending = self.begin_bestseller(genre_id);
        let completed = self.fetch_pending(pending).await;
        self.complete_bestseller(completed);
    }

    /// Issues a fetch that supersedes every earlier one.
    ///
    /// The fetched genre becomes the selected one, so the book applied by the
    /// latest fetch always belongs to `selected_genre`.
    pub fn begin_bestseller(&mut self, genre_id: &str) -> PendingFetch {
        if self.attributes.selected_genre.as_deref() != Some(genre_id) {
            self.attributes.selected_genre = Some(genre_id.to_string());
        }

        self.last_ticket += 1;
        self.fetch = FetchState::Loading {
            ticket: self.last_ticket,
        };

        PendingFetch {
            ticket: self.last_ticket,
            genre_id: genre_id.to_string(),
        }
    }

    pub async fn fetch_pending(&self, pending: PendingFetch) -> CompletedFetch {
        let result = self.api.bestseller(&pending.genre_id).await;
        CompletedFetch { pending, result }
    }

    /// Applies a completed fetch if it is the latest one issued.
    ///
    /// Returns `false` when the fetch was superseded and its result dropped.
    /// The loading flag is cleared by the latest fetch whatever its outcome;
    /// on failure the previous book is kept.
    pub fn complete_bestseller(&mut self, completed: CompletedFetch) -> bool {
        let CompletedFetch { pending, result } = completed;

        if pending.ticket != self.last_ticket {
            debug!(
                ticket = pending.ticket,
                latest = self.last_ticket,
                genre = %pending.genre_id,
                "Discarding superseded bestseller response"
            );
            return false;
        }

        self.fetch = match result {
            Ok(list) => {
                let book = list.data.into_top();
                match &book {
                    Some(book) => {
                        info!(genre = %pending.genre_id, title = %book.title, "Loaded bestseller")
                    }
                    None => info!(genre = %pending.genre_id, "Genre has no bestseller"),
                }
                self.attributes.selected_book = book;
                FetchState::Idle
            }
            Err(e) => {
                error!(genre = %pending.genre_id, "Failed to load bestseller: {}", e);
                FetchState::Failed(LoadError::from(&e))
            }
        };

        true
    }
}
