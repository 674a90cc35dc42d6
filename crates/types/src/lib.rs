//! Shared data model for the bestseller block.
//!
//! The upstream catalog wraps every payload in a `data` envelope. The records
//! here keep the upstream field names so that the proxy can relay them to the
//! block unchanged in layout, and so that attributes saved by older block
//! versions still decode.

mod book;
mod genre;
mod upstream;

pub use book::{Author, BookSummary, Cover, CoverUrls, MAX_DISPLAYED_AUTHORS, Series};
pub use genre::{Genre, filter_genres};
pub use upstream::{Categories, Category, CategoryList, Envelope, WorkList, Works};
