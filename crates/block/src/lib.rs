//! The bestseller block: a genre picker that displays the current top seller
//! of the chosen genre.
//!
//! [`BestsellerWidget`] drives the editor side (genre list, bestseller fetch,
//! loading and error states), [`render`] turns its state or the persisted
//! [`BlockAttributes`] into markup.

pub mod api;
pub mod attributes;
pub mod error;
pub mod metadata;
pub mod render;
pub mod widget;

pub use api::{BestsellerApi, ProxyClient};
pub use attributes::{ATTRIBUTES_VERSION, BlockAttributes, DEFAULT_TITLE};
pub use error::{BlockError, Result};
pub use metadata::{BLOCK_METADATA, BlockMetadata};
pub use render::{RenderMode, RenderOptions, render_display, render_edit};
pub use widget::{BestsellerWidget, CompletedFetch, LoadError, PendingFetch, WidgetPhase};
