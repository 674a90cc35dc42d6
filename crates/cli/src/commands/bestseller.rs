use bestseller_api::Settings;
use bestseller_block::{BestsellerWidget, BlockAttributes, WidgetPhase, render_display};
use eyre::{Result, eyre};

use super::widget_api;
use crate::cli::SourceArgs;

pub async fn handle_bestseller_command(
    settings: &Settings,
    source: SourceArgs,
    genre_id: &str,
    html: bool,
    title: String,
) -> Result<()> {
    let attributes = BlockAttributes::default().with_title(title);
    let mut widget = BestsellerWidget::new(widget_api(settings, source)?, attributes);

    widget.select_genre(genre_id).await;

    if let WidgetPhase::LoadError(error) = widget.phase() {
        return Err(eyre!("Could not load the bestseller for '{}': {}", genre_id, error));
    }

    let attributes = widget.into_attributes();

    if html {
        println!("{}", render_display(&attributes, &settings.render));
        return Ok(());
    }

    let Some(book) = attributes.selected_book else {
        println!("No bestseller for '{}'", genre_id);
        return Ok(());
    };

    println!("{}", book.title);
    let authors = book.authors_line();
    if !authors.is_empty() {
        println!("  by {}", authors);
    }
    if let Some(series) = &book.series {
        println!("  series: {}", series.series_name);
    }
    println!("  isbn: {}", book.isbn);
    println!("  buy: {}", settings.render.retailer_url(&book));
    if let Some(cover) = book.cover_image_url() {
        println!("  cover: {}", cover);
    }

    Ok(())
}
