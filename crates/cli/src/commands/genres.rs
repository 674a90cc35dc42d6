use bestseller_api::Settings;
use bestseller_block::{BestsellerWidget, BlockAttributes};
use eyre::{Result, eyre};

use super::widget_api;
use crate::cli::SourceArgs;

pub async fn handle_genres_command(
    settings: &Settings,
    source: SourceArgs,
    query: &str,
) -> Result<()> {
    let api = widget_api(settings, source)?;
    let mut widget = BestsellerWidget::new(api, BlockAttributes::default());

    let genres = widget.load_genres(query).await;
    if let Some(error) = widget.genre_error() {
        return Err(eyre!("Could not load genres: {}", error));
    }

    if genres.is_empty() {
        println!("No genres match '{}'", query);
        return Ok(());
    }

    let width = genres.iter().map(|genre| genre.id.len()).max().unwrap_or(0);
    for genre in &genres {
        println!("{:width$}  {}", genre.id, genre.label, width = width);
    }

    println!("\n{} of {} genres", genres.len(), widget.genres().len());
    Ok(())
}
