mod cli;
mod commands;

use bestseller_api::{Settings, telemetry};
use clap::Parser;

use crate::cli::Commands;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = cli::Cli::parse();

    telemetry::init();

    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { addr } => {
            if let Some(addr) = addr {
                settings.server.addr = addr;
            }
            commands::serve::handle_serve_command(settings).await?;
        }
        Commands::Genres { query, source } => {
            commands::genres::handle_genres_command(&settings, source, &query).await?;
        }
        Commands::Bestseller {
            genre_id,
            html,
            title,
            source,
        } => {
            commands::bestseller::handle_bestseller_command(
                &settings, source, &genre_id, html, title,
            )
            .await?;
        }
        Commands::Render { path } => {
            commands::render::handle_render_command(&settings, &path).await?;
        }
    }

    Ok(())
}
