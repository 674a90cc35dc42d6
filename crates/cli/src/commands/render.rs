use std::path::Path;

use bestseller_api::Settings;
use bestseller_block::{BlockAttributes, render_display};
use eyre::{Result, WrapErr};
use tokio::fs;

pub async fn handle_render_command(settings: &Settings, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let attributes = BlockAttributes::from_json(&content)
        .wrap_err_with(|| format!("Invalid attributes in {}", path.display()))?;

    println!("{}", render_display(&attributes, &settings.render));
    Ok(())
}
