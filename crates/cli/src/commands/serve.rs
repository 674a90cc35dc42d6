use bestseller_api::Settings;
use eyre::Result;

pub async fn handle_serve_command(settings: Settings) -> Result<()> {
    println!("Serving bestseller proxy on http://{}", settings.server.addr);
    bestseller_api::serve(settings).await
}
