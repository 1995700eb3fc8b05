use tracing::{info, error, debug};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::thingspeak::ThingSpeakClient;
use config::AppConfig;
use services::widget_service;
use utils::WidgetError;

async fn run(config: &AppConfig) -> Result<(), WidgetError> {
    let client = ThingSpeakClient::with_base_url(config.base_url.clone());

    let widget = widget_service::generate_widget(&client, &config.widget, &config.chart, config.size).await?;

    std::fs::write(&config.output, &widget.png).map_err(|e| {
        WidgetError::Render(format!("Failed to write {}: {}", config.output.display(), e))
    })?;

    info!(
        "✅ Wrote {}x{} widget to {} ({} bytes)",
        widget.width,
        widget.height,
        config.output.display(),
        widget.png.len()
    );
    info!("🔗 Tap target: {}", widget.url);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["thingspeak_widget=debug", "reqwest=warn", "hyper=warn"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting ThingSpeak widget...");

    let config = match AppConfig::from_env(std::env::args().nth(1)) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    debug!(
        "Channel {} field {}, {} widget, output {}",
        config.widget.channel_id,
        config.widget.field_id,
        config.size,
        config.output.display()
    );

    if let Err(e) = run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
