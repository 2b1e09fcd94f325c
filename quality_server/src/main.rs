use quality_server::ServiceConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quality_server=info,quality_forecast=info,tower_http=info".into()),
        )
        .init();

    // Reads .env first; a missing file is fine
    let config = ServiceConfig::load_with_dotenv()?;
    config.validate()?;

    quality_server::serve(config).await?;
    Ok(())
}
