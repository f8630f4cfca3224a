use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recommendation_service::{config::Config, server::Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "recommendation_service=debug,tower_http=debug,info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;
    let server = Server::bind(&config).await?;

    tracing::info!(addr = %server.local_addr()?, "Recommendation service listening");

    server.run().await
}
