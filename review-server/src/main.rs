use review_core::source::SampleProjects;
use review_server::config::ServerConfig;
use review_server::error::ServerError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("review_server=info,review_core=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    review_server::serve(config, &SampleProjects).await
}
