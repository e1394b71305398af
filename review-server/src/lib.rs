pub mod config;
pub mod documents;
pub mod error;
pub mod routes;

use config::ServerConfig;
use documents::DocumentStore;
use error::ServerError;
use review_core::model::Project;
use review_core::source::ProjectSource;
use routes::AppState;
use std::sync::Arc;

/// Loads projects and seeds the documents directory when it has no `.docx`
/// files. The filesystem work runs on tokio's blocking pool.
pub async fn build_state(config: &ServerConfig, source: &dyn ProjectSource) -> Result<AppState, ServerError> {
    let projects = Arc::new(source.projects()?);
    let documents = DocumentStore::new(&config.documents_dir);

    if config.seed_documents {
        let store = documents.clone();
        let seed_from = Arc::clone(&projects);
        tokio::task::spawn_blocking(move || seed_if_empty(&store, &seed_from))
            .await
            .map_err(|e| ServerError::Task(e.to_string()))??;
    }

    Ok(AppState { documents, projects })
}

fn seed_if_empty(documents: &DocumentStore, projects: &[Project]) -> Result<(), ServerError> {
    if documents.has_documents()? {
        return Ok(());
    }
    let written = documents.seed(projects)?;
    tracing::info!(written, dir = %documents.root().display(), "seeded sample documents");
    Ok(())
}

pub async fn serve(config: ServerConfig, source: &dyn ProjectSource) -> Result<(), ServerError> {
    let state = build_state(&config, source).await?;
    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!(addr = %config.bind_addr, "review-server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
