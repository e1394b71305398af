use crate::documents::DocumentStore;
use crate::error::ServerError;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use review_core::model::Project;
use review_core::render::DOCX_CONTENT_TYPE;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentStore,
    pub projects: Arc<Vec<Project>>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/projects", get(list_projects))
        .route("/documents/:name", get(get_document))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.projects.as_ref().clone())
}

async fn get_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let bytes = state.documents.read(&name).await?;
    tracing::debug!(%name, size = bytes.len(), "serving document");
    Ok(([(header::CONTENT_TYPE, DOCX_CONTENT_TYPE)], bytes))
}
