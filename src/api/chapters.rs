use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::models::{ChapterSummary, Passage};
use crate::state::AppState;

/// GET /chapters - Chapter metadata for browse views.
pub async fn list_chapters(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChapterSummary>>, (StatusCode, String)> {
    match state.corpus.chapters().await {
        Ok(chapters) => Ok(Json(chapters)),
        Err(e) => {
            tracing::error!("Chapter list fetch failed: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ))
        }
    }
}

/// GET /chapters/{id}/verses - Every passage of one chapter, in order.
pub async fn chapter_verses(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Passage>>, (StatusCode, String)> {
    if id == 0 {
        return Err((StatusCode::BAD_REQUEST, "Invalid chapter id".to_string()));
    }

    match state.corpus.chapter_verses(id).await {
        Ok(verses) => Ok(Json(verses)),
        Err(e) => {
            tracing::error!("Chapter {id} fetch failed: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ))
        }
    }
}
