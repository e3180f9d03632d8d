use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::genai::{annotate, intent};
use crate::models::{Passage, SearchIntent, SearchParams, SearchResponse, VerseReference};
use crate::search::{context, merge, retrieve};
use crate::state::AppState;

/// Context window either side of a directly cited verse.
const DIRECT_CONTEXT_WINDOW: u32 = 1;

/// GET /search - Full query pipeline:
///   1. Intent classification (LLM, falls back to keyword search)
///   2. Direct citation → context window, else recommended + corpus fan-out
///   3. Merge with recommended-first deduplication
///   4. Commentary generation for the leading results
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = params.q.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query is required".to_string()));
    }

    match run_search(&state, &query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Search pipeline failed for {query:?}: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ))
        }
    }
}

/// The orchestration sequence, separated from HTTP extraction so the whole
/// pipeline runs against substitute providers.
///
/// Every sub-stage degrades locally (classification falls back, unresolvable
/// citations vanish, failed commentary is omitted); an error here means
/// something genuinely unexpected, reported to the caller as a generic
/// internal failure.
pub async fn run_search(state: &AppState, query: &str) -> anyhow::Result<SearchResponse> {
    let intent = intent::resolve_intent(state.llm.as_ref(), query).await;
    tracing::info!("Search intent for {query:?}: {intent:?}");

    let results = match &intent {
        // A direct citation is answered by its context window alone; no
        // corpus or commentary fan-out.
        SearchIntent::VerseKey { reference } => {
            context::expand(state.corpus.as_ref(), *reference, DIRECT_CONTEXT_WINDOW).await
        }
        SearchIntent::Topic { query, recommended } => run_hybrid(state, query, recommended).await?,
        SearchIntent::Keyword { query } => run_hybrid(state, query, &[]).await?,
    };

    Ok(SearchResponse { intent, results })
}

/// Recommended + corpus retrieval, merge, then bounded commentary.
async fn run_hybrid(
    state: &AppState,
    query: &str,
    recommended: &[VerseReference],
) -> anyhow::Result<Vec<Passage>> {
    let groups = retrieve::retrieve(
        state.corpus.as_ref(),
        query,
        recommended,
        state.config.search.max_corpus_hits,
    )
    .await?;

    let merged = merge::merge(groups.recommended, groups.corpus);

    Ok(annotate::annotate(
        state.llm.as_ref(),
        merged,
        state.config.search.max_annotations,
    )
    .await)
}
