use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{error_response, AppState};
use crate::errors::ValidationError;
use crate::favorites::{FavoritesStore, StoreError};
use crate::validate;
use crate::wire::{NewFavoriteBody, TopicRequestBody, VerseMetadata, VerseRequestBody, VerseResponse};

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "provider": state.gateway.provider_name() }))
}

/// POST /api/llm
pub(super) async fn handle_verse(
    State(state): State<AppState>,
    body: Result<Json<VerseRequestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "rejected /api/llm body");
            return ValidationError::MalformedBody.into_response();
        }
    };
    let params = match validate::verse_params(&body) {
        Ok(p) => p,
        Err(e) => return e.into_response(),
    };

    info!(vibe = %params.vibe, format = %params.format, length = %params.length, "verse requested");
    match state.gateway.generate_verse(&params).await {
        Ok(verse) => {
            let approved_topic = params.approved_topic.clone().unwrap_or_else(|| params.prompt.clone());
            Json(VerseResponse {
                verse: verse.verse,
                explanation: verse.explanation,
                metadata: VerseMetadata {
                    vibe: params.vibe,
                    format: params.format,
                    length: params.length,
                    approved_topic,
                },
            })
            .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /api/topics. Any body that is not `{seed: string}` means no seed.
pub(super) async fn handle_topic(State(state): State<AppState>, body: Bytes) -> Response {
    let req: TopicRequestBody = serde_json::from_slice(&body).unwrap_or_default();
    let seed = req.seed();
    match state.gateway.suggest_topic(seed.as_deref()).await {
        Ok(s) => Json(s).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Runs a favorites file operation on the blocking pool.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, Response>
where
    F: FnOnce(&FavoritesStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.favorites);
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(res) => res.map_err(IntoResponse::into_response),
        Err(e) => {
            error!(error = %e, "favorites task panicked");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Favorites store unavailable".into(),
                None,
            ))
        }
    }
}

/// GET /api/favorites
pub(super) async fn handle_list_favorites(State(state): State<AppState>) -> Response {
    match with_store(&state, |store| store.list()).await {
        Ok(all) => Json(all).into_response(),
        Err(resp) => resp,
    }
}

/// POST /api/favorites
pub(super) async fn handle_add_favorite(
    State(state): State<AppState>,
    body: Result<Json<NewFavoriteBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return ValidationError::MalformedBody.into_response();
    };
    if body.verse.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Verse is required".into(), None);
    }
    let added = with_store(&state, move |store| {
        store.add(&body.verse, &body.prompt, body.vibe, body.format, body.length)
    })
    .await;
    match added {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(resp) => resp,
    }
}

/// DELETE /api/favorites/{id}. Unknown ids still answer 204.
pub(super) async fn handle_remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match with_store(&state, move |store| store.remove(&id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(resp) => resp,
    }
}
