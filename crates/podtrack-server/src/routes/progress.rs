use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/progress/home — per-pod {progress, checked, total} for the
/// home screen, keyed by pod record type.
pub async fn home(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let summaries = tokio::task::spawn_blocking(move || {
        podtrack_core::service::home_screen_progress(app.store.as_ref(), &app.roster, &user.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let mut out = serde_json::Map::new();
    for (pod, summary) in summaries {
        out.insert(pod.record_type, serde_json::to_value(summary)?);
    }
    Ok(Json(serde_json::Value::Object(out)))
}

#[derive(Deserialize)]
pub struct PodParams {
    pub pod: String,
}

/// GET /api/progress/pod?pod= — per-focus-area counters for one pod.
pub async fn pod(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PodParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let detail = tokio::task::spawn_blocking(move || {
        podtrack_core::service::pod_screen_progress(
            app.store.as_ref(),
            &app.roster,
            &params.pod,
            &user.id,
        )
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::to_value(detail)?))
}
