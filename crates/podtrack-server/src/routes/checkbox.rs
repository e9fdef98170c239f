use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TreeParams {
    pub pod: String,
    pub focus_area: String,
}

/// GET /api/checkbox?pod=&focus_area= — the outcome/task checkbox tree
/// for one pod and focus area.
pub async fn get_tree(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TreeParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tree = tokio::task::spawn_blocking(move || {
        podtrack_core::service::checkbox_tree(
            app.store.as_ref(),
            &app.roster,
            &params.pod,
            &params.focus_area,
            &user.id,
        )
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "response": tree })))
}

#[derive(Deserialize)]
pub struct UpdateBody {
    pub pod: String,
    /// API name of the checkbox field being written.
    pub task_title: String,
    pub new_value: serde_json::Value,
}

/// POST /api/checkbox — write one checkbox value on the caller's pod
/// record.
pub async fn update(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    tokio::task::spawn_blocking(move || {
        podtrack_core::service::update_checkbox(
            app.store.as_ref(),
            &app.roster,
            &body.pod,
            &user.id,
            &body.task_title,
            body.new_value,
        )
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({})))
}
