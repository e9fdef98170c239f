use axum::extract::State;
use axum::{Extension, Json};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/tasks/starred — starred, not-yet-approved tasks across all
/// pods, for the favorites tab.
pub async fn list_starred(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tasks = tokio::task::spawn_blocking(move || {
        podtrack_core::service::starred_tasks(app.store.as_ref(), &app.roster, &user.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::to_value(tasks)?))
}
