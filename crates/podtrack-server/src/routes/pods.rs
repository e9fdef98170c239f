use axum::extract::State;
use axum::{Extension, Json};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/pods — gate status for every pod in roster order.
pub async fn list_gates(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let gates = tokio::task::spawn_blocking(move || {
        podtrack_core::service::pod_gates(app.store.as_ref(), &app.roster, &user.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::to_value(gates)?))
}
