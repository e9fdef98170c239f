use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/userinfo — contact details for the authenticated user, or an
/// empty object when their contact row is not app-enabled.
pub async fn userinfo(
    State(app): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let info = tokio::task::spawn_blocking(move || {
        podtrack_core::service::user_info(app.store.as_ref(), &user.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match info {
        Some(info) => Ok(Json(serde_json::to_value(info)?)),
        None => Ok(Json(serde_json::json!({}))),
    }
}

fn invalid_secret() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "code": "invalid_secret",
            "description": "Access denied."
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct VerifyParams {
    pub secret: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

/// GET /api/signup/verify — pre-registration check, gated by the shared
/// signup secret rather than a session token.
pub async fn verify_signup(
    State(app): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<Response, AppError> {
    if params.secret != app.signup_secret {
        return Ok(invalid_secret());
    }

    let full_name = format!("{} {}", params.firstname, params.lastname);
    let verified = tokio::task::spawn_blocking(move || {
        podtrack_core::service::verify_signup(app.store.as_ref(), &params.email, &full_name)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "verified": verified })).into_response())
}

#[derive(Deserialize)]
pub struct FinishBody {
    pub email: String,
    /// Identity provider's user id.
    pub id: String,
}

/// POST /api/signup/finish — called by the identity provider after
/// registration to mark the contact as app-enabled.
pub async fn finish_signup(
    State(app): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<FinishBody>,
) -> Result<Response, AppError> {
    let authorized = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == format!("Secret {}", app.signup_secret));
    if !authorized {
        return Ok(invalid_secret());
    }

    let found = tokio::task::spawn_blocking(move || {
        podtrack_core::service::finish_signup(app.store.as_ref(), &body.email, &body.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if !found {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "user_not_found",
                "description": "The user is not found in the database."
            })),
        )
            .into_response());
    }
    Ok(Json(serde_json::json!({ "result": "success" })).into_response())
}
