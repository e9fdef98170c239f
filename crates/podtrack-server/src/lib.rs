pub mod auth;
pub mod error;
pub mod routes;
pub mod salesforce;
pub mod state;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Session-authenticated API. Handlers read the caller's opaque id
    // from the AuthUser extension the middleware attaches.
    let api = Router::new()
        .route("/api/tasks/starred", get(routes::starred::list_starred))
        .route("/api/checkbox", get(routes::checkbox::get_tree))
        .route("/api/checkbox", post(routes::checkbox::update))
        .route("/api/progress/home", get(routes::progress::home))
        .route("/api/progress/pod", get(routes::progress::pod))
        .route("/api/pods", get(routes::pods::list_gates))
        .route("/api/userinfo", get(routes::users::userinfo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    // Signup endpoints sit outside the session layer; they are gated by
    // the shared signup secret instead.
    Router::new()
        .merge(api)
        .route("/api/signup/verify", get(routes::users::verify_signup))
        .route("/api/signup/finish", post(routes::users::finish_signup))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the podtrack API server.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("podtrack API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
