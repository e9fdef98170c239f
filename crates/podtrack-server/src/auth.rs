//! Session-token middleware. The identity collaborator is external to the
//! core: all the engine needs is an opaque user id, verified here from an
//! HMAC-tagged bearer token and attached to the request as an extension.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// The authenticated caller. The id is opaque; it is used verbatim as the
/// foreign-key filter value against the record store.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

/// `<user_id>.<base64url tag>` where the tag is HMAC-SHA256 over the id.
pub fn mint_token(secret: &str, user_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(user_id.as_bytes());
    let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{user_id}.{tag}")
}

/// Verify a bearer token and return the user id it names.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let (user_id, tag) = token.rsplit_once('.')?;
    if user_id.is_empty() {
        return None;
    }
    let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(user_id.as_bytes());
    mac.verify_slice(&tag).ok()?;
    Some(user_id.to_string())
}

/// Axum middleware gating API routes behind a valid session token.
/// On success the request carries an `AuthUser` extension.
pub async fn require_user(State(app): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token.and_then(|t| verify_token(&app.session_secret, t)) {
        Some(id) => {
            req.extensions_mut().insert(AuthUser { id });
            next.run(req).await
        }
        None => Response::builder()
            .status(401)
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"error":"unauthorized"}"#))
            .expect("infallible: all header values are valid ASCII"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_verify_roundtrip() {
        let token = mint_token("s3cret", "auth0|42");
        assert_eq!(verify_token("s3cret", &token).as_deref(), Some("auth0|42"));
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = mint_token("s3cret", "auth0|42");
        assert!(verify_token("other", &token).is_none());
    }

    #[test]
    fn tampered_user_id_rejected() {
        let token = mint_token("s3cret", "auth0|42");
        let (_, tag) = token.rsplit_once('.').unwrap();
        assert!(verify_token("s3cret", &format!("auth0|99.{tag}")).is_none());
    }

    #[test]
    fn garbage_tokens_rejected() {
        assert!(verify_token("s3cret", "").is_none());
        assert!(verify_token("s3cret", "no-dot").is_none());
        assert!(verify_token("s3cret", ".tag-only").is_none());
        assert!(verify_token("s3cret", "user.!!!not-base64!!!").is_none());
    }

    #[test]
    fn id_with_pipe_survives() {
        // Auth0-style ids carry a pipe; the token format must not mangle it.
        let token = mint_token("s3cret", "auth0|abc123");
        assert_eq!(
            verify_token("s3cret", &token).as_deref(),
            Some("auth0|abc123")
        );
    }
}
