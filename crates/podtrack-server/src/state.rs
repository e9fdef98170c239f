use podtrack_core::roster::Roster;
use podtrack_core::store::RecordStore;
use std::sync::Arc;

/// Shared application state passed to all route handlers. The record
/// store is behind a trait object so tests can inject an in-memory
/// double.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore + Send + Sync>,
    pub roster: Arc<Roster>,
    /// HMAC key for session bearer tokens.
    pub session_secret: String,
    /// Shared secret gating the signup endpoints.
    pub signup_secret: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore + Send + Sync>,
        roster: Roster,
        session_secret: impl Into<String>,
        signup_secret: impl Into<String>,
    ) -> Self {
        Self {
            store,
            roster: Arc::new(roster),
            session_secret: session_secret.into(),
            signup_secret: signup_secret.into(),
        }
    }
}
