use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodtrackError {
    /// A field name that does not carry enough underscore-delimited tokens
    /// to extract an outcome id. Callers drop the field and continue.
    #[error("malformed field name: {0}")]
    MalformedFieldName(String),

    #[error("pod not found in roster: {0}")]
    PodNotFound(String),

    #[error("no record for user in {record_type}")]
    NoRecord { record_type: String },

    #[error("schema unavailable for {record_type}: {reason}")]
    SchemaUnavailable { record_type: String, reason: String },

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("update rejected for {record_type}/{record_id}: {reason}")]
    UpdateRejected {
        record_type: String,
        record_id: String,
        reason: String,
    },

    #[error("record has no id attribute")]
    MissingRecordId,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PodtrackError>;
