use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("not initialized: run 'ssdi init'")]
    NotInitialized,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Deliberately does not say whether the entry exists or belongs to
    /// someone else.
    #[error("tracking entry {0} not found or not owned by caller")]
    NotFoundOrForbidden(i64),

    #[error("user not found: {0}")]
    UserNotFound(i64),

    #[error("section not found: {0}")]
    SectionNotFound(i64),

    #[error("document not found: {0}")]
    DocumentNotFound(i64),

    #[error("tracking entry not found: {0}")]
    TrackingNotFound(i64),

    #[error("contact not found: {0}")]
    ContactNotFound(i64),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid document status: {0}")]
    InvalidDocumentStatus(String),

    #[error("invalid document category: {0}")]
    InvalidDocumentCategory(String),

    #[error("invalid section status: {0}")]
    InvalidSectionStatus(String),

    #[error("invalid communication type: {0}")]
    InvalidCommunicationType(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Constraint violations are caused by the data written, not by the store,
/// so they surface as validation failures.
impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => Self::Validation(err.to_string()),
            _ => Self::StoreUnavailable(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
