use qrportal_client::ApiError;

/// Console operation failure.
///
/// `Display` is the message shown to the user. `Cancelled` is never shown:
/// it only tells the caller its result was superseded by a newer request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// No usable role, or the backend refused the credentials.
    #[error("{0}")]
    Authorization(String),

    /// Transport failure or 5xx.
    #[error("{0}")]
    Network(String),

    /// Duplicate record (400/409 on create).
    #[error("{0}")]
    Conflict(String),

    /// Any other rejection by the backend.
    #[error("{0}")]
    Rejected(String),

    #[error("request superseded by a newer one")]
    Cancelled,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Attempt to modify a system-seeded record.
    #[error("{0}")]
    ReadOnly(String),
}

impl ConsoleError {
    /// Classify a backend failure, using `message` as the user-facing text.
    pub fn from_api(err: &ApiError, message: &str) -> Self {
        match err {
            ApiError::Auth(_) => ConsoleError::Authorization(message.to_string()),
            e if e.status() == Some(401) => ConsoleError::Authorization(message.to_string()),
            e if e.is_transport() => ConsoleError::Network(message.to_string()),
            _ => ConsoleError::Rejected(message.to_string()),
        }
    }

    /// Like [`from_api`](Self::from_api) but a 400 or 409 means the record
    /// already exists.
    pub fn from_create(err: &ApiError, duplicate: &str, generic: &str) -> Self {
        match err.status() {
            Some(400) | Some(409) => ConsoleError::Conflict(duplicate.to_string()),
            _ => Self::from_api(err, generic),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConsoleError::Cancelled)
    }
}
