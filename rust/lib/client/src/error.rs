/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("url: {0}")]
    Url(String),
}

impl ApiError {
    /// HTTP status of a server-side rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The backend answered with a 5xx or never answered at all.
    pub fn is_transport(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_of_server_error() {
        let err = ApiError::Server {
            status: 409,
            message: "exists".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "HTTP 409: exists");
    }

    #[test]
    fn five_hundreds_are_transport_failures() {
        let err = ApiError::Server {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_transport());
    }

    #[test]
    fn local_errors_have_no_status() {
        assert_eq!(ApiError::Auth("expired".into()).status(), None);
        assert_eq!(ApiError::Decode("eof".into()).status(), None);
        assert!(!ApiError::Url("bad".into()).is_transport());
    }
}
