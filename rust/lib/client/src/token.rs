use crate::error::ApiError;

/// Pluggable token provider. Called before every API request.
///
/// Returns `Ok(None)` to send the request without an Authorization header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Bearer token issued by the identity provider.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        if self.0.trim().is_empty() {
            return Err(ApiError::Auth("empty token".into()));
        }
        Ok(Some(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_auth_yields_none() {
        assert!(NoAuth.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_token_is_returned_verbatim() {
        let ts = StaticToken::new("abc.def.ghi");
        assert_eq!(ts.token().await.unwrap().as_deref(), Some("abc.def.ghi"));
    }

    #[tokio::test]
    async fn blank_static_token_is_an_auth_error() {
        let err = StaticToken::new("  ").token().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }
}
