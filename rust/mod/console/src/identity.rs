//! Signed-in identity: backend user info plus ID token claims.

use jsonwebtoken::{decode, DecodingKey, Validation};
use qrportal_client::UserInfo;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Claims read from the identity provider's ID token.
///
/// The signature is not checked here; the backend verifies the token on
/// every call and the console only uses these for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn decode(token: &str) -> Result<Self, ConsoleError> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| ConsoleError::Authorization(format!("invalid token: {}", e)))
    }

    /// `exp` is in the past. Tokens without `exp` never expire here.
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user: UserInfo,
    pub claims: TokenClaims,
}

impl Identity {
    pub fn new(user: UserInfo, claims: TokenClaims) -> Self {
        Self { user, claims }
    }

    /// Work email from the privilege service, falling back to the token.
    pub fn email(&self) -> &str {
        if !self.user.work_email.is_empty() {
            return &self.user.work_email;
        }
        self.claims.email.as_deref().unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        let full = [self.user.first_name.as_str(), self.user.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.claims
            .name
            .clone()
            .unwrap_or_else(|| self.email().to_string())
    }
}
