//! Auth state, stored at `auth/state`.

use qrportal_flux::{Outcome, Slice};
use serde::Serialize;

use crate::identity::{Identity, TokenClaims};
use crate::role::Capabilities;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    #[default]
    Idle,
    Loading,
    Authenticated,
    /// Privileges could not be fetched or resolved to no role.
    Denied,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSlice {
    pub phase: AuthPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    /// Claims held while privileges are being fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_claims: Option<TokenClaims>,
    pub capabilities: Capabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Generation of the newest sign-in, sign-out or denial. A sign-in
    /// result from an older generation is dropped.
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    Started {
        generation: u64,
        claims: TokenClaims,
    },
    /// Accepted only for the sign-in that is still current.
    Authenticated {
        generation: u64,
        identity: Identity,
        capabilities: Capabilities,
    },
    /// Accepted for the current generation or a newer one.
    Denied {
        generation: u64,
        message: String,
    },
    SignedOut {
        generation: u64,
    },
}

impl Slice for AuthSlice {
    const PATH: &'static str = "auth/state";
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) -> Outcome {
        match action {
            AuthAction::Started { generation, claims } => {
                if generation <= self.generation {
                    return Outcome::Ignored;
                }
                *self = AuthSlice {
                    phase: AuthPhase::Loading,
                    pending_claims: Some(claims),
                    generation,
                    ..Default::default()
                };
            }
            AuthAction::Authenticated {
                generation,
                identity,
                capabilities,
            } => {
                if generation != self.generation || self.phase != AuthPhase::Loading {
                    return Outcome::Ignored;
                }
                *self = AuthSlice {
                    phase: AuthPhase::Authenticated,
                    identity: Some(identity),
                    capabilities,
                    generation,
                    ..Default::default()
                };
            }
            AuthAction::Denied {
                generation,
                message,
            } => {
                if generation < self.generation {
                    return Outcome::Ignored;
                }
                *self = AuthSlice {
                    phase: AuthPhase::Denied,
                    message: Some(message),
                    generation,
                    ..Default::default()
                };
            }
            AuthAction::SignedOut { generation } => {
                let generation = generation.max(self.generation);
                if self.phase == AuthPhase::Idle && self.identity.is_none() {
                    self.generation = generation;
                    return Outcome::Ignored;
                }
                *self = AuthSlice {
                    generation,
                    ..Default::default()
                };
            }
        }
        Outcome::Applied
    }
}

impl AuthSlice {
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Signed-in email, or empty.
    pub fn email(&self) -> &str {
        self.identity.as_ref().map(|i| i.email()).unwrap_or_default()
    }
}
