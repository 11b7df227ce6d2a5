//! Privilege codes → roles → capabilities.

use std::collections::BTreeSet;
use std::fmt;

use qrportal_client::EventCategory;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::notify::msg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    GeneralAdmin,
    SessionAdmin,
    Employee,
}

/// Fixed privilege code table, in resolution order.
pub const PRIVILEGES: [(u32, Role); 3] = [
    (191, Role::GeneralAdmin),
    (181, Role::SessionAdmin),
    (171, Role::Employee),
];

impl Role {
    pub const ALL: [Role; 3] = [Role::GeneralAdmin, Role::SessionAdmin, Role::Employee];

    pub fn privilege(self) -> u32 {
        match self {
            Role::GeneralAdmin => 191,
            Role::SessionAdmin => 181,
            Role::Employee => 171,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::GeneralAdmin => "GENERAL_ADMIN",
            Role::SessionAdmin => "SESSION_ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer privilege codes issued by the privilege service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeSet(BTreeSet<u32>);

impl PrivilegeSet {
    pub fn contains(&self, code: u32) -> bool {
        self.0.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for PrivilegeSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[u32]> for PrivilegeSet {
    fn from(codes: &[u32]) -> Self {
        codes.iter().copied().collect()
    }
}

/// Roles held by the signed-in user, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    roles: Vec<Role>,
}

impl Capabilities {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let held: BTreeSet<Role> = roles.into_iter().collect();
        Self {
            roles: Role::ALL.into_iter().filter(|r| held.contains(r)).collect(),
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// At least one of `required` is held. Empty `required` is never satisfied;
    /// use [`permits`](Self::permits) for public-by-default checks.
    pub fn has_any(&self, required: &[Role]) -> bool {
        required.iter().any(|r| self.has(*r))
    }

    /// `required` is empty (public) or intersects the held roles.
    pub fn permits(&self, required: &[Role]) -> bool {
        required.is_empty() || self.has_any(required)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether QR codes of `category` may be issued.
    pub fn can_issue(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Session => self.has(Role::SessionAdmin),
            EventCategory::O2bar => !self.is_empty(),
            EventCategory::General => self.has(Role::GeneralAdmin),
        }
    }

    pub fn can_manage_event_types(&self) -> bool {
        self.has(Role::GeneralAdmin)
    }
}

/// Map privilege codes to roles. No mapped role is an authorization failure.
pub fn resolve_roles(privileges: &PrivilegeSet) -> Result<Capabilities, ConsoleError> {
    let roles: Vec<Role> = PRIVILEGES
        .iter()
        .filter(|(code, _)| privileges.contains(*code))
        .map(|(_, role)| *role)
        .collect();
    if roles.is_empty() {
        return Err(ConsoleError::Authorization(
            msg::INSUFFICIENT_PRIVILEGES.to_string(),
        ));
    }
    Ok(Capabilities { roles })
}
