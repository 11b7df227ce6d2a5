//! Create-QR and event-type forms: options, defaults and validation.

use std::collections::BTreeMap;

use qrportal_client::{CreateQrCodePayload, EventCategory, EventType, QrCodeInfo};
use serde::Serialize;

use crate::error::ConsoleError;
use crate::request::{CreateEventTypeReq, UpdateEventTypeReq};
use crate::role::Capabilities;
use crate::state::EventTypesSlice;

/// Field name → message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub const MAX_EVENT_TYPE_NAME: usize = 100;
pub const MAX_DESCRIPTION: usize = 500;

/// Collapse field errors into one validation error, in field order.
pub fn into_error(errors: FieldErrors) -> ConsoleError {
    let joined = errors.values().copied().collect::<Vec<_>>().join("; ");
    ConsoleError::Validation(joined)
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Shape check for an `info` built outside the form.
pub fn validate_info(info: &QrCodeInfo) -> Result<(), ConsoleError> {
    let message = match info {
        QrCodeInfo::Session { session_id } if session_id.trim().is_empty() => {
            "Session is required"
        }
        QrCodeInfo::O2bar { email } if email.trim().is_empty() => "Email is required",
        QrCodeInfo::O2bar { email } if !is_valid_email(email.trim()) => "Invalid email",
        QrCodeInfo::General { event_type_name } if event_type_name.trim().is_empty() => {
            "Event type name is required"
        }
        _ => return Ok(()),
    };
    Err(ConsoleError::Validation(message.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub category: EventCategory,
    pub label: &'static str,
}

/// Categories this user may issue, given what the backend has seeded.
pub fn category_options(caps: &Capabilities, event_types: &EventTypesSlice) -> Vec<CategoryOption> {
    let mut options = Vec::new();
    if caps.can_issue(EventCategory::Session) && event_types.first_of(EventCategory::Session).is_some() {
        options.push(CategoryOption {
            category: EventCategory::Session,
            label: "Session",
        });
    }
    if caps.can_issue(EventCategory::O2bar) && event_types.first_of(EventCategory::O2bar).is_some() {
        options.push(CategoryOption {
            category: EventCategory::O2bar,
            label: "O2 Bar",
        });
    }
    if caps.can_issue(EventCategory::General) && event_types.general().next().is_some() {
        options.push(CategoryOption {
            category: EventCategory::General,
            label: "General",
        });
    }
    options
}

/// Coin pre-fill for a category. GENERAL needs the chosen type's name.
pub fn default_coins(
    category: EventCategory,
    event_type_name: Option<&str>,
    event_types: &EventTypesSlice,
) -> u32 {
    let found = match category {
        EventCategory::General => event_type_name.and_then(|name| {
            event_types
                .general()
                .find(|et| et.event_type_name == name)
        }),
        system => event_types.first_of(system),
    };
    found.map(|et| et.default_coins).unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrForm {
    pub category: Option<EventCategory>,
    pub email: String,
    pub session_id: String,
    pub event_type_name: String,
    /// Signed so a negative entry can be reported rather than wrapped.
    pub coins: i64,
    pub description: String,
}

impl CreateQrForm {
    /// Defaults: first permitted category, signed-in email, first GENERAL
    /// type, and the matching default coins.
    pub fn initial(caps: &Capabilities, event_types: &EventTypesSlice, email: &str) -> Self {
        let category = category_options(caps, event_types)
            .first()
            .map(|o| o.category);
        let event_type_name = if caps.can_issue(EventCategory::General) {
            event_types
                .general()
                .next()
                .map(|et| et.event_type_name.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };
        let coins = category
            .map(|c| default_coins(c, Some(&event_type_name), event_types))
            .unwrap_or(0);
        Self {
            category,
            email: email.to_string(),
            session_id: String::new(),
            event_type_name,
            coins: i64::from(coins),
            description: String::new(),
        }
    }

    pub fn select_category(&mut self, category: EventCategory, event_types: &EventTypesSlice) {
        self.category = Some(category);
        self.coins = i64::from(default_coins(
            category,
            Some(&self.event_type_name),
            event_types,
        ));
    }

    pub fn select_event_type(&mut self, name: &str, event_types: &EventTypesSlice) {
        self.event_type_name = name.to_string();
        if self.category == Some(EventCategory::General) {
            self.coins = i64::from(default_coins(EventCategory::General, Some(name), event_types));
        }
    }

    pub fn validate(&self) -> Result<CreateQrCodePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let info = match self.category {
            None => {
                errors.insert("eventType", "Event type is required");
                None
            }
            Some(EventCategory::O2bar) => {
                let email = self.email.trim();
                if email.is_empty() {
                    errors.insert("email", "Email is required");
                } else if !is_valid_email(email) {
                    errors.insert("email", "Invalid email");
                }
                Some(QrCodeInfo::O2bar {
                    email: email.to_string(),
                })
            }
            Some(EventCategory::Session) => {
                if self.session_id.trim().is_empty() {
                    errors.insert("sessionId", "Session is required");
                }
                Some(QrCodeInfo::Session {
                    session_id: self.session_id.trim().to_string(),
                })
            }
            Some(EventCategory::General) => {
                if self.event_type_name.trim().is_empty() {
                    errors.insert("eventTypeName", "Event type name is required");
                }
                Some(QrCodeInfo::General {
                    event_type_name: self.event_type_name.trim().to_string(),
                })
            }
        };

        let coins = match u32::try_from(self.coins) {
            Ok(c) => Some(c),
            Err(_) if self.coins < 0 => {
                errors.insert("coins", "Coins must be a positive number");
                None
            }
            Err(_) => {
                errors.insert("coins", "Coins is too large");
                None
            }
        };

        match (info, coins) {
            (Some(info), Some(coins)) if errors.is_empty() => Ok(CreateQrCodePayload {
                info,
                description: non_empty(&self.description),
                coins,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeForm {
    pub name: String,
    pub description: String,
    pub default_coins: i64,
}

impl EventTypeForm {
    pub fn for_edit(event_type: &EventType) -> Self {
        Self {
            name: event_type.event_type_name.clone(),
            description: event_type.description.clone().unwrap_or_default(),
            default_coins: i64::from(event_type.default_coins),
        }
    }

    fn check(&self) -> (FieldErrors, Option<u32>) {
        let mut errors = check_event_type_fields(&self.name, &self.description);
        let coins = match u32::try_from(self.default_coins) {
            Ok(c) => Some(c),
            Err(_) => {
                errors.insert("defaultCoins", "Default coins must be a positive number");
                None
            }
        };
        (errors, coins)
    }

    pub fn validate_create(&self) -> Result<CreateEventTypeReq, FieldErrors> {
        match self.check() {
            (errors, Some(default_coins)) if errors.is_empty() => Ok(CreateEventTypeReq {
                name: self.name.trim().to_string(),
                description: non_empty(&self.description),
                default_coins,
            }),
            (errors, _) => Err(errors),
        }
    }

    pub fn validate_update(&self) -> Result<UpdateEventTypeReq, FieldErrors> {
        match self.check() {
            (errors, Some(default_coins)) if errors.is_empty() => Ok(UpdateEventTypeReq {
                name: self.name.clone(),
                description: Some(self.description.trim().to_string()),
                default_coins: Some(default_coins),
            }),
            (errors, _) => Err(errors),
        }
    }
}

/// Name and description limits shared by the form and the handlers.
pub fn check_event_type_fields(name: &str, description: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let name = name.trim();
    if name.is_empty() {
        errors.insert("eventTypeName", "Event type name is required");
    } else if name.chars().count() > MAX_EVENT_TYPE_NAME {
        errors.insert(
            "eventTypeName",
            "Event type name must be less than 100 characters",
        );
    }
    if description.chars().count() > MAX_DESCRIPTION {
        errors.insert("description", "Description must be less than 500 characters");
    }
    errors
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
