//! Wire models. Field names follow the backend's camelCase JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of an event type, and the tag of a QR code's `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventCategory {
    Session,
    O2bar,
    General,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [
        EventCategory::Session,
        EventCategory::O2bar,
        EventCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Session => "SESSION",
            EventCategory::O2bar => "O2BAR",
            EventCategory::General => "GENERAL",
        }
    }

    /// SESSION and O2BAR types are seeded by the backend.
    pub fn is_system(self) -> bool {
        !matches!(self, EventCategory::General)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SESSION" => Ok(EventCategory::Session),
            "O2BAR" => Ok(EventCategory::O2bar),
            "GENERAL" => Ok(EventCategory::General),
            other => Err(format!("unknown event category: {other}")),
        }
    }
}

/// What a QR code is for. Encoded with an `eventType` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum QrCodeInfo {
    #[serde(rename = "SESSION", rename_all = "camelCase")]
    Session { session_id: String },
    #[serde(rename = "O2BAR")]
    O2bar { email: String },
    #[serde(rename = "GENERAL", rename_all = "camelCase")]
    General { event_type_name: String },
}

impl QrCodeInfo {
    pub fn category(&self) -> EventCategory {
        match self {
            QrCodeInfo::Session { .. } => EventCategory::Session,
            QrCodeInfo::O2bar { .. } => EventCategory::O2bar,
            QrCodeInfo::General { .. } => EventCategory::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub qr_id: String,
    pub info: QrCodeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub coins: u32,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrCodePayload {
    pub info: QrCodeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub coins: u32,
}

/// One page of `GET /qrCodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodePage {
    pub total_count: usize,
    #[serde(default)]
    pub qrs: Vec<QrCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQr {
    pub qr_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub event_type_name: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub default_coins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub presenters: Vec<String>,
}

/// Lightweight employee record used by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub work_email: String,
}

/// Signed-in user as reported by the privilege service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub employee_id: String,
    pub work_email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_thumbnail: Option<String>,
    #[serde(default)]
    pub privileges: Vec<u32>,
}
