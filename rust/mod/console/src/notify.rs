//! User-facing notifications (toasts).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
}

/// Message catalogue.
pub mod msg {
    pub const QR_CREATED: &str = "QR code created successfully!";
    pub const QR_DELETED: &str = "QR code deleted successfully!";
    pub const EVENT_TYPE_CREATED: &str = "Event type created successfully!";
    pub const EVENT_TYPE_UPDATED: &str = "Event type updated successfully!";
    pub const EVENT_TYPE_DELETED: &str = "Event type deleted successfully!";

    pub const FETCH_PRIVILEGES: &str = "Error while fetching user privileges";
    pub const INSUFFICIENT_PRIVILEGES: &str =
        "You don't have sufficient privileges to access this resource";
    pub const FETCH_QR_CODES: &str = "Failed to fetch QR codes";
    pub const CREATE_QR_CODE: &str = "Failed to create QR code";
    pub const DELETE_QR_CODE: &str = "Failed to delete QR code";
    pub const DUPLICATE_QR_CODE: &str = "QR code already exists";
    pub const FETCH_SESSIONS: &str = "Failed to fetch sessions";
    pub const FETCH_EMPLOYEES: &str = "Failed to fetch employees";
    pub const FETCH_EVENT_TYPES: &str = "Failed to fetch event types";
    pub const CREATE_EVENT_TYPE: &str = "Failed to create event type";
    pub const UPDATE_EVENT_TYPE: &str = "Failed to update event type";
    pub const DELETE_EVENT_TYPE: &str = "Failed to delete event type";
    pub const DUPLICATE_EVENT_TYPE: &str = "Event type already exists";
    pub const EVENT_TYPE_NOT_FOUND: &str = "Event type not found";
    pub const SYSTEM_EVENT_TYPE: &str = "System event types cannot be deleted";

    pub const SESSION_EXPIRING: &str = "Your session is about to expire due to inactivity";
    pub const SESSION_EXPIRED: &str = "You have been signed out due to inactivity";
}
