//! Requests the UI emits. Each carries the path its handler is registered at.

use qrportal_client::CreateQrCodePayload;

use crate::identity::TokenClaims;

/// Resolve privileges for a freshly signed-in user.
#[derive(Debug, Clone)]
pub struct SignInReq {
    pub claims: TokenClaims,
}

impl SignInReq {
    pub const PATH: &'static str = "auth/signIn";
}

#[derive(Debug, Clone, Copy)]
pub struct SignOutReq;

impl SignOutReq {
    pub const PATH: &'static str = "auth/signOut";
}

/// Load one page of QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQrReq {
    pub limit: usize,
    pub offset: usize,
}

impl ListQrReq {
    pub const PATH: &'static str = "qr/list";
}

#[derive(Debug, Clone)]
pub struct CreateQrReq {
    pub payload: CreateQrCodePayload,
}

impl CreateQrReq {
    pub const PATH: &'static str = "qr/create";
}

#[derive(Debug, Clone)]
pub struct DeleteQrReq {
    pub qr_id: String,
}

impl DeleteQrReq {
    pub const PATH: &'static str = "qr/delete";
}

#[derive(Debug, Clone, Copy)]
pub struct ListEventTypesReq;

impl ListEventTypesReq {
    pub const PATH: &'static str = "eventTypes/list";
}

/// Create a GENERAL event type.
#[derive(Debug, Clone)]
pub struct CreateEventTypeReq {
    pub name: String,
    pub description: Option<String>,
    pub default_coins: u32,
}

impl CreateEventTypeReq {
    pub const PATH: &'static str = "eventTypes/create";
}

/// Change the editable fields of an event type. `None` keeps the current value.
/// There is no category field: category is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventTypeReq {
    pub name: String,
    pub description: Option<String>,
    pub default_coins: Option<u32>,
}

impl UpdateEventTypeReq {
    pub const PATH: &'static str = "eventTypes/update";
}

#[derive(Debug, Clone)]
pub struct DeleteEventTypeReq {
    pub name: String,
}

impl DeleteEventTypeReq {
    pub const PATH: &'static str = "eventTypes/delete";
}

#[derive(Debug, Clone, Copy)]
pub struct LoadSessionsReq;

impl LoadSessionsReq {
    pub const PATH: &'static str = "sessions/load";
}

#[derive(Debug, Clone, Copy)]
pub struct LoadEmployeesReq;

impl LoadEmployeesReq {
    pub const PATH: &'static str = "employees/load";
}
