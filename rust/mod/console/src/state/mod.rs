//! Console state slices.
//!
//! Each slice lives at a fixed path in the store and changes only through
//! its reducer.

pub mod app;
pub mod auth;
pub mod event_types;
pub mod lookups;
pub mod op;
pub mod qr;

pub use app::{MenuAction, MenuSlice, NotificationQueue, NotifyAction};
pub use auth::{AuthAction, AuthPhase, AuthSlice};
pub use event_types::{EventTypesAction, EventTypesSlice};
pub use lookups::{EmployeesAction, EmployeesSlice, SessionsAction, SessionsSlice};
pub use op::{OpStatus, Phase};
pub use qr::{QrAction, QrSlice};
