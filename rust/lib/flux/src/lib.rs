//! Flux: the console's state container.
//!
//! A path-addressed store with pub/sub that the admin console renders from.
//! All state lives in Rust; the UI layer only reads slices and emits requests.
//!
//! # Primitives
//!
//! - `dispatch::<S>(action)`: run a slice reducer atomically and notify
//! - `emit(path, payload)`: send a request to the handler(s) registered for it
//! - `subscribe(pattern)`: observe state changes by path pattern
//!
//! # Path Addressing
//!
//! Each slice lives at a fixed path: `auth/state`, `qr/state`,
//! `eventTypes/state`, `app/menu`, `notify/queue`. Requests use the same
//! namespace: `qr/list`, `qr/create`, `eventTypes/update`.
//!
//! # Patterns
//!
//! Subscriptions and request handlers accept MQTT-style wildcards:
//! - Exact: `qr/state`
//! - Single-level: `qr/+` matches `qr/state`, `qr/list`
//! - Multi-level: `qr/#` matches `qr` and everything under it
//!
//! # Example
//!
//! ```ignore
//! use qrportal_flux::Flux;
//!
//! let flux = Flux::new();
//! flux.on("qr/list", |_, payload, store| async move {
//!     // fetch, then store.dispatch::<QrState>(..)
//! });
//! flux.subscribe("qr/#", |path, _| println!("{path} changed"));
//! flux.emit("qr/list", ListQrCodesReq { limit: 10, offset: 0 }).await;
//! ```

pub mod app;
pub mod router;
pub mod seq;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Router};
pub use seq::RequestSeq;
pub use store::{ChangeHandler, Outcome, Slice, StateStore};
pub use topic::{Pattern, Subscriptions};
pub use value::{StateValue, SubscriptionId};
