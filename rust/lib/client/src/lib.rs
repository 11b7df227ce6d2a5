//! HTTP client for the conference QR backend.
//!
//! [`ConsoleApi`] is the seam the console talks through; [`HttpConsoleApi`]
//! is its reqwest implementation. Authentication is supplied by a
//! [`TokenSource`]; tokens come from the identity provider, which this
//! crate does not talk to.
//!
//! ```ignore
//! use qrportal_client::{HttpConsoleApi, StaticToken};
//!
//! let api = HttpConsoleApi::new("https://qr.example.com/api", Arc::new(StaticToken::new(jwt)))?;
//! let page = api.list_qr_codes(10, 0).await?;
//! ```

mod api;
mod error;
mod http;
mod model;
mod token;

pub use api::ConsoleApi;
pub use error::ApiError;
pub use http::HttpConsoleApi;
pub use model::{
    CreateQrCodePayload, CreatedQr, Employee, EventCategory, EventType, QrCode, QrCodeInfo,
    QrCodePage, Session, UserInfo,
};
pub use token::{NoAuth, StaticToken, TokenSource};
