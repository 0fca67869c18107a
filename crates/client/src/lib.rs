//! `stockdeck-client` -- REST client for the external inventory backend.
//!
//! [`ApiClient`] wraps a single [`reqwest::Client`] with the base URL
//! and the session store (for the bearer header). Endpoint methods are
//! grouped per resource module; all of them converge on the shared
//! request/response helpers in [`api`].

pub mod api;
pub mod auth;
pub mod error;
pub mod inventories;
pub mod products;
pub mod reports;
pub mod transfers;

pub use api::ApiClient;
pub use error::{ApiError, ApiResult};
