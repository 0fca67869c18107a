//! `stockdeck-app` -- application wiring for the stockdeck client.
//!
//! Ties the other crates together: configuration, the route guard
//! runtimes, the login/logout/signup flows, and the mutation
//! orchestration that keeps the activity log, the synchronizers, and
//! the notification hub in step. The `stockdeck` binary lives in
//! `main.rs`.

pub mod auth_flow;
pub mod config;
pub mod guard;
pub mod mutations;

pub use auth_flow::AuthFlow;
pub use config::{AppConfig, ConfigError};
pub use guard::{GuardState, LayoutGuard};
pub use mutations::ResourceMutator;
