//! `stockdeck-core` -- domain types and pure logic for the stockdeck
//! inventory dashboard client.
//!
//! Everything in this crate is synchronous and side-effect free: entity
//! types as they appear on the wire, role predicates, route guard
//! decision tables, client-side validation, and list filtering. I/O
//! (storage, HTTP) lives in the sibling crates.

pub mod activity;
pub mod error;
pub mod inventory;
pub mod listing;
pub mod product;
pub mod roles;
pub mod routes;
pub mod transfer;
pub mod types;
pub mod user;
