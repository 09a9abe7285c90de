//! Functional core for the game catalog.
//!
//! Pure domain types, validation and the traits the server implements. Nothing
//! in this crate performs I/O.

pub mod auth;
pub mod cache;
pub mod catalog;
pub mod notify;
pub mod pagination;
pub mod serde;
pub mod storage;
