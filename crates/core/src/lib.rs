//! Shared domain vocabulary for the event registration platform.
//!
//! Everything in this crate is free of I/O: identifier and timestamp
//! aliases, the domain error type, role and status enums, notification
//! type tags, and draft validation.

pub mod error;
pub mod notification;
pub mod registration;
pub mod roles;
pub mod types;
pub mod validation;
