//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Read-only and maintenance handlers go straight to the stores; the
//! register, unregister and publish handlers go through the coordinators
//! so that notifications follow the write. Errors map via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod event;
pub mod notification;
pub mod registration;
