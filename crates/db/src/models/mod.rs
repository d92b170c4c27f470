//! Row models and input DTOs.

pub mod event;
pub mod registration;
