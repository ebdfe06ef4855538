//! DTO modules that bridge services with templates.

pub mod profile;
pub mod registration;
