//! Domain entities exposed by the front-end service layer.

pub mod types;
pub mod user;
