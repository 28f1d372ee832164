//! Typed services, one per backend resource.

pub mod articles;
pub mod auth;
pub mod categories;
pub mod storages;
pub mod users;
