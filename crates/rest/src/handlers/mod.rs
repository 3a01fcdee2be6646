//! Request handlers for the Akademi REST API.

pub mod context;
pub mod health;
pub mod hq;
