//! Request extractors for the Akademi REST API.

pub mod identity;

pub use identity::IdentityExtractor;
