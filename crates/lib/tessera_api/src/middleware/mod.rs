//! Request middleware.

pub mod claims;
