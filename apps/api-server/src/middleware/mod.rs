//! HTTP middleware and request-level error handling.

pub mod error;
