//! Middleware module
//!
//! HTTP middleware applied to every route.

pub mod logging;

pub use logging::log_requests;
