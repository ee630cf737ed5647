//! # HTTP Middleware
//!
//! Custom middleware for request processing.

pub mod cors;
pub mod request_id;
