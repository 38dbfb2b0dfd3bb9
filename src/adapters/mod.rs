//! Infrastructure adapters. Implement ports, expose the HTTP API.
//!
//! Storage, clock, HTTP. Map errors to DomainError.

pub mod clock;
pub mod http;
pub mod persistence;
