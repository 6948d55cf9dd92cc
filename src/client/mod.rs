//! Clients for external services

pub mod http;
pub mod payture;
