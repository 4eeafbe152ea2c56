//! Adapters - concrete implementations of the ports plus the HTTP surface.

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
