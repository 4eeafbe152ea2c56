//! HTTP surface built on axum.

pub mod engagement;
pub mod middleware;
