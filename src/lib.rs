//! Pulsepoint - Engagement Intelligence Service
//!
//! This crate computes behavioral engagement state for platform users:
//! churn risk scoring, lifecycle classification with audit history, and
//! rule-driven nudge generation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
