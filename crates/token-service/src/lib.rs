//! Access token issuer for the video session demo.
//!
//! Serves `GET /token`, which signs a short-lived access token granting one
//! identity permission to join a real-time video session in a configured
//! environment. Also serves the demo's static assets.
//!
//! # Modules
//!
//! - `config` - Service configuration and credential sets
//! - `crypto` - Access token signing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Token request parsing
//! - `observability` - Metrics and log correlation
//! - `routes` - Router and application state
//! - `services` - Token issuance

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
