//! Common utilities and types shared across the video session demo components.

#![warn(clippy::pedantic)]

/// Module for common error types
pub mod error;

/// Module for common data types
pub mod types;

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for access token claims and inspection
pub mod jwt;
