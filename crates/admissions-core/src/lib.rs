//! Admissions Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! shared by the Application Store Service and the Submission Gateway.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod token;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, GatewayConfig, LogFormat, StoreServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use token::{is_token_expired, is_token_expired_at};
