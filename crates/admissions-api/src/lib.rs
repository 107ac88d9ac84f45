//! Admissions API Library
//!
//! HTTP handlers and application setup for the two services: the Application Store
//! Service (`admissions-store`) and the Submission Gateway (`admissions-gateway`).

pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::submission::SubmissionService;
pub use state::{GatewayState, StoreState};
