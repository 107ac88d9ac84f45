//! Data models for the application
//!
//! The admissions domain has a single entity, the application, in three shapes: the
//! wire submission (`NewApplication`), the validated insert (`ApplicationRecord`) and the
//! stored row (`Application`).

mod application;

pub use application::*;
