//! Database repositories for data access layer

pub mod application;

pub use application::{ApplicationRepository, ApplicationStore};
