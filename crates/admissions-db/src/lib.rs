//! Admissions persistence layer
//!
//! Postgres-backed repositories. Callers depend on the `ApplicationStore` trait so the
//! HTTP layer can be exercised without a database.

pub mod db;

pub use db::{ApplicationRepository, ApplicationStore};
