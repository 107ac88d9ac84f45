pub mod applications;
pub mod health;
pub mod session;
pub mod submission;
