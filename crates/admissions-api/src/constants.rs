//! Route paths served by the two services.

/// Store Service: insert one application.
pub const APPLICATIONS_PATH: &str = "/applications";

/// Store Service: number of pending applications.
pub const APPLICATIONS_COUNT_PATH: &str = "/applications/count";

/// Gateway: multipart form submission. Bound for every method so non-POST gets a 405 body.
pub const SUBMIT_APPLICATION_PATH: &str = "/api/submit-application";

/// Gateway: bearer-token session check.
pub const SESSION_PATH: &str = "/api/session";

pub const HEALTH_PATH: &str = "/health";
pub const READY_PATH: &str = "/health/ready";
