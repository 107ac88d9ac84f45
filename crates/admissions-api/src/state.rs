//! Application state for the two routers.
//!
//! Each service has its own state; handlers extract it with `State<Arc<...>>`.

use std::sync::Arc;

use admissions_db::ApplicationStore;

use crate::services::submission::SubmissionService;

/// State of the Application Store Service.
#[derive(Clone)]
pub struct StoreState {
    pub applications: Arc<dyn ApplicationStore>,
}

impl StoreState {
    pub fn new(applications: Arc<dyn ApplicationStore>) -> Self {
        Self { applications }
    }
}

/// State of the Submission Gateway.
#[derive(Clone)]
pub struct GatewayState {
    pub submission: SubmissionService,
    /// Largest accepted multipart body, in bytes.
    pub max_body_bytes: usize,
}

impl GatewayState {
    pub fn new(submission: SubmissionService, max_body_bytes: usize) -> Self {
        Self {
            submission,
            max_body_bytes,
        }
    }
}
