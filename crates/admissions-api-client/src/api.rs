//! Domain methods for the Application Store Service.

use crate::{ApiClient, ClientError};
use admissions_core::models::{Application, NewApplication, PendingCount};

impl ApiClient {
    /// `POST /applications`. Returns the stored row.
    #[tracing::instrument(skip(self, application), fields(http.path = "/applications"))]
    pub async fn create_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ClientError> {
        self.post_json("/applications", application).await
    }

    /// `GET /applications/count`.
    pub async fn pending_count(&self) -> Result<PendingCount, ClientError> {
        self.get("/applications/count").await
    }
}
