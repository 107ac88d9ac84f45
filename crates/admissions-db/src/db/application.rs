use admissions_core::models::{Application, ApplicationRecord, ApplicationStatus};
use admissions_core::AppError;
use sqlx::{PgPool, Postgres};

/// Persistence operations the Store Service needs.
#[async_trait::async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Insert a validated application and return the stored row, id included.
    async fn create_application(&self, record: &ApplicationRecord)
        -> Result<Application, AppError>;

    /// Number of rows whose status is exactly `status`.
    async fn count_by_status(&self, status: &str) -> Result<i64, AppError>;

    async fn count_pending(&self) -> Result<i64, AppError> {
        self.count_by_status(ApplicationStatus::Pending.as_str())
            .await
    }

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Repository for the `applications` table
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ApplicationStore for ApplicationRepository {
    #[tracing::instrument(
        skip(self, record),
        fields(db.table = "applications", db.operation = "insert", program = %record.program)
    )]
    async fn create_application(
        &self,
        record: &ApplicationRecord,
    ) -> Result<Application, AppError> {
        let application = sqlx::query_as::<Postgres, Application>(
            r#"
            INSERT INTO applications (
                full_name, email, phone, age, grade_level, program,
                birth_certificate, transcript, parent_contact, message,
                status, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.age)
        .bind(&record.grade_level)
        .bind(record.program.as_str())
        .bind(&record.birth_certificate)
        .bind(&record.transcript)
        .bind(&record.parent_contact)
        .bind(&record.message)
        .bind(record.status.as_str())
        .bind(record.submitted_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to insert application");
            AppError::database("saving application", e)
        })?;

        Ok(application)
    }

    #[tracing::instrument(skip(self), fields(db.table = "applications", db.operation = "select"))]
    async fn count_by_status(&self, status: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM applications WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to count applications");
                AppError::database("fetching count", e)
            })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::database("checking database", e))
    }
}
