use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Review status of an application.
///
/// Submissions are always created as `Pending`; the other states belong to the
/// review workflow that runs outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Study track offered by the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Science,
    Arts,
    Sports,
    Tech,
    Leadership,
}

impl Program {
    pub const ALL: [Program; 5] = [
        Program::Science,
        Program::Arts,
        Program::Sports,
        Program::Tech,
        Program::Leadership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Science => "science",
            Program::Arts => "arts",
            Program::Sports => "sports",
            Program::Tech => "tech",
            Program::Leadership => "leadership",
        }
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown program '{}'", s))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored application, exactly as returned by `INSERT ... RETURNING *`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Application {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: i32,
    pub grade_level: String,
    pub program: String,
    pub birth_certificate: Option<String>,
    pub transcript: Option<String>,
    pub parent_contact: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

/// Wire shape of a submission, sent by the gateway to `POST /applications`.
///
/// Every field is optional on the wire so that a missing value surfaces as a
/// validation error rather than an opaque deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    #[validate(required, length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub phone: Option<String>,
    #[validate(required, range(min = 0, max = 120))]
    pub age: Option<i32>,
    #[validate(required, length(min = 1, max = 32))]
    pub grade_level: Option<String>,
    #[validate(required, custom(function = "crate::validation::validate_program"))]
    pub program: Option<String>,
    #[validate(length(max = 255))]
    pub birth_certificate: Option<String>,
    #[validate(length(max = 255))]
    pub transcript: Option<String>,
    #[validate(length(max = 255))]
    pub parent_contact: Option<String>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A submission that passed validation, with defaults resolved. This is what gets inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: i32,
    pub grade_level: String,
    pub program: Program,
    pub birth_certificate: Option<String>,
    pub transcript: Option<String>,
    pub parent_contact: Option<String>,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl NewApplication {
    /// Validate the submission and resolve defaults. `now` stamps `submitted_at` when the
    /// caller did not provide one.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<ApplicationRecord, ValidationErrors> {
        self.validate()?;

        let program = required("program", self.program)?;
        let program = program.parse::<Program>().map_err(|_| {
            single_error("program", ValidationError::new("program"))
        })?;

        Ok(ApplicationRecord {
            full_name: required("full_name", self.full_name)?,
            email: required("email", self.email)?,
            phone: self.phone,
            age: required("age", self.age)?,
            grade_level: required("grade_level", self.grade_level)?,
            program,
            birth_certificate: self.birth_certificate,
            transcript: self.transcript,
            parent_contact: self.parent_contact,
            message: self.message,
            status: self.status,
            submitted_at: self.submitted_at.unwrap_or(now),
        })
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationErrors> {
    value.ok_or_else(|| single_error(field, ValidationError::new("required")))
}

fn single_error(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Response body of `GET /applications/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCount {
    pub count: i64,
}
