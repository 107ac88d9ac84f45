//! Application submission: store uploaded documents, build the record, forward it to
//! the Application Store Service.

use std::sync::Arc;

use admissions_api_client::{ApiClient, ClientError};
use admissions_core::constants::fields;
use admissions_core::models::{Application, ApplicationStatus, NewApplication};
use admissions_processing::{ExtractedForm, UploadedFile};
use admissions_storage::{Storage, StorageError, StoredFile};
use chrono::{DateTime, Utc};

use crate::error::HttpAppError;

/// File parts that are kept. Anything else sent as a file is ignored.
const STORED_FILE_FIELDS: [&str; 2] = [fields::BIRTH_CERTIFICATE, fields::TRANSCRIPT];

#[derive(Clone)]
pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    client: ApiClient,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, client: ApiClient) -> Self {
        Self { storage, client }
    }

    /// Run one submission end to end.
    ///
    /// Returns the stored row, or `None` when the store accepted the application but
    /// answered with a body that could not be decoded.
    #[tracing::instrument(
        skip(self, form),
        fields(field_count = form.fields.len(), file_count = form.files.len())
    )]
    pub async fn submit(&self, form: ExtractedForm) -> Result<Option<Application>, HttpAppError> {
        for name in form
            .files
            .keys()
            .filter(|name| !STORED_FILE_FIELDS.contains(&name.as_str()))
        {
            tracing::debug!(field = %name, "Ignoring unexpected file part");
        }

        let mut stored = Vec::new();
        let (birth_certificate, transcript) = match self.store_files(&form, &mut stored).await {
            Ok(paths) => paths,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e.into());
            }
        };

        let application = build_application(&form, birth_certificate, transcript, Utc::now());

        match self.client.create_application(&application).await {
            Ok(row) => {
                tracing::info!(
                    application_id = row.id,
                    program = %row.program,
                    documents = stored.len(),
                    "Application submitted"
                );
                Ok(Some(row))
            }
            Err(ClientError::Decode(e)) => {
                tracing::warn!(error = %e, "Store accepted application but returned an unreadable body");
                Ok(None)
            }
            Err(e @ ClientError::Rejected { .. }) => {
                self.discard(&stored).await;
                Err(e.into())
            }
            // The store may still have committed the row, so the documents stay.
            Err(e) => Err(e.into()),
        }
    }

    async fn store_files(
        &self,
        form: &ExtractedForm,
        stored: &mut Vec<StoredFile>,
    ) -> Result<(Option<String>, Option<String>), StorageError> {
        let birth_certificate = self
            .store_file(form.file(fields::BIRTH_CERTIFICATE), stored)
            .await?;
        let transcript = self.store_file(form.file(fields::TRANSCRIPT), stored).await?;
        Ok((birth_certificate, transcript))
    }

    async fn store_file(
        &self,
        file: Option<&UploadedFile>,
        stored: &mut Vec<StoredFile>,
    ) -> Result<Option<String>, StorageError> {
        let Some(file) = file else {
            return Ok(None);
        };

        let saved = self
            .storage
            .upload(&file.filename, file.content_type.as_deref(), file.data.clone())
            .await?;
        let url = saved.url.clone();
        stored.push(saved);
        Ok(Some(url))
    }

    async fn discard(&self, stored: &[StoredFile]) {
        for file in stored {
            if let Err(e) = self.storage.delete(&file.key).await {
                tracing::warn!(error = %e, key = %file.key, "Failed to remove uploaded file");
            }
        }
    }
}

/// Build the record sent to the store. Text fields are copied untouched; `age` is
/// coerced the way the browser form's `parseInt` did.
pub fn build_application(
    form: &ExtractedForm,
    birth_certificate: Option<String>,
    transcript: Option<String>,
    now: DateTime<Utc>,
) -> NewApplication {
    let text = |name: &str| form.field(name).map(str::to_string);

    NewApplication {
        full_name: text(fields::FULL_NAME),
        email: text(fields::EMAIL),
        phone: text(fields::PHONE),
        age: form.field(fields::AGE).and_then(parse_int),
        grade_level: text(fields::GRADE_LEVEL),
        program: text(fields::PROGRAM),
        birth_certificate,
        transcript,
        parent_contact: text(fields::PARENT_CONTACT),
        message: text(fields::MESSAGE),
        status: ApplicationStatus::Pending,
        submitted_at: Some(now),
    }
}

/// Integer prefix of `input`: leading whitespace, optional sign, then decimal digits
/// (or hex digits after `0x`). `None` when no digit follows. Saturates at the `i32` range.
pub fn parse_int(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }
    if !seen {
        return None;
    }

    let value = if negative { -value } else { value };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}
