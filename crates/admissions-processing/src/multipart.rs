//! `multipart/form-data` decoding.
//!
//! Framing, streaming and the body size cap are handled by [`multer`]. On top of it this
//! module applies the form policy: parts without a name are skipped, text fields are
//! trimmed, an empty file input is ignored and the last part with a given name wins.

use std::collections::HashMap;

use bytes::Bytes;
use futures::Stream;
use multer::{Constraints, Multipart, SizeLimit};

pub const DEFAULT_MAX_PARTS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum MultipartError {
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Content-Type has no boundary parameter")]
    MissingBoundary,

    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Field '{name}' is not valid UTF-8")]
    InvalidFieldEncoding { name: String },

    #[error("Too many parts (max: {max})")]
    TooManyParts { max: usize },

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    Stream(String),
}

impl From<multer::Error> for MultipartError {
    fn from(err: multer::Error) -> Self {
        match err {
            multer::Error::StreamSizeExceeded { limit } => MultipartError::BodyTooLarge {
                limit: usize::try_from(limit).unwrap_or(usize::MAX),
            },
            multer::Error::StreamReadFailed(source) => MultipartError::Stream(source.to_string()),
            multer::Error::NoMultipart => MultipartError::InvalidContentType(
                "expected multipart/form-data".to_string(),
            ),
            multer::Error::DecodeContentType(e) => {
                MultipartError::InvalidContentType(e.to_string())
            }
            multer::Error::NoBoundary => MultipartError::MissingBoundary,
            other => MultipartError::Malformed(other.to_string()),
        }
    }
}

/// A file part, bytes untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Filename as declared by the client. Never use it as a path.
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Decoded form: text fields and file parts, keyed by part name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl ExtractedForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

/// Extract the boundary from a `multipart/form-data` Content-Type header value.
pub fn parse_boundary(content_type: &str) -> Result<String, MultipartError> {
    let boundary = multer::parse_boundary(content_type)?;
    if boundary.is_empty() {
        return Err(MultipartError::MissingBoundary);
    }
    Ok(boundary)
}

/// Decoder with a whole-body size cap and a part count cap.
#[derive(Debug, Clone)]
pub struct MultipartExtractor {
    max_bytes: usize,
    max_parts: usize,
}

impl MultipartExtractor {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            max_parts: DEFAULT_MAX_PARTS,
        }
    }

    pub fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts;
        self
    }

    /// Decode a body stream delimited by `boundary`.
    pub async fn extract<S, O, E>(
        &self,
        stream: S,
        boundary: impl Into<String>,
    ) -> Result<ExtractedForm, MultipartError>
    where
        S: Stream<Item = Result<O, E>> + Send,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let constraints = Constraints::new()
            .size_limit(SizeLimit::new().whole_stream(self.max_bytes as u64));
        let mut multipart = Multipart::with_constraints(stream, boundary, constraints);

        let mut form = ExtractedForm::default();
        let mut parts = 0usize;

        while let Some(field) = multipart.next_field().await? {
            parts += 1;
            if parts > self.max_parts {
                return Err(MultipartError::TooManyParts {
                    max: self.max_parts,
                });
            }

            let disposition = field
                .headers()
                .get("content-disposition")
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
            let Some(disposition) = disposition else {
                tracing::debug!("Skipping multipart part without Content-Disposition");
                continue;
            };
            let params = DispositionParams::parse(&disposition);
            let Some(name) = params.name else {
                tracing::debug!("Skipping multipart part without a name");
                continue;
            };
            let content_type = field.content_type().map(|mime| mime.to_string());
            let data = field.bytes().await?;

            match params.filename {
                Some(filename) => {
                    if filename.is_empty() && data.is_empty() {
                        // A file input left empty by the user.
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            filename,
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let value = std::str::from_utf8(&data)
                        .map_err(|_| MultipartError::InvalidFieldEncoding { name: name.clone() })?;
                    form.fields.insert(name, value.trim().to_string());
                }
            }
        }

        tracing::debug!(
            parts,
            fields = form.fields.len(),
            files = form.files.len(),
            "Multipart body decoded"
        );

        Ok(form)
    }
}

/// `name` and `filename` parameters of a Content-Disposition value.
#[derive(Debug, Default, PartialEq, Eq)]
struct DispositionParams {
    name: Option<String>,
    filename: Option<String>,
}

impl DispositionParams {
    /// Parameters are split on `;` outside quoted strings, so a quoted value never
    /// contributes a parameter of its own.
    fn parse(disposition: &str) -> Self {
        let mut params = Self::default();
        for param in split_unquoted(disposition).into_iter().skip(1) {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim());
            match key.trim().to_ascii_lowercase().as_str() {
                "name" => params.name = Some(value),
                "filename" => params.filename = Some(value),
                _ => {}
            }
        }
        params
    }
}

fn split_unquoted(value: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                pieces.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&value[start..]);
    pieces
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}
