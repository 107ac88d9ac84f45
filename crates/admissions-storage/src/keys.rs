//! Key generation for uploaded files.

use uuid::Uuid;

const MAX_FILENAME_LENGTH: usize = 100;

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts (either separator) are dropped, anything outside `[A-Za-z0-9._-]`
/// becomes `_`, runs of dots collapse to one and leading dots are removed. Names that
/// end up empty become `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let last_component = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let mut sanitized: String = last_component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    let trimmed = sanitized.trim_start_matches('.');
    // Keep the tail so the extension survives truncation.
    let char_count = trimmed.chars().count();
    let tail: String = trimmed
        .chars()
        .skip(char_count.saturating_sub(MAX_FILENAME_LENGTH))
        .collect();

    if tail.is_empty() || tail.chars().all(|c| c == '_') {
        return "file".to_string();
    }
    tail
}

/// Generate a fresh storage key for an uploaded file: `{uuid}_{sanitized name}`.
pub fn generate_storage_key(filename: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), sanitize_filename(filename))
}
