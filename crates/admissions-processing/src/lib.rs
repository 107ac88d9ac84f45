//! Admissions Processing Library
//!
//! Request body decoding for the submission gateway. The gateway streams the
//! application form's `multipart/form-data` body into [`multipart`].

pub mod multipart;

pub use multipart::{
    parse_boundary, ExtractedForm, MultipartError, MultipartExtractor, UploadedFile,
    DEFAULT_MAX_PARTS,
};
