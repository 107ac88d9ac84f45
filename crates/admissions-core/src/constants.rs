//! Shared constants: user-facing messages and well-known form field names.

/// Returned to the browser once the Store Service has accepted an application.
pub const SUBMISSION_ACCEPTED_MESSAGE: &str = "ใบสมัครของคุณได้รับเรียบร้อยแล้ว";

/// Used when the Store Service rejects an application without saying why.
pub const SUBMISSION_FAILED_MESSAGE: &str = "เกิดข้อผิดพลาดในการส่งใบสมัคร";

/// Prefix for failures that happen inside the gateway (parsing, disk, transport).
pub const PROCESSING_FAILED_PREFIX: &str = "เกิดข้อผิดพลาดในการประมวลผล: ";

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Multipart field names sent by the application form.
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const AGE: &str = "age";
    pub const GRADE_LEVEL: &str = "gradeLevel";
    pub const PROGRAM: &str = "program";
    pub const PARENT_CONTACT: &str = "parentContact";
    pub const MESSAGE: &str = "message";
    pub const BIRTH_CERTIFICATE: &str = "birthCertificate";
    pub const TRANSCRIPT: &str = "transcript";
}
