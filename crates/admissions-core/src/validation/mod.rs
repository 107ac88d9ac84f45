//! Validation helpers used by the `NewApplication` derive and by error rendering.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

use crate::models::Program;

/// Accept only the study programs the school offers.
pub fn validate_program(program: &str) -> Result<(), ValidationError> {
    if program.parse::<Program>().is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("program");
    error.message = Some(
        format!(
            "must be one of: {}",
            Program::ALL.map(|p| p.as_str()).join(", ")
        )
        .into(),
    );
    Err(error)
}

/// Flatten validator output into `{ field: [code, ...] }`, sorted by field name.
///
/// Field names are reported in the camelCase used on the wire.
pub fn field_error_codes(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs.iter().map(|e| e.code.to_string()).collect();
            (to_camel_case(&field), codes)
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
