//! JSON Schema validation for exported application data.
//!
//! Checks the JSON produced by `cvkit import` (or edited by hand) before it
//! is handed to other tools, using JSON Schema Draft 7.
//!
//! # Embedded Schema
//!
//! The schema is embedded at compile time from the `schemas/` directory:
//! - `application-data.json`: `personalData`, `workExperience[]`, `education[]`
//!   with `YYYY-MM` dates
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use cvkit::validation::{validate_application_data, is_valid_application_data};
//!
//! let data = json!({
//!     "personalData": { "firstName": "Erika", "lastName": "Mustermann" },
//!     "workExperience": [{ "id": "1", "startDate": "2021-03", "current": true }],
//!     "education": []
//! });
//! assert!(validate_application_data(&data).is_ok());
//!
//! let raw = json!({ "personalData": {}, "workExperience": [{ "id": "1", "startDate": "Jan 2020" }], "education": [] });
//! assert!(!is_valid_application_data(&raw));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static APPLICATION_DATA_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/application-data.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// Returns every validation error as a readable message.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator =
        jsonschema::draft7::new(schema).map_err(|e| vec![format!("Ungültiges Schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick check, no error details.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate against the embedded application-data schema.
pub fn validate_application_data(data: &Value) -> Result<(), Vec<String>> {
    validate(&APPLICATION_DATA_SCHEMA, data)
}

pub fn is_valid_application_data(data: &Value) -> bool {
    is_valid(&APPLICATION_DATA_SCHEMA, data)
}
