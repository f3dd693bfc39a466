//! The status envelope embedded in every Calendly response.
//!
//! # Design
//! The provider signals failures inside the JSON body
//! (`{"status": 401, "type": "authentication_error", "message": ...}`) and
//! may or may not mirror them on the status line. Every response type
//! flattens one `Envelope` next to its payload and implements `ApiResponse`,
//! which provides the status predicates once for all of them.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StatusError;

const STATUS_OK: u16 = 200;
const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_FORBIDDEN: u16 = 403;
const STATUS_UNPROCESSABLE: u16 = 422;

/// Status, error category, message and validation errors of a response.
///
/// Every field is optional on the wire, and `null` reads as absent. A
/// successful response usually omits all of them, which leaves `status` at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub status: u16,

    /// Provider-defined error category, e.g. `authentication_error`.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub kind: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub message: String,

    /// Field name to validation messages. Key order is not significant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

fn is_zero(status: &u16) -> bool {
    *status == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Envelope {
    /// 200, or 0 for endpoints that leave the status out.
    pub fn is_success(&self) -> bool {
        self.status == 0 || self.status == STATUS_OK
    }

    pub fn unauthorized(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }

    pub fn forbidden(&self) -> bool {
        self.status == STATUS_FORBIDDEN
    }

    pub fn has_validation_error(&self) -> bool {
        self.status == STATUS_UNPROCESSABLE
    }

    /// `Err` carrying the embedded message when the status is not a success.
    pub fn err(&self) -> Result<(), StatusError> {
        if self.is_success() {
            return Ok(());
        }
        Err(StatusError {
            status: self.status,
            kind: self.kind.clone(),
            message: self.message.clone(),
        })
    }

    /// Validation messages reported for one field.
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A decoded response carrying an `Envelope`.
pub trait ApiResponse {
    fn envelope(&self) -> &Envelope;

    fn is_success(&self) -> bool {
        self.envelope().is_success()
    }

    fn unauthorized(&self) -> bool {
        self.envelope().unauthorized()
    }

    fn forbidden(&self) -> bool {
        self.envelope().forbidden()
    }

    fn has_validation_error(&self) -> bool {
        self.envelope().has_validation_error()
    }

    fn err(&self) -> Result<(), StatusError> {
        self.envelope().err()
    }
}

impl ApiResponse for Envelope {
    fn envelope(&self) -> &Envelope {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: u16) -> Envelope {
        Envelope {
            status,
            ..Envelope::default()
        }
    }

    #[test]
    fn omitted_status_counts_as_success() {
        let env: Envelope = serde_json::from_str("{}").unwrap();
        assert_eq!(env.status, 0);
        assert!(env.is_success());
        assert!(env.err().is_ok());
    }

    #[test]
    fn explicit_200_is_success() {
        assert!(envelope(200).is_success());
        assert!(!envelope(201).is_success());
    }

    #[test]
    fn predicates_classify_status() {
        assert!(envelope(401).unauthorized());
        assert!(envelope(403).forbidden());
        assert!(envelope(422).has_validation_error());
        assert!(!envelope(401).forbidden());
        assert!(!envelope(200).has_validation_error());
    }

    #[test]
    fn err_synthesizes_message() {
        let env: Envelope = serde_json::from_str(
            r#"{"status": 401, "type": "authentication_error", "message": "Invalid token"}"#,
        )
        .unwrap();
        let err = env.err().unwrap_err();
        assert_eq!(err.status, 401);
        assert_eq!(err.kind, "authentication_error");
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn null_fields_read_as_absent() {
        let env: Envelope = serde_json::from_str(
            r#"{"status": 401, "type": "authentication_error", "message": null}"#,
        )
        .unwrap();
        assert!(env.unauthorized());
        assert_eq!(env.kind, "authentication_error");
        assert_eq!(env.message, "");

        let env: Envelope =
            serde_json::from_str(r#"{"status": null, "type": null, "errors": null}"#).unwrap();
        assert!(env.is_success());
        assert!(env.kind.is_empty());
        assert!(env.field_errors("url").is_empty());
    }

    #[test]
    fn validation_errors_are_looked_up_by_field() {
        let env: Envelope = serde_json::from_str(
            r#"{
                "status": 422,
                "type": "validation_error",
                "message": "Validation failed",
                "errors": {"url": ["can't be blank", "is invalid"]}
            }"#,
        )
        .unwrap();
        assert!(env.has_validation_error());
        assert_eq!(env.field_errors("url"), ["can't be blank", "is invalid"]);
        assert!(env.field_errors("events").is_empty());
    }
}
