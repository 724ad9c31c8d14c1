//! Client-facing error type and its HTTP rendering.
//!
//! Input and domain errors are reported with `200 OK` and a
//! `{"status":"Error","error":"..."}` body; only authentication failures and
//! panics use non-2xx codes (the latter is rendered by the panic layer).

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::api::dto::response::StatusResponse;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "link-shortener";

/// Errors surfaced to API clients.
///
/// The `Display` output is exactly the message placed in the response body,
/// so variants carrying storage context never leak backend details.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("empty request")]
    EmptyRequest,

    #[error("failed to decode request")]
    Decode(#[source] serde_json::Error),

    /// One or more field rules failed; the message is already templated.
    #[error("{0}")]
    Validation(String),

    #[error("invalid alias (special characters not allowed)")]
    InvalidAlias,

    #[error("alias is reserved")]
    ReservedAlias,

    #[error("invalid id")]
    InvalidId,

    #[error("url already exists")]
    AliasExists,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Internal(&'static str),

    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    /// HTTP status used for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let challenge = matches!(self, AppError::Unauthorized);

        let mut response = (status, Json(StatusResponse::error(self.to_string()))).into_response();

        if challenge {
            let value = format!("Basic realm=\"{AUTH_REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&value) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_message(&errors))
    }
}

/// Renders validation failures as `field '<Field>' ...` messages joined by `", "`.
///
/// Fields are reported in name order so the message is stable.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut messages = Vec::new();

    for (field, kind) in fields {
        let ValidationErrorsKind::Field(field_errors) = kind else {
            messages.push(format!("field '{}' is not valid", display_field(field)));
            continue;
        };

        for error in field_errors {
            let name = display_field(field);
            let message = match error.code.as_ref() {
                "required" => format!("field '{name}' is required"),
                "url" => format!("field '{name}' must be a valid URL"),
                _ => format!("field '{name}' is not valid"),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Client-facing field name: acronyms upper-cased, other names capitalized.
fn display_field(field: &str) -> String {
    match field {
        "url" | "id" => field.to_ascii_uppercase(),
        _ => {
            let mut chars = field.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_message_templates() {
        let mut errors = ValidationErrors::new();
        errors.add("url", ValidationError::new("required"));
        assert_eq!(validation_message(&errors), "field 'URL' is required");

        let mut errors = ValidationErrors::new();
        errors.add("url", ValidationError::new("url"));
        assert_eq!(
            validation_message(&errors),
            "field 'URL' must be a valid URL"
        );

        let mut errors = ValidationErrors::new();
        errors.add("alias", ValidationError::new("length"));
        assert_eq!(validation_message(&errors), "field 'Alias' is not valid");
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("url", ValidationError::new("url"));
        errors.add("alias", ValidationError::new("length"));

        assert_eq!(
            validation_message(&errors),
            "field 'Alias' is not valid, field 'URL' must be a valid URL"
        );
    }

    #[test]
    fn test_client_errors_use_ok_status() {
        assert_eq!(AppError::EmptyRequest.status_code(), StatusCode::OK);
        assert_eq!(AppError::NotFound("not found").status_code(), StatusCode::OK);
        assert_eq!(AppError::Internal("internal error").status_code(), StatusCode::OK);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = AppError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"link-shortener\""
        );
    }

    #[test]
    fn test_messages_match_wire_format() {
        assert_eq!(AppError::AliasExists.to_string(), "url already exists");
        assert_eq!(
            AppError::InvalidAlias.to_string(),
            "invalid alias (special characters not allowed)"
        );
        assert_eq!(AppError::InvalidId.to_string(), "invalid id");
        assert_eq!(AppError::NotFound("url id not found").to_string(), "url id not found");
    }
}
