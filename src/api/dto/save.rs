//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::response::StatusResponse;
use crate::error::AppError;
use crate::utils::alias::validate_alias;
use crate::utils::url_check::is_absolute_url;

/// Request to store a URL under an optional alias.
///
/// ```json
/// { "url": "https://example.com", "alias": "myalias" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SaveRequest {
    /// Target URL; must be absolute. Absent and `null` both fail as required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, custom(function = "validate_url"))]
    pub url: Option<String>,

    /// Optional alias. Absent, `null` and `""` all request a generated alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl SaveRequest {
    /// Runs field validation, then the alias rules.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with templated field messages, or the
    /// alias errors from [`validate_alias`].
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        if let Some(alias) = self.requested_alias() {
            validate_alias(alias)?;
        }

        Ok(())
    }

    /// The URL to store; empty until [`SaveRequest::check`] has passed.
    pub fn target_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// The caller's alias, with an empty string treated as absent.
    pub fn requested_alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|alias| !alias.is_empty())
    }
}

fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::new("required"));
    }

    if !is_absolute_url(url) {
        return Err(ValidationError::new("url"));
    }

    Ok(())
}

/// Successful save: `{"status":"OK","alias":"...","id":1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub response: StatusResponse,
    pub alias: String,
    pub id: i64,
}

impl SaveResponse {
    pub fn ok(alias: String, id: i64) -> Self {
        Self {
            response: StatusResponse::ok(),
            alias,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(url: &str, alias: Option<&str>) -> SaveRequest {
        SaveRequest {
            url: Some(url.to_string()),
            alias: alias.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request_without_alias() {
        assert!(request("https://example.com", None).check().is_ok());
    }

    #[test]
    fn test_empty_url_is_required() {
        let err = request("", Some("myalias")).check().unwrap_err();
        assert_eq!(err.to_string(), "field 'URL' is required");
    }

    #[test]
    fn test_malformed_url() {
        let err = request("invalid_url", None).check().unwrap_err();
        assert_eq!(err.to_string(), "field 'URL' must be a valid URL");
    }

    #[test]
    fn test_invalid_alias_after_valid_url() {
        let err = request("https://example.com", Some("!@#$%^"))
            .check()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAlias));
    }

    #[test]
    fn test_url_checked_before_alias() {
        let err = request("invalid_url", Some("!@#$%^")).check().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_alias_is_absent() {
        let req = request("https://example.com", Some(""));
        assert!(req.check().is_ok());
        assert_eq!(req.requested_alias(), None);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let req: SaveRequest = serde_json::from_value(json!({ "alias": null })).unwrap();
        assert_eq!(req.url, None);
        assert_eq!(req.alias, None);
    }

    #[test]
    fn test_absent_or_null_url_is_required() {
        let req: SaveRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.check().unwrap_err().to_string(), "field 'URL' is required");

        let req: SaveRequest = serde_json::from_value(json!({ "url": null })).unwrap();
        assert_eq!(req.check().unwrap_err().to_string(), "field 'URL' is required");
    }

    #[test]
    fn test_save_response_shape() {
        let value = serde_json::to_value(SaveResponse::ok("myalias".to_string(), 1)).unwrap();
        assert_eq!(
            value,
            json!({ "status": "OK", "alias": "myalias", "id": 1 })
        );
    }
}
