use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use repdesk_directory::DirectoryError;
use repdesk_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Data integrity violation")]
    Conflict(Vec<String>),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Uniform error payload
#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, Vec::new()),
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                details,
            ),
            ApiError::Conflict(details) => (
                StatusCode::CONFLICT,
                "Data integrity violation".to_string(),
                details,
            ),
            ApiError::Server(detail) | ApiError::Internal(detail) => {
                tracing::error!("request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorBody { message, details });

        (status, body).into_response()
    }
}

impl ApiError {
    /// Convert field-level validation failures into one detail string per
    /// offending field, formatted `"<field>: <message>"`
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                let field = camel_case(field);
                field_errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        details.sort();
        ApiError::Validation(details)
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::CompanyNotFound(_) | DirectoryError::RepresentativeNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            // transfer precondition failures fall through the generic path
            DirectoryError::NotInCompany => ApiError::Internal(err.to_string()),
            DirectoryError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Backend(detail) if detail.contains("constraint") => {
                ApiError::Conflict(vec![classify_integrity(detail).to_string()])
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

/// Best-effort classification of a storage-level integrity failure
pub fn classify_integrity(detail: &str) -> &'static str {
    if detail.contains("unique constraint") {
        "A unique constraint violation occurred."
    } else if detail.contains("foreign key constraint") {
        "A foreign key constraint violation occurred."
    } else {
        "An unspecified data integrity violation occurred."
    }
}

/// Field names cross the boundary in camelCase
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("missing".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict(vec![]).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_state_maps_to_generic_path() {
        let err: ApiError = DirectoryError::NotInCompany.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_classify_integrity() {
        assert_eq!(
            classify_integrity("violates unique constraint \"uk_company_name\""),
            "A unique constraint violation occurred."
        );
        assert_eq!(
            classify_integrity("foreign key constraint fails on member row"),
            "A foreign key constraint violation occurred."
        );
        assert_eq!(
            classify_integrity("constraint check failed"),
            "An unspecified data integrity violation occurred."
        );
    }

    #[test]
    fn test_camel_case_fields() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("name"), "name");
    }
}
