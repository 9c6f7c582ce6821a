use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// A write was attempted with nobody signed in.
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid form: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    /// The same form is already being submitted.
    #[error("{0}")]
    Conflict(String),

    /// The data store could not be reached, failed, or answered with garbage.
    #[error("{0}")]
    ExternalService(String),

    #[error("Invalid data store URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Could not render page: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{} not found", resource))
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::Authentication(msg.to_string())
    }

    pub fn conflict(msg: &str) -> Self {
        Self::Conflict(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Whether the error was raised before any request reached the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::ValidatorError(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::ValidatorError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Url(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "AUTHENTICATION_ERROR",
            AppError::Validation(_) | AppError::ValidatorError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::ExternalService(_) => "DATA_STORE_ERROR",
            AppError::Url(_) | AppError::Template(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field name to messages, for form errors.
    fn details(&self) -> Option<Value> {
        let AppError::ValidatorError(errors) = self else {
            return None;
        };

        let fields: BTreeMap<String, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Some(json!(fields))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            tracing::error!("{}: {}", self.code(), self);
            match status {
                StatusCode::BAD_GATEWAY => "The data store is unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let mut error = json!({
            "code": self.code(),
            "message": message,
        });
        if let Some(details) = self.details() {
            error["details"] = details;
        }

        (status, Json(json!({ "success": false, "error": error }))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("Post").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::ExternalService("x".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(AppError::not_found("Post").to_string(), "Post not found");
    }

    #[test]
    fn test_form_errors_carry_field_details() {
        let errors = Form { title: String::new() }.validate().unwrap_err();
        let error = AppError::from(errors);

        assert!(error.is_validation());
        assert_eq!(error.code(), "VALIDATION_ERROR");
        assert_eq!(
            error.details().unwrap(),
            json!({"title": ["must not be empty"]})
        );
    }
}
