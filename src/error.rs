//! Error types for the blog front-end.
//!
//! Only configuration and transport failures are errors. A missing post or
//! an empty index is a regular view state (see [`crate::pages`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Result alias used throughout the library.
pub type Result<T, E = BlogError> = std::result::Result<T, E>;

/// Problems with the site configuration. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing CMS project id (set `cms.project_id` or CMS_PROJECT_ID)")]
    MissingProjectId,

    #[error("missing CMS dataset (set `cms.dataset` or CMS_DATASET)")]
    MissingDataset,

    #[error("invalid project id {0:?}: only lowercase letters and digits are allowed")]
    InvalidProjectId(String),

    #[error("invalid dataset name {0:?}")]
    InvalidDataset(String),

    #[error("`{0}` must be greater than zero")]
    ZeroSetting(&'static str),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let markup = crate::templates::error_page(
            "Something went wrong",
            "The content service is temporarily unavailable. Please try again later.",
        );
        (StatusCode::INTERNAL_SERVER_ERROR, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = BlogError::from(ConfigError::MissingProjectId);
        assert!(err.to_string().starts_with("configuration error: missing CMS project id"));
    }

    #[test]
    fn status_error_display() {
        let err = BlogError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "CMS returned 401: unauthorized");
    }

    #[test]
    fn error_into_response_is_server_error() {
        let err = BlogError::Status {
            status: 503,
            body: String::new(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
