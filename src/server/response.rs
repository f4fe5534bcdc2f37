//! Response payloads and error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::github::GithubError;
use crate::models::{DevMeterResult, UserProfile};

/// `{ success, message, metrics?, user?, error? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DevMeterResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn metrics(result: DevMeterResult) -> Self {
        Self {
            success: true,
            message: "GitHub metrics calculated and stored successfully".to_string(),
            metrics: Some(result),
            user: None,
            error: None,
        }
    }

    pub fn user(profile: UserProfile) -> Self {
        Self {
            success: true,
            message: "GitHub user data fetched and stored successfully".to_string(),
            metrics: None,
            user: Some(profile),
            error: None,
        }
    }

    fn failure(message: &str, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            metrics: None,
            user: None,
            error,
        }
    }
}

/// Failures surfaced to HTTP callers. Only a message string crosses the boundary.
#[derive(Debug)]
pub enum ApiError {
    /// No valid session (401). Nothing was computed.
    AuthenticationRequired,
    /// Anything else (500)
    Internal { message: &'static str, error: String },
}

impl ApiError {
    pub(super) fn metrics(error: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: "Failed to calculate GitHub metrics",
            error: error.to_string(),
        }
    }

    pub(super) fn user(error: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: "Failed to fetch GitHub user data",
            error: error.to_string(),
        }
    }

    /// Map a failure to resolve the token's owner. A rejected token is a
    /// missing session; anything else goes through `otherwise`.
    pub(super) fn from_session(error: GithubError, otherwise: fn(GithubError) -> Self) -> Self {
        if error.is_unauthorized() {
            ApiError::AuthenticationRequired
        } else {
            otherwise(error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::failure("Authentication required", None)),
            )
                .into_response(),
            ApiError::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(message, Some(error))),
            )
                .into_response(),
        }
    }
}
