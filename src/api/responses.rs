//! Common API response types

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::models::AgentError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Outcome of checking an inbound payload's disk usage summary
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub disk_usage_present: bool,
}

/// Convert AgentError to HTTP response
impl From<AgentError> for HttpResponse {
    fn from(error: AgentError) -> Self {
        let status = match &error {
            AgentError::CollectionError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AgentError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            AgentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(error.to_string()))
    }
}

/// Result type that can be converted to HttpResponse
pub type ApiResult<T> = Result<T, AgentError>;
