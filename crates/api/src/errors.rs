use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use mailauth_domain::DomainError;

use crate::dto::ErrorResponse;

/// Failures as the HTTP caller sees them. Messages are part of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    DomainRequired,
    DomainAndSelectorRequired,
    InvalidDomain,
    DkimNotFound,
    DnsQueryFailed,
    GenerationSuppressed,
    BadRequest(String),
}

impl ApiError {
    /// Mapping for the record-bundle endpoints (`/dns-query`, `/check`).
    pub fn from_resolve(error: &DomainError) -> Self {
        match error {
            DomainError::MissingParameter(_) => ApiError::DomainRequired,
            DomainError::InvalidDomainName(_) => ApiError::InvalidDomain,
            _ => ApiError::DnsQueryFailed,
        }
    }

    /// Mapping for `/dkim-lookup`: anything but missing input is "not found".
    pub fn from_dkim_lookup(error: &DomainError) -> Self {
        match error {
            DomainError::MissingParameter(_) => ApiError::DomainAndSelectorRequired,
            _ => ApiError::DkimNotFound,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DomainRequired
            | ApiError::DomainAndSelectorRequired
            | ApiError::InvalidDomain
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DkimNotFound => StatusCode::NOT_FOUND,
            ApiError::GenerationSuppressed => StatusCode::CONFLICT,
            ApiError::DnsQueryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::DomainRequired => "Domain is required",
            ApiError::DomainAndSelectorRequired => "Domain and selector are required",
            ApiError::InvalidDomain => "Invalid domain name",
            ApiError::DkimNotFound => "DKIM record not found for that selector.",
            ApiError::DnsQueryFailed => "Failed to query DNS records.",
            ApiError::GenerationSuppressed => {
                "SPF already authorizes the mail service; nothing to generate"
            }
            ApiError::BadRequest(message) => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
