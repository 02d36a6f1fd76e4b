//! Public types for the subscription API
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

pub const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body used when the endpoint runs in legacy mode.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LegacySubscriptionResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionError {
    MethodNotAllowed,
    InvalidCsrf,
    AuthRequired,
    MissingSubscription,
    ServiceUnavailable,
}

impl SubscriptionError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubscriptionError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SubscriptionError::InvalidCsrf => StatusCode::BAD_REQUEST,
            SubscriptionError::AuthRequired => StatusCode::UNAUTHORIZED,
            SubscriptionError::MissingSubscription => StatusCode::BAD_REQUEST,
            SubscriptionError::ServiceUnavailable => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionError::MethodNotAllowed => "method_not_allowed",
            SubscriptionError::InvalidCsrf => "invalid_csrf",
            SubscriptionError::AuthRequired => "auth_required",
            SubscriptionError::MissingSubscription => "missing_subscription",
            SubscriptionError::ServiceUnavailable => "service_unavailable",
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(SubscriptionResponse {
                ok: false,
                error: Some(self.code().to_string()),
            }),
        )
            .into_response()
    }
}
