//! Router for the subscription API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;

use super::body::parse_body;
use super::public::{
    CSRF_HEADER, LegacySubscriptionResponse, SubscriptionError, SubscriptionResponse,
};
use crate::api::routes::current_session;
use crate::api::state::AppState;
use crate::core::SubscriptionMode;
use crate::notify::UserId;

type SharedState = Arc<RwLock<AppState>>;

const GUEST_USER: &str = "guest";

async fn method_not_allowed() -> SubscriptionError {
    SubscriptionError::MethodNotAllowed
}

/// Save a browser push subscription for the current user
async fn save_subscription(
    State(state): State<SharedState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let (session, service, mode, csrf_field) = {
        let shared_state = state.read().expect("Unable to read share state");
        (
            current_session(&shared_state, &jar),
            shared_state.service.clone(),
            shared_state.config.subscription_mode,
            shared_state.config.csrf_field_name.clone(),
        )
    };
    let fields = parse_body(&body);

    if mode == SubscriptionMode::Legacy {
        let user_id = UserId::Text(
            session
                .current_user()
                .map(|id| id.to_string())
                .unwrap_or_else(|| GUEST_USER.to_string()),
        );
        // Any non-null value is forwarded as-is
        let Some(subscription) = fields.get("subscription").filter(|v| !v.is_null()) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(LegacySubscriptionResponse {
                    status: String::from("error"),
                    message: String::from("Invalid subscription payload"),
                }),
            )
                .into_response();
        };

        // The browser is told it worked either way
        if !service
            .notify_register_raw_subscription(Some(&user_id), subscription)
            .await
        {
            service.log().log(&format!(
                "save_subscription: error registering subscription for user {} at {}",
                user_id,
                service.base_url()
            ));
        }
        return Json(LegacySubscriptionResponse {
            status: String::from("ok"),
            message: String::from("Subscription saved (or queued)"),
        })
        .into_response();
    }

    let token = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| fields.get(&csrf_field).and_then(Value::as_str));
    if !session.csrf_matches(token) {
        return SubscriptionError::InvalidCsrf.into_response();
    }

    let Some(user_id) = session.current_user() else {
        return SubscriptionError::AuthRequired.into_response();
    };

    let Some(subscription) = fields.get("subscription").and_then(Value::as_object) else {
        return SubscriptionError::MissingSubscription.into_response();
    };

    if !service
        .notify_register_subscription(Some(user_id), subscription)
        .await
    {
        return SubscriptionError::ServiceUnavailable.into_response();
    }

    Json(SubscriptionResponse {
        ok: true,
        error: None,
    })
    .into_response()
}

/// Create the subscription router
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/save_subscription",
        post(save_subscription).fallback(method_not_allowed),
    )
}
