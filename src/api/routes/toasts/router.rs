//! Router for the toasts API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};
use axum_extra::extract::CookieJar;
use serde_json::Value;

use super::public;
use crate::api::routes::session_id;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Drain the toasts queued in the caller's session and append the ones
/// the notification service holds for the session user.
async fn poll_toasts(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<public::ToastsResponse>, crate::api::public::ApiError> {
    let (queued, user_id, service) = {
        let mut shared_state = state.write().expect("Unable to write share state");
        let (queued, user_id) = match session_id(&shared_state, &jar) {
            Some(id) => match shared_state.sessions.get_mut(&id) {
                Some(session) => (session.take_toasts(), session.current_user().cloned()),
                None => (Vec::new(), None),
            },
            None => (Vec::new(), None),
        };
        (queued, user_id, shared_state.service.clone())
    };

    let mut items = queued
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    items.extend(service.fetch_toasts(user_id.as_ref()).await);

    Ok(Json(public::ToastsResponse { ok: true, items }))
}

/// Create the toasts router
pub fn router() -> Router<SharedState> {
    Router::new().route("/toasts", axum::routing::get(poll_toasts))
}
