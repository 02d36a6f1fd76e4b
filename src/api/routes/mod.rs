//! API routes module

pub mod subscription;
pub mod toasts;

use std::sync::{Arc, RwLock};

use axum::Router;
use axum_extra::extract::CookieJar;

use crate::api::state::AppState;
use crate::session::Session;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Browser push subscription registration
        .merge(subscription::router())
        // Toast polling
        .merge(toasts::router())
}

/// Id of the caller's session, taken from the configured cookie.
fn session_id(state: &AppState, jar: &CookieJar) -> Option<String> {
    jar.get(&state.config.session_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty())
}

/// Snapshot of the caller's session, empty when there is none.
fn current_session(state: &AppState, jar: &CookieJar) -> Session {
    session_id(state, jar)
        .and_then(|id| state.sessions.get(&id).cloned())
        .unwrap_or_default()
}
