//! Test utilities for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{Router, body::Body};
use tempfile::TempDir;

use notify_relay::api::AppState;
use notify_relay::api::app;
use notify_relay::core::{AppConfig, NotificationLog, SubscriptionMode};
use notify_relay::notify::NotificationService;
use notify_relay::session::Session;

pub const SESSION_COOKIE: &str = "notify_session";
pub const SESSION_ID: &str = "session-abc";
pub const CSRF_TOKEN: &str = "csrf-123";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<RwLock<AppState>>,
    // Holds the log directory for the lifetime of the test
    pub dir: TempDir,
}

impl TestApp {
    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("logs").join("notifications.log")
    }

    pub fn insert_session(&self, session: Session) {
        self.state
            .write()
            .unwrap()
            .sessions
            .insert(SESSION_ID, session);
    }

    /// Swap in a relay client with a shorter total timeout.
    pub fn set_timeout(&self, timeout: Duration) {
        let mut state = self.state.write().unwrap();
        let base_url = state.service.base_url().to_string();
        state.service =
            NotificationService::with_timeout(&base_url, NotificationLog::new(self.log_path()), timeout)
                .expect("Failed to build notification service");
    }

    pub fn session(&self) -> Option<Session> {
        self.state.read().unwrap().sessions.get(SESSION_ID).cloned()
    }
}

/// Creates a test application that relays to `service_url` and writes
/// its notification log into a temporary directory.
pub fn test_app(service_url: &str, subscription_mode: SubscriptionMode) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let app_config = AppConfig {
        notifications_service_url: service_url.to_string(),
        log_path: dir
            .path()
            .join("logs")
            .join("notifications.log")
            .display()
            .to_string(),
        session_cookie_name: String::from(SESSION_COOKIE),
        csrf_field_name: String::from("csrf_token"),
        subscription_mode,
    };
    let app_state = AppState::new(app_config).expect("Failed to build app state");
    let state = Arc::new(RwLock::new(app_state));
    TestApp {
        router: app(Arc::clone(&state)),
        state,
        dir,
    }
}

/// Address that refuses connections.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Address that accepts connections and never answers.
pub async fn hanging_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub fn session_cookie() -> String {
    format!("{}={}", SESSION_COOKIE, SESSION_ID)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
