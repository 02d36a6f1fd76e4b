use std::env;

pub const DEFAULT_NOTIFICATIONS_SERVICE_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_LOG_PATH: &str = "logs/notifications.log";

/// How `/save_subscription` treats the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubscriptionMode {
    /// Requires a CSRF token and an authenticated session user and
    /// reports downstream failures to the browser.
    #[default]
    Strict,
    /// Accepts any session, falls back to the `guest` identity and
    /// always answers 200.
    Legacy,
}

impl SubscriptionMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => SubscriptionMode::Legacy,
            _ => SubscriptionMode::Strict,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub notifications_service_url: String,
    pub log_path: String,
    pub session_cookie_name: String,
    pub csrf_field_name: String,
    pub subscription_mode: SubscriptionMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        let notifications_service_url = resolve_base_url(None);
        let log_path =
            env::var("NOTIFICATIONS_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
        let session_cookie_name = env::var("NOTIFICATIONS_SESSION_NAME")
            .unwrap_or_else(|_| "notify_session".to_string());
        let csrf_field_name =
            env::var("NOTIFICATIONS_CSRF_FIELD").unwrap_or_else(|_| "csrf_token".to_string());
        let subscription_mode = env::var("NOTIFICATIONS_SUBSCRIPTION_MODE")
            .map(|v| SubscriptionMode::parse(&v))
            .unwrap_or_default();

        Self {
            notifications_service_url,
            log_path,
            session_cookie_name,
            csrf_field_name,
            subscription_mode,
        }
    }
}

/// Resolve the notification service base URL.
///
/// An explicitly configured value wins when it is non-empty, then the
/// `NOTIFICATIONS_SERVICE_URL` environment variable, then the local
/// default. Trailing slashes are always stripped so endpoints can be
/// appended directly.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    let base = configured
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .or_else(|| {
            env::var("NOTIFICATIONS_SERVICE_URL")
                .ok()
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_NOTIFICATIONS_SERVICE_URL.to_string());
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_prefers_the_configured_url() {
        unsafe { env::set_var("NOTIFICATIONS_SERVICE_URL", "http://env.example:9000") };
        let actual = resolve_base_url(Some("http://configured.example//"));
        unsafe { env::remove_var("NOTIFICATIONS_SERVICE_URL") };
        assert_eq!(actual, "http://configured.example");
    }

    #[test]
    #[serial]
    fn it_falls_back_to_the_env_var() {
        unsafe { env::set_var("NOTIFICATIONS_SERVICE_URL", "http://env.example:9000/") };
        let actual = resolve_base_url(Some(""));
        unsafe { env::remove_var("NOTIFICATIONS_SERVICE_URL") };
        assert_eq!(actual, "http://env.example:9000");
    }

    #[test]
    #[serial]
    fn it_uses_the_default_url() {
        unsafe { env::remove_var("NOTIFICATIONS_SERVICE_URL") };
        assert_eq!(resolve_base_url(None), DEFAULT_NOTIFICATIONS_SERVICE_URL);
    }

    #[test]
    fn it_parses_subscription_mode() {
        assert_eq!(SubscriptionMode::parse("legacy"), SubscriptionMode::Legacy);
        assert_eq!(SubscriptionMode::parse(" LEGACY "), SubscriptionMode::Legacy);
        assert_eq!(SubscriptionMode::parse("strict"), SubscriptionMode::Strict);
        assert_eq!(SubscriptionMode::parse("whatever"), SubscriptionMode::Strict);
    }
}
