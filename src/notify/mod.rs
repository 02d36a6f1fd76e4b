pub mod client;
pub mod models;
pub use client::*;
pub use models::*;

use serde_json::{Map, Value};

pub const TOAST_ENDPOINT: &str = "/api/notifications/toast";
pub const PUSH_ENDPOINT: &str = "/api/notifications/push";
pub const REGISTER_SUBSCRIPTION_ENDPOINT: &str = "/api/notifications/register-subscription";
pub const HEALTH_ENDPOINT: &str = "/healthz";

// Callers only ever see a yes/no outcome. The reason for a failure is
// in the notification log.
impl NotificationService {
    /// Store a toast for `user_id` on the notification service.
    pub async fn notify_toast(
        &self,
        user_id: Option<&UserId>,
        message: &str,
        toast_type: &str,
        context: &Map<String, Value>,
    ) -> bool {
        let Some(user_id) = present(user_id) else {
            return false;
        };
        let payload = ToastRequest {
            user_id,
            message,
            toast_type: ToastType::coerce(toast_type),
            context,
        };
        self.send(TOAST_ENDPOINT, &payload, RequestMethod::Post)
            .await
            .is_some_and(|r| response_ok(&r))
    }

    /// Deliver a web push notification to every device `user_id`
    /// registered.
    pub async fn notify_push(
        &self,
        user_id: Option<&UserId>,
        title: &str,
        body: &str,
        url: Option<&str>,
        icon: Option<&str>,
    ) -> bool {
        let Some(user_id) = present(user_id) else {
            return false;
        };
        let payload = PushNotification::new(user_id, title, body, url, icon);
        let Some(response) = self.send(PUSH_ENDPOINT, &payload, RequestMethod::Post).await else {
            return false;
        };

        if let Some(sent) = response.get("sent") {
            let failed = response.get("failed").cloned().unwrap_or(Value::from(0));
            tracing::debug!("Push for user {} sent={} failed={}", user_id, sent, failed);
        }
        response_ok(&response)
    }

    /// Forward a browser push subscription for `user_id`.
    pub async fn notify_register_subscription(
        &self,
        user_id: Option<&UserId>,
        subscription: &Map<String, Value>,
    ) -> bool {
        self.register_subscription(user_id, subscription).await
    }

    /// Forward a subscription of any shape verbatim. Only the legacy
    /// subscription endpoint needs this, everything else should pass an
    /// object to [`Self::notify_register_subscription`].
    pub async fn notify_register_raw_subscription(
        &self,
        user_id: Option<&UserId>,
        subscription: &Value,
    ) -> bool {
        if subscription.is_null() {
            return false;
        }
        self.register_subscription(user_id, subscription).await
    }

    async fn register_subscription<T: serde::Serialize>(
        &self,
        user_id: Option<&UserId>,
        subscription: &T,
    ) -> bool {
        let Some(user_id) = present(user_id) else {
            return false;
        };
        let payload = SubscriptionRequest {
            user_id,
            subscription,
        };
        self.send(REGISTER_SUBSCRIPTION_ENDPOINT, &payload, RequestMethod::Post)
            .await
            .is_some_and(|r| response_ok(&r))
    }

    /// Pull the pending toasts for `user_id`. Always returns a list,
    /// empty on any failure.
    pub async fn fetch_toasts(&self, user_id: Option<&UserId>) -> Vec<Value> {
        let Some(user_id) = present(user_id) else {
            return Vec::new();
        };
        let mut payload = Map::new();
        payload.insert("user_id".to_string(), serde_json::to_value(user_id).unwrap_or_default());

        match self.request(TOAST_ENDPOINT, &payload, RequestMethod::Get).await {
            Some(mut response) if response_ok(&response) => match response.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Whether the notification service is up and answering.
    pub async fn health_check(&self) -> bool {
        self.request(HEALTH_ENDPOINT, &Map::new(), RequestMethod::Get)
            .await
            .is_some_and(|r| response_ok(&r))
    }
}
