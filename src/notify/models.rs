use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded JSON object returned by the notification service.
pub type ServiceResponse = Map<String, Value>;

/// Opaque identifier of a user, either numeric or textual.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl UserId {
    /// Zero, the empty string and `"0"` do not identify anyone.
    pub fn is_truthy(&self) -> bool {
        match self {
            UserId::Int(i) => *i != 0,
            UserId::Text(s) => !s.is_empty() && s != "0",
        }
    }

    /// Parse command line or form input, keeping integers numeric.
    pub fn parse(value: &str) -> Self {
        value
            .parse::<i64>()
            .map(UserId::Int)
            .unwrap_or_else(|_| UserId::Text(value.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(i) => write!(f, "{}", i),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Int(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        UserId::Text(value)
    }
}

/// Returns the id only when it identifies someone.
pub fn present(user_id: Option<&UserId>) -> Option<&UserId> {
    user_id.filter(|id| id.is_truthy())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl ToastType {
    /// Unknown values become `info`.
    pub fn coerce(value: &str) -> Self {
        match value {
            "success" => ToastType::Success,
            "error" => ToastType::Error,
            "warning" => ToastType::Warning,
            _ => ToastType::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastType::Success => "success",
            ToastType::Error => "error",
            ToastType::Info => "info",
            ToastType::Warning => "warning",
        }
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    #[serde(rename = "type", default)]
    pub toast_type: ToastType,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl Toast {
    pub fn new(message: &str, toast_type: ToastType, context: Map<String, Value>) -> Self {
        Self {
            message: message.to_string(),
            toast_type,
            context,
        }
    }
}

#[derive(Serialize)]
pub struct ToastRequest<'a> {
    pub user_id: &'a UserId,
    pub message: &'a str,
    #[serde(rename = "type")]
    pub toast_type: ToastType,
    pub context: &'a Map<String, Value>,
}

#[derive(Serialize)]
pub struct PushNotification<'a> {
    pub user_id: &'a UserId,
    pub title: &'a str,
    pub body: &'a str,
    // Optional fields are left out entirely rather than sent as null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
}

impl<'a> PushNotification<'a> {
    pub fn new(
        user_id: &'a UserId,
        title: &'a str,
        body: &'a str,
        url: Option<&'a str>,
        icon: Option<&'a str>,
    ) -> Self {
        Self {
            user_id,
            title,
            body,
            url: url.filter(|u| !u.is_empty()),
            icon: icon.filter(|i| !i.is_empty()),
        }
    }
}

#[derive(Serialize)]
pub struct SubscriptionRequest<'a, T: Serialize> {
    pub user_id: &'a UserId,
    pub subscription: &'a T,
}

/// Loose truthiness used for flags coming back from the service.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Whether a service response reports success through its `ok` field.
pub fn response_ok(response: &ServiceResponse) -> bool {
    response.get("ok").is_some_and(is_truthy)
}
