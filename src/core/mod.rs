pub mod config;
pub mod logging;

pub use config::{AppConfig, SubscriptionMode, resolve_base_url};
pub use logging::{NotificationLog, init_tracing};
