use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::notify::{NotificationService, UserId};

pub async fn run(
    service: &NotificationService,
    user_id: &str,
    message: &str,
    toast_type: &str,
    context: Option<&str>,
) -> Result<()> {
    let context = match context {
        Some(raw) => match serde_json::from_str::<Value>(raw)
            .with_context(|| "Attempted to parse toast context as json")?
        {
            Value::Object(map) => map,
            _ => return Err(anyhow!("Toast context must be a JSON object")),
        },
        None => Map::new(),
    };

    let user_id = UserId::parse(user_id);
    let sent = service
        .notify_toast(Some(&user_id), message, toast_type, &context)
        .await;
    println!("{}", sent);
    Ok(())
}
