use anyhow::Result;

use crate::notify::{NotificationService, UserId};

pub async fn run(service: &NotificationService, user_id: &str) -> Result<()> {
    let user_id = UserId::parse(user_id);
    let items = service.fetch_toasts(Some(&user_id)).await;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
