use crate::notify::{NotificationService, UserId};

pub async fn run(
    service: &NotificationService,
    user_id: &str,
    title: &str,
    body: &str,
    url: Option<&str>,
    icon: Option<&str>,
) {
    let user_id = UserId::parse(user_id);
    let sent = service
        .notify_push(Some(&user_id), title, body, url, icon)
        .await;
    println!("{}", sent);
}
