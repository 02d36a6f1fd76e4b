use crate::notify::NotificationService;

pub async fn run(service: &NotificationService) {
    let healthy = service.health_check().await;
    if healthy {
        println!("Notification service at {} is up", service.base_url());
    } else {
        println!("Notification service at {} is unreachable", service.base_url());
    }
}
