use anyhow::Result;

use crate::core::AppConfig;
use crate::notify::NotificationService;
use crate::session::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub service: NotificationService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let service = NotificationService::from_config(&config)?;
        Ok(Self {
            sessions: SessionStore::new(),
            service,
            config,
        })
    }
}
