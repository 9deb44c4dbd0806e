use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::BookingStore;
use crate::services::mailer::Mailer;

pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    /// None when mail credentials are not configured; bookings still succeed.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub config: AppConfig,
}
