use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub mail_api_base: String,
    pub mail_domain: String,
    pub mail_api_key: String,
    pub mail_from: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "carepair.db".to_string()),
            mail_api_base: env::var("MAIL_API_BASE")
                .unwrap_or_else(|_| "https://api.mailgun.net".to_string()),
            mail_domain: env::var("MAIL_DOMAIN").unwrap_or_default(),
            mail_api_key: env::var("MAIL_API_KEY").unwrap_or_default(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "CarePair Auto Service <bookings@carepair.example>".to_string()),
        }
    }

    /// Empty credentials disable confirmation emails (dev mode).
    pub fn mail_configured(&self) -> bool {
        !self.mail_api_key.is_empty() && !self.mail_domain.is_empty()
    }
}
