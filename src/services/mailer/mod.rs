pub mod mailgun;

use async_trait::async_trait;

/// Outbound message transport. Callers treat delivery failure as non-fatal;
/// it is reported so the log can observe it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> anyhow::Result<()>;
}
