use anyhow::Context;
use async_trait::async_trait;

use super::Mailer;

pub struct MailgunMailer {
    api_base: String,
    domain: String,
    api_key: String,
    from: String,
    client: reqwest::Client,
}

impl MailgunMailer {
    pub fn new(api_base: String, domain: String, api_key: String, from: String) -> Self {
        Self {
            api_base,
            domain,
            api_key,
            from,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> anyhow::Result<()> {
        let url = format!("{}/v3/{}/messages", self.api_base, self.domain);

        self.client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("html", html_body),
                ("text", text_body),
            ])
            .send()
            .await
            .context("failed to send email")?
            .error_for_status()
            .context("mail API returned error")?;

        Ok(())
    }
}
