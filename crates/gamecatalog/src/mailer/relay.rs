use async_trait::async_trait;
use serde::Serialize;

use gamecatalog_core::notify::{EmailMessage, MailError, Mailer};

use super::template::render_weekly_releases;

/// JSON body accepted by the relay.
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// Mailer that POSTs rendered messages to an HTTP relay.
pub struct HttpRelayMailer {
    client: reqwest::Client,
    url: String,
    from: String,
}

impl HttpRelayMailer {
    pub fn new(url: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: render_weekly_releases(message)?,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        tracing::debug!(to = %message.to, "Email handed to relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let mailer = HttpRelayMailer::new("http://127.0.0.1:9/send", "no-reply@videogames.com");
        let message = EmailMessage {
            to: "user@example.com".to_string(),
            subject: "subject".to_string(),
            games: vec![],
        };

        let result = mailer.send(&message).await;

        assert!(matches!(result, Err(MailError::Transport(_))));
    }
}
