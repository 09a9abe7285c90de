use async_trait::async_trait;

use gamecatalog_core::notify::{EmailMessage, MailError, Mailer};

/// Mailer that only logs. Used when no relay is configured.
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let titles: Vec<&str> = message.games.iter().map(|g| g.title.as_str()).collect();
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            games = ?titles,
            "Email sent"
        );
        Ok(())
    }
}
