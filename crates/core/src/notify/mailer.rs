use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{User, VideoGame, VideoGameSummary};

/// Subject line of the weekly release newsletter.
pub const WEEKLY_SUBJECT: &str = "New games this week";

/// Errors returned by an email transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("Failed to render email: {0}")]
    Render(String),
    #[error("Mail transport failed: {0}")]
    Transport(String),
    #[error("Mail relay rejected message with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}

/// One outgoing email. `games` is the template context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub games: Vec<VideoGameSummary>,
}

/// Email dispatch collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. Delivery beyond the transport hand-off is not tracked.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Builds one newsletter per subscriber, each listing every game in `games`.
pub fn weekly_digest(subscribers: &[User], games: &[VideoGame]) -> Vec<EmailMessage> {
    let summaries: Vec<VideoGameSummary> = games.iter().map(VideoGameSummary::from).collect();

    subscribers
        .iter()
        .map(|user| EmailMessage {
            to: user.email.clone(),
            subject: WEEKLY_SUBJECT.to_string(),
            games: summaries.clone(),
        })
        .collect()
}
