//! Email transports for the release newsletter.
//!
//! [`LogMailer`] writes each message to the log and is the default.
//! [`HttpRelayMailer`] renders the HTML body and POSTs it to a mail relay.

mod logging;
mod relay;
mod template;

use std::sync::Arc;

use gamecatalog_core::notify::Mailer;

use crate::config::Config;

pub use logging::LogMailer;
pub use relay::HttpRelayMailer;
pub use template::render_weekly_releases;

/// Picks the transport from the configuration.
pub fn from_config(config: &Config) -> Arc<dyn Mailer> {
    match &config.mail_relay_url {
        Some(url) => {
            tracing::info!(relay = %url, "Sending emails through HTTP relay");
            Arc::new(HttpRelayMailer::new(url.clone(), config.mail_from.clone()))
        }
        None => {
            tracing::info!("MAIL_RELAY_URL not set, emails will only be logged");
            Arc::new(LogMailer::new(config.mail_from.clone()))
        }
    }
}
