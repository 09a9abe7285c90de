use askama::Template;

use gamecatalog_core::catalog::VideoGameSummary;
use gamecatalog_core::notify::{EmailMessage, MailError};

/// Weekly newsletter body.
#[derive(Template)]
#[template(path = "emails/weekly_releases.html")]
struct WeeklyReleasesTemplate<'a> {
    subject: &'a str,
    games: &'a [VideoGameSummary],
}

/// Renders the HTML body of a newsletter message.
pub fn render_weekly_releases(message: &EmailMessage) -> Result<String, MailError> {
    WeeklyReleasesTemplate {
        subject: &message.subject,
        games: &message.games,
    }
    .render()
    .map_err(|e| MailError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gamecatalog_core::catalog::NewVideoGame;
    use gamecatalog_core::notify::WEEKLY_SUBJECT;

    fn message(games: Vec<VideoGameSummary>) -> EmailMessage {
        EmailMessage {
            to: "user@example.com".to_string(),
            subject: WEEKLY_SUBJECT.to_string(),
            games,
        }
    }

    #[test]
    fn test_render_lists_games() {
        let game = NewVideoGame::new(
            "Hollow Knight <Silksong>",
            NaiveDate::from_ymd_opt(2025, 9, 4).unwrap(),
            "A long awaited sequel.",
        )
        .with_cover_image("silksong.png")
        .into_video_game(1);

        let html = render_weekly_releases(&message(vec![VideoGameSummary::from(&game)])).unwrap();

        assert!(html.contains(WEEKLY_SUBJECT));
        assert!(html.contains("Hollow Knight &#60;Silksong&#62;"));
        assert!(!html.contains("<Silksong>"));
        assert!(html.contains("2025-09-04"));
        assert!(html.contains("silksong.png"));
    }

    #[test]
    fn test_render_empty_week() {
        let html = render_weekly_releases(&message(vec![])).unwrap();
        assert!(html.contains("No new releases"));
    }
}
