use chrono::NaiveDate;

use super::error::{ValidationError, Violation};
use super::types::{Category, Editor, User, VideoGame};

pub const TITLE_MIN_LEN: usize = 2;
pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 512;
pub const NAME_MAX_LEN: usize = 255;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Collects violations for the fields every video game must satisfy.
pub fn video_game_violations(
    title: &str,
    description: &str,
    release_date: Option<NaiveDate>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let title_len = char_len(title.trim());
    if title_len < TITLE_MIN_LEN {
        violations.push(Violation::new(
            "title",
            format!("must be at least {TITLE_MIN_LEN} characters long"),
        ));
    } else if title_len > TITLE_MAX_LEN {
        violations.push(Violation::new(
            "title",
            format!("cannot be longer than {TITLE_MAX_LEN} characters"),
        ));
    }

    let description_len = char_len(description.trim());
    if description_len < DESCRIPTION_MIN_LEN {
        violations.push(Violation::new(
            "description",
            format!("must be at least {DESCRIPTION_MIN_LEN} characters long"),
        ));
    } else if description_len > DESCRIPTION_MAX_LEN {
        violations.push(Violation::new(
            "description",
            format!("cannot be longer than {DESCRIPTION_MAX_LEN} characters"),
        ));
    }

    if release_date.is_none() {
        violations.push(Violation::new("releaseDate", "is required"));
    }

    violations
}

/// Validates a video game before it is written.
pub fn validate_video_game(game: &VideoGame) -> Result<(), ValidationError> {
    ValidationError::check(video_game_violations(
        &game.title,
        &game.description,
        Some(game.release_date),
    ))
}

fn name_violations(field: &'static str, value: &str) -> Option<Violation> {
    let len = char_len(value.trim());
    if len == 0 {
        Some(Violation::new(field, "cannot be blank"))
    } else if len > NAME_MAX_LEN {
        Some(Violation::new(
            field,
            format!("cannot be longer than {NAME_MAX_LEN} characters"),
        ))
    } else {
        None
    }
}

pub fn editor_violations(name: &str, country: &str) -> Vec<Violation> {
    name_violations("name", name)
        .into_iter()
        .chain(name_violations("country", country))
        .collect()
}

/// Validates an editor before it is written.
pub fn validate_editor(editor: &Editor) -> Result<(), ValidationError> {
    ValidationError::check(editor_violations(&editor.name, &editor.country))
}

pub fn category_violations(name: &str) -> Vec<Violation> {
    name_violations("name", name).into_iter().collect()
}

/// Validates a category before it is written.
pub fn validate_category(category: &Category) -> Result<(), ValidationError> {
    ValidationError::check(category_violations(&category.name))
}

/// Returns true for addresses shaped like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

pub fn email_violations(email: &str) -> Vec<Violation> {
    if email.trim().is_empty() {
        vec![Violation::new("email", "cannot be blank")]
    } else if char_len(email) > NAME_MAX_LEN {
        vec![Violation::new(
            "email",
            format!("cannot be longer than {NAME_MAX_LEN} characters"),
        )]
    } else if !is_valid_email(email) {
        vec![Violation::new("email", "is not a valid email address")]
    } else {
        vec![]
    }
}

/// Validates a user before it is written.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    let mut violations = email_violations(&user.email);
    if user.password_hash.is_empty() {
        violations.push(Violation::new("password", "cannot be blank"));
    }
    ValidationError::check(violations)
}

/// Identifier given to a reference that names no id. Never allocated by a store,
/// so lookups on it come back empty.
pub const UNRESOLVED_REFERENCE: i64 = 0;

/// Extracts an identifier from a loosely formatted reference.
///
/// Takes the last run of digits, so `"3"`, `" 3 "` and `"/api/v1/editors/3"`
/// all resolve to `3`. Returns `None` when nothing numeric remains.
pub fn sanitize_reference(raw: &str) -> Option<i64> {
    raw.rsplit(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())?
        .parse()
        .ok()
}

/// Returns the ids in `requested` that are absent from `known`.
pub fn missing_ids(requested: &[i64], known: &[i64]) -> Vec<i64> {
    requested
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NewEditor, NewUser, NewVideoGame};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_video_game_passes() {
        let game = NewVideoGame::new("Celeste", date(2018, 1, 25), "A tight platformer.")
            .into_video_game(1);
        assert!(validate_video_game(&game).is_ok());
    }

    #[test]
    fn test_title_bounds() {
        let too_short = video_game_violations("A", "Long enough description", Some(date(2020, 1, 1)));
        assert_eq!(too_short.len(), 1);
        assert_eq!(too_short[0].field, "title");

        let min = video_game_violations("AB", "Long enough description", Some(date(2020, 1, 1)));
        assert!(min.is_empty());

        let max = "x".repeat(TITLE_MAX_LEN);
        assert!(video_game_violations(&max, "Long enough description", Some(date(2020, 1, 1))).is_empty());

        let over = "x".repeat(TITLE_MAX_LEN + 1);
        let violations = video_game_violations(&over, "Long enough description", Some(date(2020, 1, 1)));
        assert_eq!(violations[0].field, "title");
    }

    #[test]
    fn test_description_bounds() {
        let short = video_game_violations("Title", "too short", Some(date(2020, 1, 1)));
        assert_eq!(short[0].field, "description");

        assert!(video_game_violations("Title", "exactly 10", Some(date(2020, 1, 1))).is_empty());

        let over = "d".repeat(DESCRIPTION_MAX_LEN + 1);
        let violations = video_game_violations("Title", &over, Some(date(2020, 1, 1)));
        assert_eq!(violations[0].field, "description");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 2 characters, 4 bytes
        assert!(video_game_violations("éé", "Long enough description", Some(date(2020, 1, 1))).is_empty());
    }

    #[test]
    fn test_all_violations_collected() {
        let violations = video_game_violations("", "", None);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["title", "description", "releaseDate"]);
    }

    #[test]
    fn test_editor_requires_name_and_country() {
        let editor = NewEditor::new("  ", "").into_editor(1);
        let err = validate_editor(&editor).unwrap_err();
        assert_eq!(err.violations().len(), 2);

        let editor = NewEditor::new("Nintendo", "Japan").into_editor(1);
        assert!(validate_editor(&editor).is_ok());
    }

    #[test]
    fn test_category_name_too_long() {
        let violations = category_violations(&"c".repeat(NAME_MAX_LEN + 1));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("admin@example.com"));
        assert!(!is_valid_email("admin.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("admin@"));
        assert!(!is_valid_email("admin@localhost"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("ad min@example.com"));
    }

    #[test]
    fn test_validate_user() {
        let user = NewUser::new("user@example.com", "hash").into_user(2);
        assert!(validate_user(&user).is_ok());

        let user = NewUser::new("nope", "").into_user(2);
        assert_eq!(validate_user(&user).unwrap_err().violations().len(), 2);
    }

    #[test]
    fn test_sanitize_reference() {
        assert_eq!(sanitize_reference("3"), Some(3));
        assert_eq!(sanitize_reference(" 12 "), Some(12));
        assert_eq!(sanitize_reference("/api/v1/editors/42"), Some(42));
        assert_eq!(sanitize_reference("/api/v1/editors/3"), Some(3));
        assert_eq!(sanitize_reference("/api/v1/categories/7/"), Some(7));
        assert_eq!(sanitize_reference("abc"), None);
        assert_eq!(sanitize_reference(""), None);
    }

    #[test]
    fn test_missing_ids() {
        assert_eq!(missing_ids(&[1, 2, 5], &[1, 2, 3]), vec![5]);
        assert!(missing_ids(&[], &[1]).is_empty());
    }
}
