//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;

use gamecatalog_core::catalog::{normalize_roles, Category, Editor, Role, User, VideoGame};

/// Convert a SQLite row to a VideoGame.
///
/// Expected columns: id, title, release_date, description, cover_image,
/// updated_at, editor_id, category_ids (comma separated or NULL)
pub fn row_to_video_game(row: &Row) -> rusqlite::Result<VideoGame> {
    let release_date: String = row.get(2)?;
    let updated_at: String = row.get(5)?;
    let category_ids: Option<String> = row.get(7)?;

    Ok(VideoGame {
        id: row.get(0)?,
        title: row.get(1)?,
        release_date: parse_date(&release_date)?,
        description: row.get(3)?,
        cover_image: row.get(4)?,
        updated_at: parse_datetime(&updated_at)?,
        editor_id: row.get(6)?,
        category_ids: parse_id_list(category_ids.as_deref().unwrap_or_default())?,
    })
}

/// Convert a SQLite row to an Editor.
///
/// Expected columns: id, name, country
pub fn row_to_editor(row: &Row) -> rusqlite::Result<Editor> {
    Ok(Editor {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
    })
}

/// Convert a SQLite row to a Category.
///
/// Expected columns: id, name
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Convert a SQLite row to a User.
///
/// Expected columns: id, email, password_hash, roles, newsletter
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let roles: String = row.get(3)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        roles: parse_roles(&roles)?,
        newsletter: row.get(4)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse a `group_concat` id list into sorted ids.
fn parse_id_list(s: &str) -> rusqlite::Result<Vec<i64>> {
    let mut ids = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| conversion_error(format!("Invalid id in list: {part}")))
        })
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Parse a comma separated role list.
fn parse_roles(s: &str) -> rusqlite::Result<Vec<Role>> {
    let roles = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Role::parse(part).ok_or_else(|| conversion_error(format!("Unknown role: {part}"))))
        .collect::<rusqlite::Result<Vec<Role>>>()?;
    Ok(normalize_roles(roles))
}

/// Serialize roles for storage.
pub fn roles_to_string(roles: &[Role]) -> String {
    normalize_roles(roles.iter().copied())
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
///
/// The fixed width keeps lexicographic order equal to date order, which the
/// `BETWEEN` range query relies on.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
