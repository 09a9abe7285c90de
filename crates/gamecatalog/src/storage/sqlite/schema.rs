//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// Pragmas applied to every new connection.
pub const PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
"#;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Editors table
CREATE TABLE IF NOT EXISTS editors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    country TEXT NOT NULL
);

-- Categories table
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Video games table
CREATE TABLE IF NOT EXISTS video_games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    release_date TEXT NOT NULL,
    description TEXT NOT NULL,
    cover_image TEXT,
    updated_at TEXT NOT NULL,
    editor_id INTEGER,
    FOREIGN KEY (editor_id) REFERENCES editors(id) ON DELETE SET NULL
);

-- Video game <-> category join table
CREATE TABLE IF NOT EXISTS video_game_categories (
    video_game_id INTEGER NOT NULL,
    category_id INTEGER NOT NULL,
    PRIMARY KEY (video_game_id, category_id),
    FOREIGN KEY (video_game_id) REFERENCES video_games(id) ON DELETE CASCADE,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    roles TEXT NOT NULL,
    newsletter INTEGER NOT NULL DEFAULT 0
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_video_games_release_date ON video_games(release_date);
CREATE INDEX IF NOT EXISTS idx_video_games_editor_id ON video_games(editor_id);
CREATE INDEX IF NOT EXISTS idx_video_game_categories_category_id ON video_game_categories(category_id);
CREATE INDEX IF NOT EXISTS idx_users_newsletter ON users(newsletter);
"#;

// Video game queries.
// Category ids are aggregated into a comma separated list so one row maps to
// one game.
macro_rules! video_game_query {
    ($tail:literal) => {
        concat!(
            "SELECT g.id, g.title, g.release_date, g.description, g.cover_image, ",
            "g.updated_at, g.editor_id, ",
            "(SELECT group_concat(category_id, ',') FROM video_game_categories ",
            "WHERE video_game_id = g.id) AS category_ids ",
            "FROM video_games g ",
            $tail
        )
    };
}

pub const SELECT_VIDEO_GAMES_PAGE: &str = video_game_query!("ORDER BY g.id LIMIT ?1 OFFSET ?2");

pub const SELECT_VIDEO_GAME_BY_ID: &str = video_game_query!("WHERE g.id = ?1");

pub const SELECT_VIDEO_GAMES_RELEASED_BETWEEN: &str =
    video_game_query!("WHERE g.release_date BETWEEN ?1 AND ?2 ORDER BY g.release_date, g.id");

pub const SELECT_VIDEO_GAMES_BY_EDITOR: &str =
    video_game_query!("WHERE g.editor_id = ?1 ORDER BY g.id");

pub const SELECT_VIDEO_GAMES_BY_CATEGORY: &str = video_game_query!(
    "WHERE g.id IN (SELECT video_game_id FROM video_game_categories WHERE category_id = ?1) ORDER BY g.id"
);

pub const COUNT_VIDEO_GAMES: &str = "SELECT COUNT(*) FROM video_games";

pub const INSERT_VIDEO_GAME: &str = r#"
INSERT INTO video_games (title, release_date, description, cover_image, updated_at, editor_id)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const UPDATE_VIDEO_GAME: &str = r#"
UPDATE video_games
SET title = ?2, release_date = ?3, description = ?4, cover_image = ?5, updated_at = ?6, editor_id = ?7
WHERE id = ?1
"#;

pub const DELETE_VIDEO_GAME: &str = "DELETE FROM video_games WHERE id = ?1";

pub const INSERT_VIDEO_GAME_CATEGORY: &str = r#"
INSERT OR IGNORE INTO video_game_categories (video_game_id, category_id)
VALUES (?1, ?2)
"#;

pub const DELETE_VIDEO_GAME_CATEGORIES: &str =
    "DELETE FROM video_game_categories WHERE video_game_id = ?1";

// Editor queries
pub const SELECT_EDITORS_PAGE: &str = r#"
SELECT id, name, country
FROM editors
ORDER BY id
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_EDITOR_BY_ID: &str = r#"
SELECT id, name, country
FROM editors
WHERE id = ?1
"#;

pub const INSERT_EDITOR: &str = "INSERT INTO editors (name, country) VALUES (?1, ?2)";

pub const UPDATE_EDITOR: &str = "UPDATE editors SET name = ?2, country = ?3 WHERE id = ?1";

pub const DELETE_EDITOR: &str = "DELETE FROM editors WHERE id = ?1";

// Category queries
pub const SELECT_CATEGORIES_PAGE: &str = r#"
SELECT id, name
FROM categories
ORDER BY id
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_CATEGORY_BY_ID: &str = r#"
SELECT id, name
FROM categories
WHERE id = ?1
"#;

pub const INSERT_CATEGORY: &str = "INSERT INTO categories (name) VALUES (?1)";

pub const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?2 WHERE id = ?1";

pub const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";

// User queries
pub const SELECT_USERS_PAGE: &str = r#"
SELECT id, email, password_hash, roles, newsletter
FROM users
ORDER BY id
LIMIT ?1 OFFSET ?2
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, password_hash, roles, newsletter
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, password_hash, roles, newsletter
FROM users
WHERE email = ?1
"#;

pub const SELECT_NEWSLETTER_SUBSCRIBERS: &str = r#"
SELECT id, email, password_hash, roles, newsletter
FROM users
WHERE newsletter = 1
ORDER BY id
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (email, password_hash, roles, newsletter)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET email = ?2, password_hash = ?3, roles = ?4, newsletter = ?5
WHERE id = ?1
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";
