use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public path under which uploaded cover images are served.
pub const COVER_IMAGE_BASE_PATH: &str = "/images/covers";

/// A video game in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGame {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub description: String,
    /// File name of the uploaded cover, relative to the covers directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<i64>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

impl VideoGame {
    /// Public URL of the cover image, if the game has one.
    pub fn cover_image_url(&self) -> Option<String> {
        self.cover_image
            .as_deref()
            .map(|name| format!("{COVER_IMAGE_BASE_PATH}/{name}"))
    }

    /// Returns true if the game is attached to the given category.
    pub fn has_category(&self, category_id: i64) -> bool {
        self.category_ids.contains(&category_id)
    }
}

/// A video game that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideoGame {
    pub title: String,
    pub release_date: NaiveDate,
    pub description: String,
    pub cover_image: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub editor_id: Option<i64>,
    pub category_ids: Vec<i64>,
}

impl NewVideoGame {
    /// Creates a game with no cover, editor or categories.
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            release_date,
            description: description.into(),
            cover_image: None,
            updated_at: Utc::now(),
            editor_id: None,
            category_ids: Vec::new(),
        }
    }

    pub fn with_editor(mut self, editor_id: i64) -> Self {
        self.editor_id = Some(editor_id);
        self
    }

    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    /// Attaches the identifier assigned by the store.
    pub fn into_video_game(self, id: i64) -> VideoGame {
        let mut category_ids = self.category_ids;
        category_ids.sort_unstable();
        category_ids.dedup();

        VideoGame {
            id,
            title: self.title,
            release_date: self.release_date,
            description: self.description,
            cover_image: self.cover_image,
            updated_at: self.updated_at,
            editor_id: self.editor_id,
            category_ids,
        }
    }
}

/// List representation of a video game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGameSummary {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub description: String,
    pub cover_image: Option<String>,
    pub cover_image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&VideoGame> for VideoGameSummary {
    fn from(game: &VideoGame) -> Self {
        Self {
            id: game.id,
            title: game.title.clone(),
            release_date: game.release_date,
            description: game.description.clone(),
            cover_image: game.cover_image.clone(),
            cover_image_url: game.cover_image_url(),
            updated_at: game.updated_at,
        }
    }
}

/// A video game with its editor and categories resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGameDetail {
    #[serde(flatten)]
    pub game: VideoGameSummary,
    pub editor: Option<Editor>,
    pub categories: Vec<Category>,
}

impl VideoGameDetail {
    pub fn new(game: &VideoGame, editor: Option<Editor>, categories: Vec<Category>) -> Self {
        Self {
            game: VideoGameSummary::from(game),
            editor,
            categories,
        }
    }
}

/// A company publishing video games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    pub id: i64,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEditor {
    pub name: String,
    pub country: String,
}

impl NewEditor {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn into_editor(self, id: i64) -> Editor {
        Editor {
            id,
            name: self.name,
            country: self.country,
        }
    }
}

/// An editor together with the games it publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDetail {
    #[serde(flatten)]
    pub editor: Editor,
    pub video_games: Vec<VideoGameSummary>,
}

/// A genre a video game can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn into_category(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
        }
    }
}

/// A category together with the games attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub video_games: Vec<VideoGameSummary>,
}

/// Authorization role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Parses the wire name of a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROLE_USER" => Some(Role::User),
            "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a role set: always contains `ROLE_USER`, sorted, no duplicates.
pub fn normalize_roles(roles: impl IntoIterator<Item = Role>) -> Vec<Role> {
    let mut roles: Vec<Role> = roles.into_iter().chain([Role::User]).collect();
    roles.sort_unstable();
    roles.dedup();
    roles
}

/// An account that can log in and receive the weekly newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub newsletter: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub newsletter: bool,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            roles: vec![Role::User],
            newsletter: false,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = normalize_roles(roles);
        self
    }

    pub fn with_newsletter(mut self, newsletter: bool) -> Self {
        self.newsletter = newsletter;
        self
    }

    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            roles: normalize_roles(self.roles),
            newsletter: self.newsletter,
        }
    }
}

/// Public representation of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub roles: Vec<Role>,
    pub newsletter: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            newsletter: user.newsletter,
        }
    }
}
