//! API request types for catalog operations.
//!
//! Each request is a normalized value object: transport adapters (JSON body,
//! multipart form) build one of these and hand it to the same business logic.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::serde::{
    deserialize_optional_date, deserialize_optional_reference,
    deserialize_optional_reference_list, deserialize_optional_string,
    deserialize_reference_list,
};

use super::error::{ValidationError, Violation};
use super::operations::{
    category_violations, editor_violations, email_violations, validate_category,
    validate_editor, validate_video_game, video_game_violations,
};
use super::types::{
    Category, Editor, NewCategory, NewEditor, NewUser, NewVideoGame, User, VideoGame,
};

/// Request payload for creating a video game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoGameRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_reference")]
    pub editor: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_reference_list")]
    pub categories: Vec<i64>,
}

impl CreateVideoGameRequest {
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            release_date: Some(release_date),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_editor(mut self, editor_id: i64) -> Self {
        self.editor = Some(editor_id);
        self
    }

    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = i64>) -> Self {
        self.categories = category_ids.into_iter().collect();
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    /// Validates the request and converts it into an unsaved game.
    pub fn into_new_video_game(self) -> Result<NewVideoGame, ValidationError> {
        let violations = video_game_violations(&self.title, &self.description, self.release_date);
        let Some(release_date) = self.release_date else {
            return Err(ValidationError::Invalid(violations));
        };
        ValidationError::check(violations)?;

        Ok(NewVideoGame {
            title: self.title.trim().to_string(),
            release_date,
            description: self.description.trim().to_string(),
            cover_image: self.cover_image,
            updated_at: Utc::now(),
            editor_id: self.editor,
            category_ids: self.categories,
        })
    }
}

/// Request payload for updating a video game. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoGameRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_reference")]
    pub editor: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_reference_list")]
    pub categories: Option<Vec<i64>>,
}

impl UpdateVideoGameRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = i64>) -> Self {
        self.categories = Some(category_ids.into_iter().collect());
        self
    }

    /// Applies the update and validates the result. `game` is only modified
    /// when the outcome is valid.
    pub fn apply_to(self, game: &mut VideoGame) -> Result<(), ValidationError> {
        let mut updated = game.clone();
        if let Some(title) = self.title {
            updated.title = title.trim().to_string();
        }
        if let Some(release_date) = self.release_date {
            updated.release_date = release_date;
        }
        if let Some(description) = self.description {
            updated.description = description.trim().to_string();
        }
        if let Some(cover_image) = self.cover_image {
            updated.cover_image = Some(cover_image);
        }
        if let Some(editor) = self.editor {
            updated.editor_id = Some(editor);
        }
        if let Some(mut categories) = self.categories {
            categories.sort_unstable();
            categories.dedup();
            updated.category_ids = categories;
        }
        updated.updated_at = Utc::now();

        validate_video_game(&updated)?;
        *game = updated;
        Ok(())
    }
}

/// Request payload for creating an editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateEditorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

impl CreateEditorRequest {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn into_new_editor(self) -> Result<NewEditor, ValidationError> {
        ValidationError::check(editor_violations(&self.name, &self.country))?;
        Ok(NewEditor::new(self.name.trim(), self.country.trim()))
    }
}

/// Request payload for updating an editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateEditorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UpdateEditorRequest {
    pub fn apply_to(self, editor: &mut Editor) -> Result<(), ValidationError> {
        let mut updated = editor.clone();
        if let Some(name) = self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(country) = self.country {
            updated.country = country.trim().to_string();
        }
        validate_editor(&updated)?;
        *editor = updated;
        Ok(())
    }
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
}

impl CreateCategoryRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn into_new_category(self) -> Result<NewCategory, ValidationError> {
        ValidationError::check(category_violations(&self.name))?;
        Ok(NewCategory::new(self.name.trim()))
    }
}

/// Request payload for updating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn apply_to(self, category: &mut Category) -> Result<(), ValidationError> {
        let mut updated = category.clone();
        if let Some(name) = self.name {
            updated.name = name.trim().to_string();
        }
        validate_category(&updated)?;
        *category = updated;
        Ok(())
    }
}

/// Request payload for creating a user. The password is hashed by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub newsletter: bool,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            newsletter: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = email_violations(self.email.trim());
        if self.password.is_empty() {
            violations.push(Violation::new("password", "cannot be blank"));
        }
        ValidationError::check(violations)
    }

    /// Builds the user to store. New accounts always get `ROLE_USER` only.
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser::new(self.email.trim(), password_hash).with_newsletter(self.newsletter)
    }
}

/// Request payload for updating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub password: Option<String>,
    #[serde(default)]
    pub repeat_password: Option<String>,
    #[serde(default)]
    pub newsletter: Option<bool>,
}

impl UpdateUserRequest {
    /// Returns the new plain password, if one was supplied with a matching
    /// confirmation.
    pub fn new_password(&self) -> Result<Option<&str>, ValidationError> {
        match &self.password {
            None => Ok(None),
            Some(password) if self.repeat_password.as_deref() == Some(password.as_str()) => {
                Ok(Some(password.as_str()))
            }
            Some(_) => Err(ValidationError::PasswordMismatch),
        }
    }

    /// Applies the update. `password_hash` must be the hash of
    /// [`Self::new_password`] when a new password was supplied.
    pub fn apply_to(
        self,
        user: &mut User,
        password_hash: Option<String>,
    ) -> Result<(), ValidationError> {
        let mut updated = user.clone();
        if let Some(email) = self.email {
            updated.email = email.trim().to_string();
        }
        if let Some(newsletter) = self.newsletter {
            updated.newsletter = newsletter;
        }
        if let Some(hash) = password_hash {
            updated.password_hash = hash;
        }
        ValidationError::check(email_violations(&updated.email))?;
        *user = updated;
        Ok(())
    }
}
