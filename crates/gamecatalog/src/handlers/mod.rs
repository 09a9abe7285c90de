//! HTTP handlers for the `/api/v1` surface.

pub mod categories;
pub mod editors;
pub mod health;
pub mod login;
mod payload;
pub mod users;
pub mod video_games;

use serde::Deserialize;

use gamecatalog_core::pagination::{Pagination, PaginationError};

/// `page` and `limit` query parameters of list endpoints.
///
/// Kept as raw strings so malformed values produce the pagination error
/// message instead of a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}
